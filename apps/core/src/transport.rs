use serde::{Deserialize, Serialize};

use crate::contract::{CoreRequest, CoreResponse, ViewDto};
use crate::model::ProfileKey;
use crate::session::{LauncherSession, SessionError};
use crate::store::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    InvalidRequest,
    ProfileNotFound,
    IconNotFound,
    Launch,
    Store,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: CoreResponse },
    Err { error: ErrorResponse },
}

pub fn handle_request(session: &mut LauncherSession, request: CoreRequest) -> TransportResponse {
    match dispatch(session, request) {
        Ok(response) => TransportResponse::Ok { response },
        Err(error) => TransportResponse::Err {
            error: map_session_error(error),
        },
    }
}

pub fn handle_json(session: &mut LauncherSession, payload: &str) -> String {
    let response = match serde_json::from_str::<CoreRequest>(payload) {
        Ok(request) => handle_request(session, request),
        Err(error) => TransportResponse::Err {
            error: ErrorResponse {
                code: ErrorCode::InvalidJson,
                message: error.to_string(),
            },
        },
    };

    match serde_json::to_string(&response) {
        Ok(encoded) => encoded,
        Err(error) => {
            tracing::error!(%error, "failed to encode transport response");
            r#"{"status":"err","error":{"code":"invalid_request","message":"response encoding failed"}}"#
                .to_string()
        }
    }
}

fn dispatch(
    session: &mut LauncherSession,
    request: CoreRequest,
) -> Result<CoreResponse, SessionError> {
    match request {
        CoreRequest::Snapshot => {}
        CoreRequest::SetQuery(payload) => session.set_query(&payload.query),
        CoreRequest::Key(payload) => {
            let handled = session.on_key(&payload.code, payload.shift);
            return Ok(CoreResponse::Key {
                handled,
                view: ViewDto::from(&*session),
            });
        }
        CoreRequest::SelectTab(payload) => {
            session.select_tab(&payload.tab);
        }
        CoreRequest::Launch(payload) => {
            let key = ProfileKey::new(&payload.browser, &payload.directory);
            match session.launch_key(&key) {
                // Failures are shown through the view's error field.
                Ok(_) | Err(SessionError::Launch(_)) => {}
                Err(error) => return Err(error),
            }
        }
        CoreRequest::Icon(payload) => {
            let key = ProfileKey::new(&payload.browser, &payload.directory);
            let path = session.icon_path(&key)?;
            return Ok(CoreResponse::Icon {
                browser: key.browser,
                directory: key.directory,
                path,
            });
        }
        CoreRequest::AddCollection(payload) => {
            session.add_collection(&payload.name)?;
        }
        CoreRequest::RemoveCollection(payload) => session.remove_collection(&payload.name)?,
        CoreRequest::SetMembership(payload) => {
            let key = ProfileKey::new(&payload.browser, &payload.directory);
            session.set_membership(&payload.collection, &key, payload.member)?;
        }
    }
    Ok(CoreResponse::View(ViewDto::from(&*session)))
}

fn map_session_error(error: SessionError) -> ErrorResponse {
    let code = match &error {
        SessionError::Store(StoreError::Collection(_)) => ErrorCode::InvalidRequest,
        SessionError::Store(_) => ErrorCode::Store,
        SessionError::ProfileNotFound(_) => ErrorCode::ProfileNotFound,
        SessionError::IconNotFound(_) => ErrorCode::IconNotFound,
        SessionError::Launch(_) => ErrorCode::Launch,
    };
    ErrorResponse {
        code,
        message: error.to_string(),
    }
}

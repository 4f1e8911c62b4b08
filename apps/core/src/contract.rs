use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::ListItem;
use crate::session::LauncherSession;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetQueryRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyRequest {
    pub code: String,
    #[serde(default)]
    pub shift: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectTabRequest {
    pub tab: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchRequest {
    pub browser: String,
    pub directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MembershipRequest {
    pub collection: String,
    pub browser: String,
    pub directory: String,
    pub member: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreRequest {
    Snapshot,
    SetQuery(SetQueryRequest),
    Key(KeyRequest),
    SelectTab(SelectTabRequest),
    Launch(LaunchRequest),
    AddCollection(CollectionRequest),
    RemoveCollection(CollectionRequest),
    SetMembership(MembershipRequest),
    Icon(LaunchRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileDto {
    pub browser: String,
    pub directory: String,
    pub name: String,
    pub has_icon: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabDto {
    pub name: String,
    pub label: String,
    pub removable: bool,
    pub items: Vec<ProfileDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewDto {
    pub query: String,
    pub tabs: Vec<TabDto>,
    pub current_tab: String,
    pub focus: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreResponse {
    View(ViewDto),
    Key { handled: bool, view: ViewDto },
    Icon {
        browser: String,
        directory: String,
        path: PathBuf,
    },
}

impl From<&ListItem> for ProfileDto {
    fn from(value: &ListItem) -> Self {
        Self {
            browser: value.profile.browser.clone(),
            directory: value.profile.directory.clone(),
            name: value.profile.name.clone(),
            has_icon: value.profile.ico_path.is_some(),
        }
    }
}

impl From<&LauncherSession> for ViewDto {
    fn from(session: &LauncherSession) -> Self {
        let labels = session.labels();
        let tabs = session
            .lists()
            .tabs()
            .iter()
            .map(|tab| TabDto {
                name: tab.name.clone(),
                label: labels.label(&tab.name),
                removable: !crate::collection::is_reserved_tab(&tab.name),
                items: tab.items.iter().map(ProfileDto::from).collect(),
            })
            .collect();

        Self {
            query: session.query().to_string(),
            tabs,
            current_tab: session.current_tab().to_string(),
            focus: session.focus(),
            error: session.error_message().map(str::to_string),
        }
    }
}

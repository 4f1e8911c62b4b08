use std::path::PathBuf;

use thiserror::Error;

use crate::collection::Collections;
use crate::compose::{compose, ComposedLists};
use crate::discovery::{icon_path, ProfileSource};
use crate::labels::Labels;
use crate::launch::{LaunchCoordinator, LaunchError, LaunchResult, PostLaunchAction};
use crate::model::{ListItem, Profile, ProfileKey};
use crate::navigator::{NavEvent, Navigator, Outcome};
use crate::store::{LauncherStore, StoreError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("profile not found: {0}")]
    ProfileNotFound(ProfileKey),
    #[error("profile has no icon: {0}")]
    IconNotFound(ProfileKey),
    #[error("launch failed: {0}")]
    Launch(#[from] LaunchError),
}

/// Owns every piece of launcher state and keeps the composed tab lists and
/// the navigator consistent with it. All mutation goes through `&mut self`.
pub struct LauncherSession {
    repository: Vec<ListItem>,
    query: String,
    collections: Collections,
    history: Vec<ProfileKey>,
    lists: ComposedLists,
    navigator: Navigator,
    error_message: Option<String>,
    store: Box<dyn LauncherStore>,
    launcher: LaunchCoordinator,
    labels: Labels,
}

impl LauncherSession {
    pub fn new(
        store: Box<dyn LauncherStore>,
        launcher: LaunchCoordinator,
        labels: Labels,
    ) -> Result<Self, SessionError> {
        let collections = store.collections()?;
        let history = store.history()?;
        let lists = compose(&[], "", &collections, &history);
        let navigator = Navigator::new(&lists);
        Ok(Self {
            repository: Vec::new(),
            query: String::new(),
            collections,
            history,
            lists,
            navigator,
            error_message: None,
            store,
            launcher,
            labels,
        })
    }

    pub fn load_profiles(&mut self, profiles: Vec<Profile>) {
        self.repository = profiles.into_iter().map(ListItem::new).collect();
        tracing::info!(profiles = self.repository.len(), "profiles loaded");
        self.recompose();
    }

    /// Loads the repository from `source`. A failing source leaves it empty.
    pub fn load_from(&mut self, source: &dyn ProfileSource) -> usize {
        let profiles = match source.load_all() {
            Ok(profiles) => profiles,
            Err(error) => {
                tracing::warn!(provider = source.provider_name(), %error, "profile source failed");
                Vec::new()
            }
        };
        self.load_profiles(profiles);
        self.repository.len()
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.recompose();
        self.navigator.handle(NavEvent::QueryChanged, &self.lists);
    }

    /// Feeds one navigation event. Returns whether it was handled, i.e.
    /// whether the host should suppress the key's default action.
    pub fn handle(&mut self, event: NavEvent) -> bool {
        tracing::debug!(
            ?event,
            tab = self.navigator.current_tab(),
            focus = self.navigator.focus(),
            "navigation event"
        );
        match self.navigator.handle(event, &self.lists) {
            Outcome::Ignored => false,
            Outcome::Handled => true,
            Outcome::Activate(item) => {
                match self.launch(&item) {
                    Ok(action) => tracing::debug!(?action, key = %item.key(), "activated"),
                    Err(error) => tracing::debug!(%error, key = %item.key(), "activation failed"),
                }
                true
            }
        }
    }

    pub fn on_key(&mut self, code: &str, shift: bool) -> bool {
        match NavEvent::from_key(code, shift) {
            Some(event) => self.handle(event),
            None => false,
        }
    }

    pub fn select_tab(&mut self, tab: &str) -> bool {
        self.handle(NavEvent::SelectTab(tab.to_string()))
    }

    pub fn launch(&mut self, item: &ListItem) -> LaunchResult {
        let result = self.launcher.launch(item, self.store.as_mut());
        self.after_launch(result)
    }

    pub fn launch_key(&mut self, key: &ProfileKey) -> Result<PostLaunchAction, SessionError> {
        let item = self
            .repository
            .iter()
            .find(|item| item.is_key(key))
            .cloned()
            .ok_or_else(|| SessionError::ProfileNotFound(key.clone()))?;
        Ok(self.launch(&item)?)
    }

    /// Icon file recorded for `key` at discovery time.
    pub fn icon_path(&self, key: &ProfileKey) -> Result<PathBuf, SessionError> {
        if !self.repository.iter().any(|item| item.is_key(key)) {
            return Err(SessionError::ProfileNotFound(key.clone()));
        }
        let profiles = self.repository.iter().map(|item| &item.profile);
        icon_path(profiles, &key.browser, &key.directory)
            .ok_or_else(|| SessionError::IconNotFound(key.clone()))
    }

    /// Delivers the result of an executor call the host ran on its own.
    pub fn complete_launch(&mut self, item: &ListItem, result: Result<(), String>) -> LaunchResult {
        let result = self.launcher.complete(item, result, self.store.as_mut());
        self.after_launch(result)
    }

    pub fn add_collection(&mut self, name: &str) -> Result<String, SessionError> {
        let name = self.store.add_collection(name)?;
        self.reload_collections()?;
        Ok(name)
    }

    pub fn remove_collection(&mut self, name: &str) -> Result<(), SessionError> {
        self.store.remove_collection(name)?;
        // The navigator leaves the tab while it is still listed.
        self.navigator
            .handle(NavEvent::CollectionRemoved(name.to_string()), &self.lists);
        self.reload_collections()
    }

    pub fn set_membership(
        &mut self,
        name: &str,
        key: &ProfileKey,
        member: bool,
    ) -> Result<(), SessionError> {
        self.store.set_membership(name, key, member)?;
        self.reload_collections()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn tabs(&self) -> Vec<String> {
        self.lists.tab_names()
    }

    pub fn lists(&self) -> &ComposedLists {
        &self.lists
    }

    pub fn current_tab(&self) -> &str {
        self.navigator.current_tab()
    }

    pub fn focus(&self) -> usize {
        self.navigator.focus()
    }

    pub fn focused_item(&self) -> Option<&ListItem> {
        self.navigator.focused_item(&self.lists)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn history(&self) -> &[ProfileKey] {
        &self.history
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    pub fn repository(&self) -> &[ListItem] {
        &self.repository
    }

    pub fn labels(&self) -> Labels {
        self.labels
    }

    fn after_launch(&mut self, result: LaunchResult) -> LaunchResult {
        match &result {
            Ok(_) => {
                self.error_message = None;
                match self.store.history() {
                    Ok(history) => self.history = history,
                    Err(error) => tracing::warn!(%error, "failed to reload history"),
                }
                self.recompose();
            }
            Err(LaunchError::Failed(message)) => {
                self.error_message = Some(message.clone());
            }
        }
        result
    }

    fn reload_collections(&mut self) -> Result<(), SessionError> {
        self.collections = self.store.collections()?;
        self.recompose();
        Ok(())
    }

    fn recompose(&mut self) {
        self.lists = compose(&self.repository, &self.query, &self.collections, &self.history);
        self.navigator.reconcile(&self.lists);
    }
}

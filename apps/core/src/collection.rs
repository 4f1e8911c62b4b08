use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::history::map_keys;
use crate::model::{ListItem, ProfileKey};

pub const TAB_ALL: &str = "all";
pub const TAB_HISTORY: &str = "history";
pub const RESERVED_TABS: [&str; 2] = [TAB_ALL, TAB_HISTORY];

pub fn is_reserved_tab(name: &str) -> bool {
    RESERVED_TABS.contains(&name)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("collection name is empty")]
    EmptyName,
    #[error("collection name is reserved: {0}")]
    Reserved(String),
    #[error("collection already exists: {0}")]
    Duplicate(String),
    #[error("collection not found: {0}")]
    NotFound(String),
}

/// Snapshot of the user collections: names in creation order and the member
/// keys of each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collections {
    names: Vec<String>,
    members: BTreeMap<String, BTreeSet<ProfileKey>>,
}

impl Collections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn members_of(&self, name: &str) -> Option<&BTreeSet<ProfileKey>> {
        self.members.get(name)
    }

    /// Names of the collections `key` belongs to, in tab order.
    pub fn collections_of(&self, key: &ProfileKey) -> Vec<String> {
        self.names
            .iter()
            .filter(|name| {
                self.members
                    .get(name.as_str())
                    .is_some_and(|members| members.contains(key))
            })
            .cloned()
            .collect()
    }

    pub fn add(&mut self, name: &str) -> Result<String, CollectionError> {
        let name = validate_name(name)?;
        if self.contains(&name) {
            return Err(CollectionError::Duplicate(name));
        }
        self.names.push(name.clone());
        self.members.insert(name.clone(), BTreeSet::new());
        Ok(name)
    }

    pub fn remove(&mut self, name: &str) -> Result<(), CollectionError> {
        if !self.contains(name) {
            return Err(CollectionError::NotFound(name.to_string()));
        }
        self.names.retain(|existing| existing != name);
        self.members.remove(name);
        Ok(())
    }

    pub fn set_membership(
        &mut self,
        name: &str,
        key: ProfileKey,
        member: bool,
    ) -> Result<(), CollectionError> {
        let members = self
            .members
            .get_mut(name)
            .ok_or_else(|| CollectionError::NotFound(name.to_string()))?;
        if member {
            members.insert(key);
        } else {
            members.remove(&key);
        }
        Ok(())
    }
}

/// Trims `name` and rejects empty or reserved collection names.
pub fn validate_name(name: &str) -> Result<String, CollectionError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CollectionError::EmptyName);
    }
    if is_reserved_tab(trimmed) {
        return Err(CollectionError::Reserved(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Items that belong to collection `name`. Unknown collections resolve to an
/// empty list.
pub fn resolve_collection(items: &[ListItem], name: &str, collections: &Collections) -> Vec<ListItem> {
    let Some(members) = collections.members_of(name) else {
        return Vec::new();
    };
    let keys: Vec<ProfileKey> = members.iter().cloned().collect();
    map_keys(items, &keys)
}

/// Stable sort by browser, then directory.
pub fn sort_items(mut items: Vec<ListItem>) -> Vec<ListItem> {
    items.sort_by(|a, b| {
        a.profile
            .browser
            .cmp(&b.profile.browser)
            .then_with(|| a.profile.directory.cmp(&b.profile.directory))
    });
    items
}

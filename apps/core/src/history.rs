use crate::model::{ListItem, ProfileKey};

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Launch history, most recent first, without duplicate keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    keys: Vec<ProfileKey>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            keys: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn from_keys(keys: Vec<ProfileKey>, limit: usize) -> Self {
        let mut history = Self::with_limit(limit);
        for key in keys.into_iter().rev() {
            history.add(key);
        }
        history
    }

    /// Moves `key` to the front, inserting it if absent.
    pub fn add(&mut self, key: ProfileKey) {
        self.keys.retain(|existing| existing != &key);
        self.keys.insert(0, key);
        self.keys.truncate(self.limit);
    }

    pub fn keys(&self) -> &[ProfileKey] {
        &self.keys
    }
}

/// Items listed in `keys` order. Keys without a matching item are skipped.
pub fn map_keys(items: &[ListItem], keys: &[ProfileKey]) -> Vec<ListItem> {
    keys.iter()
        .filter_map(|key| items.iter().find(|item| item.is_key(key)))
        .cloned()
        .collect()
}

pub fn map_to_history_view(items: &[ListItem], history_keys: &[ProfileKey]) -> Vec<ListItem> {
    map_keys(items, history_keys)
}

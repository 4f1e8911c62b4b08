use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Identity of a launchable profile. History and collection membership are
/// keyed by this pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProfileKey {
    pub browser: String,
    pub directory: String,
}

impl ProfileKey {
    pub fn new(browser: &str, directory: &str) -> Self {
        Self {
            browser: browser.to_string(),
            directory: directory.to_string(),
        }
    }
}

impl Display for ProfileKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.browser, self.directory)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub browser: String,
    pub directory: String,
    pub name: String,
    #[serde(default)]
    pub ico_path: Option<PathBuf>,
}

impl Profile {
    pub fn new(browser: &str, directory: &str, name: &str) -> Self {
        Self {
            browser: browser.to_string(),
            directory: directory.to_string(),
            name: name.to_string(),
            ico_path: None,
        }
    }

    pub fn with_icon(mut self, ico_path: PathBuf) -> Self {
        self.ico_path = Some(ico_path);
        self
    }

    pub fn key(&self) -> ProfileKey {
        ProfileKey::new(&self.browser, &self.directory)
    }
}

/// One row of a tab. Wraps the profile it was derived from together with the
/// text the query filter matches against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub profile: Profile,
    search_text: String,
}

impl ListItem {
    pub fn new(profile: Profile) -> Self {
        let search_text = normalize_for_search(&format!(
            "{} {} {}",
            profile.browser, profile.directory, profile.name
        ));
        Self {
            profile,
            search_text,
        }
    }

    pub fn key(&self) -> ProfileKey {
        self.profile.key()
    }

    pub fn is_key(&self, key: &ProfileKey) -> bool {
        self.profile.browser == key.browser && self.profile.directory == key.directory
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }
}

impl From<Profile> for ListItem {
    fn from(value: Profile) -> Self {
        Self::new(value)
    }
}

pub fn normalize_for_search(input: &str) -> String {
    input.trim().to_lowercase()
}

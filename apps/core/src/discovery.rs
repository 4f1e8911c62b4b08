use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::BrowserConfig;
use crate::model::Profile;

const PREFERENCES_FILE: &str = "Preferences";
const PROFILE_ICON_FILE: &str = "Google Profile.ico";
const SKIPPED_PROFILE_DIRS: [&str; 2] = ["System Profile", "Guest Profile"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Supplies the launchable profiles. Loaded once at startup.
pub trait ProfileSource {
    fn provider_name(&self) -> &'static str;
    fn load_all(&self) -> Result<Vec<Profile>, ProviderError>;
}

pub struct StaticProfileSource {
    profiles: Vec<Profile>,
}

impl StaticProfileSource {
    pub fn from_profiles(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn deterministic_fixture() -> Self {
        Self {
            profiles: vec![
                Profile::new("chrome", "Default", "Personal"),
                Profile::new("chrome", "Profile 1", "Work"),
                Profile::new("edge", "Default", "Edge"),
            ],
        }
    }
}

impl ProfileSource for StaticProfileSource {
    fn provider_name(&self) -> &'static str {
        "static"
    }

    fn load_all(&self) -> Result<Vec<Profile>, ProviderError> {
        Ok(self.profiles.clone())
    }
}

/// Finds Chromium-style profiles (`Default`, `Profile 1`, ...) in each
/// configured browser's user data directory.
pub struct BrowserProfileSource {
    browsers: Vec<BrowserConfig>,
}

impl BrowserProfileSource {
    pub fn new(browsers: Vec<BrowserConfig>) -> Self {
        Self { browsers }
    }
}

impl ProfileSource for BrowserProfileSource {
    fn provider_name(&self) -> &'static str {
        "browser"
    }

    fn load_all(&self) -> Result<Vec<Profile>, ProviderError> {
        let mut profiles = Vec::new();
        for browser in &self.browsers {
            if !browser.user_data_dir.is_dir() {
                tracing::debug!(
                    browser = %browser.name,
                    dir = %browser.user_data_dir.display(),
                    "user data dir missing; skipping"
                );
                continue;
            }
            profiles.extend(discover_browser_profiles(&browser.name, &browser.user_data_dir)?);
        }
        profiles.sort_by(|a, b| a.key().cmp(&b.key()));
        Ok(profiles)
    }
}

pub fn discover_browser_profiles(
    browser: &str,
    user_data_dir: &Path,
) -> Result<Vec<Profile>, ProviderError> {
    let mut profiles = Vec::new();
    for entry in WalkDir::new(user_data_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            ProviderError::new(format!(
                "failed to read {}: {e}",
                user_data_dir.display()
            ))
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let Some(directory) = entry.file_name().to_str() else {
            continue;
        };
        if SKIPPED_PROFILE_DIRS.contains(&directory) {
            continue;
        }

        let profile_dir = entry.path();
        let preferences = profile_dir.join(PREFERENCES_FILE);
        if !preferences.is_file() {
            continue;
        }

        let name = read_profile_name(&preferences).unwrap_or_else(|| directory.to_string());
        let mut profile = Profile::new(browser, directory, &name);
        let icon = profile_dir.join(PROFILE_ICON_FILE);
        if icon.is_file() {
            profile = profile.with_icon(icon);
        }
        profiles.push(profile);
    }
    Ok(profiles)
}

fn read_profile_name(preferences: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(preferences).ok()?;
    let value: serde_json::Value = serde_json::from_str(&raw).ok()?;
    value
        .get("profile")?
        .get("name")?
        .as_str()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Icon file of the profile identified by `browser` and `directory`.
pub fn icon_path<'a>(
    profiles: impl IntoIterator<Item = &'a Profile>,
    browser: &str,
    directory: &str,
) -> Option<PathBuf> {
    profiles
        .into_iter()
        .find(|profile| profile.browser == browser && profile.directory == directory)
        .and_then(|profile| profile.ico_path.clone())
}

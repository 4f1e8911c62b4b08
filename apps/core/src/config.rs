use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::DEFAULT_HISTORY_LIMIT;

const APP_DIR_NAME: &str = "profile-launcher";
const CONFIG_FILE_NAME: &str = "config.json";
const DB_FILE_NAME: &str = "launcher.sqlite3";
pub const DEV_MODE_ENV: &str = "PROFILE_LAUNCHER_DEV";
pub const MAX_HISTORY_LIMIT: usize = 500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json5 config: {0}")]
    Json5(#[from] json5::Error),
    #[error("invalid toml config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to encode toml config: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("failed to encode json config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

/// What the window does after a profile launched successfully.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorAfterLaunch {
    #[default]
    None,
    Minimize,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    pub name: String,
    pub executable: PathBuf,
    pub user_data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub behavior_after_launch: BehaviorAfterLaunch,
    pub dev_mode: bool,
    pub language: String,
    pub history_limit: usize,
    pub db_path: PathBuf,
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Set from `PROFILE_LAUNCHER_DEV` at load time. Never written back.
    #[serde(skip)]
    pub dev_mode_from_env: bool,
    pub browsers: Vec<BrowserConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let base = stable_app_data_dir();
        Self {
            behavior_after_launch: BehaviorAfterLaunch::None,
            dev_mode: false,
            language: "en".to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            db_path: base.join(DB_FILE_NAME),
            config_path: base.join(CONFIG_FILE_NAME),
            dev_mode_from_env: false,
            browsers: default_browsers(),
        }
    }
}

impl Config {
    pub fn browser(&self, name: &str) -> Option<&BrowserConfig> {
        self.browsers.iter().find(|browser| browser.name == name)
    }

    /// Dev mode from the file or the environment.
    pub fn effective_dev_mode(&self) -> bool {
        self.dev_mode || self.dev_mode_from_env
    }
}

pub fn stable_app_data_dir() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

pub fn default_config_path() -> PathBuf {
    stable_app_data_dir().join(CONFIG_FILE_NAME)
}

/// Loads the config at `path` (or the default location). A missing file
/// yields defaults bound to that path.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    let mut cfg = if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path)?;
        parse(&raw, is_toml(&config_path))?
    } else {
        Config::default()
    };
    cfg.config_path = config_path;
    apply_env_overrides(&mut cfg);
    validate(&cfg)?;
    Ok(cfg)
}

pub fn parse(raw: &str, toml_format: bool) -> Result<Config, ConfigError> {
    if toml_format {
        Ok(toml::from_str(raw)?)
    } else {
        Ok(json5::from_str(raw)?)
    }
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = cfg.config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let encoded = if is_toml(&cfg.config_path) {
        toml::to_string_pretty(cfg)?
    } else {
        serde_json::to_string_pretty(cfg)?
    };
    std::fs::write(&cfg.config_path, encoded)?;
    Ok(())
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.history_limit == 0 || cfg.history_limit > MAX_HISTORY_LIMIT {
        return Err(ConfigError::Invalid(format!(
            "history_limit must be between 1 and {MAX_HISTORY_LIMIT}"
        )));
    }

    if cfg.db_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("db_path is required".into()));
    }

    if cfg.config_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("config_path is required".into()));
    }

    let mut seen = BTreeSet::new();
    for browser in &cfg.browsers {
        let name = browser.name.trim();
        if name.is_empty() {
            return Err(ConfigError::Invalid("browser name is required".into()));
        }
        if !seen.insert(name) {
            return Err(ConfigError::Invalid(format!("duplicate browser: {name}")));
        }
    }

    Ok(())
}

fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(value) = std::env::var(DEV_MODE_ENV) {
        if value == "1" || value.eq_ignore_ascii_case("true") {
            cfg.dev_mode_from_env = true;
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

#[cfg(target_os = "windows")]
fn default_browsers() -> Vec<BrowserConfig> {
    let local = dirs_next::data_local_dir().unwrap_or_default();
    vec![
        BrowserConfig {
            name: "chrome".to_string(),
            executable: PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
            user_data_dir: local.join(r"Google\Chrome\User Data"),
        },
        BrowserConfig {
            name: "edge".to_string(),
            executable: PathBuf::from(
                r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe",
            ),
            user_data_dir: local.join(r"Microsoft\Edge\User Data"),
        },
    ]
}

#[cfg(target_os = "macos")]
fn default_browsers() -> Vec<BrowserConfig> {
    let data = dirs_next::data_dir().unwrap_or_default();
    vec![BrowserConfig {
        name: "chrome".to_string(),
        executable: PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
        user_data_dir: data.join("Google/Chrome"),
    }]
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn default_browsers() -> Vec<BrowserConfig> {
    let config = dirs_next::config_dir().unwrap_or_default();
    vec![BrowserConfig {
        name: "chrome".to_string(),
        executable: PathBuf::from("google-chrome"),
        user_data_dir: config.join("google-chrome"),
    }]
}

use std::path::PathBuf;

use profile_launcher_core::config::{self, BehaviorAfterLaunch, BrowserConfig, Config};

#[test]
fn default_config_is_valid() {
    let cfg = Config::default();
    assert_eq!(cfg.behavior_after_launch, BehaviorAfterLaunch::None);
    assert!(!cfg.dev_mode);
    assert_eq!(cfg.history_limit, 100);
    assert!(cfg.db_path.to_string_lossy().contains("profile-launcher"));
    assert!(config::validate(&cfg).is_ok());
}

#[test]
fn rejects_out_of_range_history_limit() {
    let cfg = Config {
        history_limit: 0,
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());

    let cfg = Config {
        history_limit: 501,
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn rejects_duplicate_browser_names() {
    let browser = BrowserConfig {
        name: "chrome".to_string(),
        executable: PathBuf::from("google-chrome"),
        user_data_dir: PathBuf::from("/tmp/chrome"),
    };
    let cfg = Config {
        browsers: vec![browser.clone(), browser],
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn missing_file_yields_defaults_bound_to_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let cfg = config::load(Some(&path)).unwrap();

    assert_eq!(cfg.config_path, path);
    assert_eq!(cfg.history_limit, 100);
}

#[test]
fn loads_json5_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            // close the launcher after opening a profile
            behavior_after_launch: "close",
            language: "ja",
            browsers: [
                { name: "chrome", executable: "google-chrome", user_data_dir: "/tmp/chrome" },
            ],
        }"#,
    )
    .unwrap();

    let cfg = config::load(Some(&path)).unwrap();

    assert_eq!(cfg.behavior_after_launch, BehaviorAfterLaunch::Close);
    assert_eq!(cfg.language, "ja");
    assert_eq!(cfg.browsers.len(), 1);
    assert!(cfg.browser("chrome").is_some());
    assert!(cfg.browser("edge").is_none());
}

#[test]
fn saved_toml_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config {
        behavior_after_launch: BehaviorAfterLaunch::Minimize,
        history_limit: 25,
        config_path: dir.path().join("launcher.toml"),
        ..Default::default()
    };
    config::save(&cfg).unwrap();

    let raw = std::fs::read_to_string(&cfg.config_path).unwrap();
    assert!(raw.contains("behavior_after_launch = \"minimize\""));

    let loaded = config::load(Some(&cfg.config_path)).unwrap();
    assert_eq!(loaded.behavior_after_launch, BehaviorAfterLaunch::Minimize);
    assert_eq!(loaded.history_limit, 25);
}

#[test]
fn invalid_file_reports_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ history_limit: ").unwrap();

    assert!(matches!(
        config::load(Some(&path)),
        Err(config::ConfigError::Json5(_))
    ));
}

#[test]
fn env_dev_mode_is_not_written_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    std::env::set_var(config::DEV_MODE_ENV, "1");
    let cfg = config::load(Some(&path)).unwrap();
    std::env::remove_var(config::DEV_MODE_ENV);
    assert!(cfg.effective_dev_mode());
    assert!(!cfg.dev_mode);

    config::save(&cfg).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"dev_mode\": false"));
    assert!(!raw.contains("dev_mode_from_env"));

    let reloaded = config::load(Some(&path)).unwrap();
    assert!(!reloaded.dev_mode);
    assert!(!reloaded.effective_dev_mode());
}

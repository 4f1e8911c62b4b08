use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::config::BrowserConfig;
use crate::launch::LaunchExecutor;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("unknown browser: {0}")]
    UnknownBrowser(String),
    #[error("empty profile directory")]
    EmptyDirectory,
    #[error("browser executable does not exist: {}", .0.display())]
    MissingExecutable(PathBuf),
    #[error("failed to start {browser}: {message}")]
    Spawn { browser: String, message: String },
}

pub fn profile_args(directory: &str) -> Vec<String> {
    vec![format!("--profile-directory={directory}")]
}

/// Starts the configured browser executable with the profile directory flag.
pub struct CommandExecutor {
    browsers: Vec<BrowserConfig>,
}

impl CommandExecutor {
    pub fn new(browsers: Vec<BrowserConfig>) -> Self {
        Self { browsers }
    }

    pub fn command_for(&self, browser: &str, directory: &str) -> Result<Command, ExecError> {
        let config = self
            .browsers
            .iter()
            .find(|candidate| candidate.name == browser)
            .ok_or_else(|| ExecError::UnknownBrowser(browser.to_string()))?;

        if directory.trim().is_empty() {
            return Err(ExecError::EmptyDirectory);
        }

        // Bare names are resolved through PATH by the OS.
        if config.executable.is_absolute() && !config.executable.exists() {
            return Err(ExecError::MissingExecutable(config.executable.clone()));
        }

        let mut command = Command::new(&config.executable);
        command
            .args(profile_args(directory))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        Ok(command)
    }

    pub fn spawn(&self, browser: &str, directory: &str) -> Result<(), ExecError> {
        let mut command = self.command_for(browser, directory)?;
        command.spawn().map_err(|e| ExecError::Spawn {
            browser: browser.to_string(),
            message: e.to_string(),
        })?;
        tracing::info!(browser, directory, "browser process started");
        Ok(())
    }
}

impl LaunchExecutor for CommandExecutor {
    fn execute(&mut self, browser: &str, directory: &str) -> Result<(), String> {
        self.spawn(browser, directory).map_err(|e| e.to_string())
    }
}

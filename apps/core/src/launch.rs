use thiserror::Error;

use crate::config::{BehaviorAfterLaunch, Config};
use crate::model::ListItem;
use crate::store::HistoryStore;

/// Starts a browser profile. An `Err` carries a message meant for display.
pub trait LaunchExecutor {
    fn execute(&mut self, browser: &str, directory: &str) -> Result<(), String>;
}

pub trait WindowControl {
    fn minimize(&mut self);
    fn terminate(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopWindow;

impl WindowControl for NoopWindow {
    fn minimize(&mut self) {}
    fn terminate(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostLaunchAction {
    None,
    Minimize,
    Terminate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("{0}")]
    Failed(String),
}

pub type LaunchResult = Result<PostLaunchAction, LaunchError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaunchPolicy {
    pub behavior: BehaviorAfterLaunch,
    pub dev_mode: bool,
}

impl LaunchPolicy {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            behavior: cfg.behavior_after_launch,
            dev_mode: cfg.effective_dev_mode(),
        }
    }

    /// Development mode never minimizes or quits.
    pub fn post_launch_action(&self) -> PostLaunchAction {
        if self.dev_mode {
            return PostLaunchAction::None;
        }
        match self.behavior {
            BehaviorAfterLaunch::None => PostLaunchAction::None,
            BehaviorAfterLaunch::Minimize => PostLaunchAction::Minimize,
            BehaviorAfterLaunch::Close => PostLaunchAction::Terminate,
        }
    }
}

pub struct LaunchCoordinator {
    executor: Box<dyn LaunchExecutor>,
    window: Box<dyn WindowControl>,
    policy: LaunchPolicy,
}

impl LaunchCoordinator {
    pub fn new(
        executor: Box<dyn LaunchExecutor>,
        window: Box<dyn WindowControl>,
        policy: LaunchPolicy,
    ) -> Self {
        Self {
            executor,
            window,
            policy,
        }
    }

    pub fn policy(&self) -> LaunchPolicy {
        self.policy
    }

    pub fn launch<H>(&mut self, item: &ListItem, history: &mut H) -> LaunchResult
    where
        H: HistoryStore + ?Sized,
    {
        let profile = &item.profile;
        tracing::debug!(browser = %profile.browser, directory = %profile.directory, "launching profile");
        let result = self.executor.execute(&profile.browser, &profile.directory);
        self.complete(item, result, history)
    }

    /// Applies the outcome of an executor call made elsewhere. An empty error
    /// message counts as success.
    pub fn complete<H>(
        &mut self,
        item: &ListItem,
        result: Result<(), String>,
        history: &mut H,
    ) -> LaunchResult
    where
        H: HistoryStore + ?Sized,
    {
        if let Err(message) = result {
            if !message.trim().is_empty() {
                tracing::warn!(key = %item.key(), error = %message, "launch failed");
                return Err(LaunchError::Failed(message));
            }
        }

        if let Err(error) = history.add_history(&item.key()) {
            tracing::warn!(key = %item.key(), %error, "failed to record launch history");
        }

        let action = self.policy.post_launch_action();
        match action {
            PostLaunchAction::None => {}
            PostLaunchAction::Minimize => self.window.minimize(),
            PostLaunchAction::Terminate => self.window.terminate(),
        }
        Ok(action)
    }
}

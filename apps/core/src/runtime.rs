use std::cell::Cell;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::action_executor::CommandExecutor;
use crate::config::{self, Config, ConfigError};
use crate::discovery::BrowserProfileSource;
use crate::labels::Labels;
use crate::launch::{LaunchCoordinator, LaunchPolicy, WindowControl};
use crate::model::ProfileKey;
use crate::session::{LauncherSession, SessionError};
use crate::store::{SqliteStore, StoreError};
use crate::transport::handle_json;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "profile-launcher", about = "Launch browser profiles from a searchable list")]
pub struct Cli {
    /// Config file (`.json`/`.json5` or `.toml`).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the items of a tab.
    List {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        tab: Option<String>,
    },
    /// Launch a profile and record it in the history.
    Launch { browser: String, directory: String },
    /// Print the icon file of a profile.
    Icon { browser: String, directory: String },
    /// Print the launch history, most recent first.
    History,
    #[command(subcommand)]
    Collection(CollectionCommand),
    /// Answer JSON requests read line by line from stdin.
    Serve,
}

#[derive(Debug, Subcommand)]
pub enum CollectionCommand {
    Add {
        name: String,
    },
    Remove {
        name: String,
    },
    Assign {
        name: String,
        browser: String,
        directory: String,
        #[arg(long)]
        remove: bool,
    },
}

/// Records window requests from the launch coordinator. The CLI has no
/// window, so minimizing is only logged and terminating stops `serve`.
struct CliWindow {
    terminate_requested: Rc<Cell<bool>>,
}

impl WindowControl for CliWindow {
    fn minimize(&mut self) {
        tracing::info!("minimize requested");
    }

    fn terminate(&mut self) {
        tracing::info!("terminate requested");
        self.terminate_requested.set(true);
    }
}

pub fn run(cli: Cli) -> Result<(), RuntimeError> {
    let cfg = config::load(cli.config.as_deref())?;
    if !cfg.config_path.exists() {
        config::save(&cfg)?;
        tracing::info!(path = %cfg.config_path.display(), "wrote default config");
    }

    let terminate_requested = Rc::new(Cell::new(false));
    let mut session = build_session(&cfg, Rc::clone(&terminate_requested))?;
    let source = BrowserProfileSource::new(cfg.browsers.clone());
    let loaded = session.load_from(&source);
    tracing::info!(
        dev_mode = cfg.effective_dev_mode(),
        profiles = loaded,
        config_path = %cfg.config_path.display(),
        db_path = %cfg.db_path.display(),
        "startup"
    );

    match cli.command {
        Command::List { query, tab } => {
            if let Some(query) = query {
                session.set_query(&query);
            }
            if let Some(tab) = tab {
                if !session.select_tab(&tab) {
                    eprintln!("unknown tab: {tab}");
                }
            }
            print_current_tab(&session);
        }
        Command::Launch { browser, directory } => {
            let key = ProfileKey::new(&browser, &directory);
            session.launch_key(&key)?;
            println!("launched {key}");
        }
        Command::Icon { browser, directory } => {
            let key = ProfileKey::new(&browser, &directory);
            println!("{}", session.icon_path(&key)?.display());
        }
        Command::History => {
            for key in session.history() {
                println!("{}\t{}", key.browser, key.directory);
            }
        }
        Command::Collection(command) => run_collection(&mut session, command)?,
        Command::Serve => serve(&mut session, &terminate_requested)?,
    }
    Ok(())
}

pub fn build_session(
    cfg: &Config,
    terminate_requested: Rc<Cell<bool>>,
) -> Result<LauncherSession, RuntimeError> {
    let store = SqliteStore::open_from_config(cfg)?;
    let launcher = LaunchCoordinator::new(
        Box::new(CommandExecutor::new(cfg.browsers.clone())),
        Box::new(CliWindow {
            terminate_requested,
        }),
        LaunchPolicy::from_config(cfg),
    );
    Ok(LauncherSession::new(
        Box::new(store),
        launcher,
        Labels::for_code(&cfg.language),
    )?)
}

fn run_collection(
    session: &mut LauncherSession,
    command: CollectionCommand,
) -> Result<(), RuntimeError> {
    match command {
        CollectionCommand::Add { name } => {
            let name = session.add_collection(&name)?;
            println!("added collection {name}");
        }
        CollectionCommand::Remove { name } => {
            session.remove_collection(&name)?;
            println!("removed collection {name}");
        }
        CollectionCommand::Assign {
            name,
            browser,
            directory,
            remove,
        } => {
            let key = ProfileKey::new(&browser, &directory);
            session.set_membership(&name, &key, !remove)?;
        }
    }
    Ok(())
}

fn serve(session: &mut LauncherSession, terminate_requested: &Cell<bool>) -> Result<(), RuntimeError> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_json(session, &line);
        writeln!(stdout, "{response}")?;
        stdout.flush()?;
        if terminate_requested.get() {
            tracing::info!("serve loop finished after terminate request");
            break;
        }
    }
    Ok(())
}

fn print_current_tab(session: &LauncherSession) {
    let labels = session.labels();
    let tab = session.current_tab();
    println!("[{}]", labels.label(tab));
    if let Some(error) = session.error_message() {
        println!("! {error}");
    }
    let items = session.lists().get(tab).unwrap_or_default();
    for (index, item) in items.iter().enumerate() {
        let marker = if index == session.focus() { ">" } else { " " };
        println!(
            "{marker} {}\t{}\t{}",
            item.profile.browser, item.profile.directory, item.profile.name
        );
    }
}

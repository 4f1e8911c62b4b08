use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::collection::{validate_name, CollectionError, Collections};
use crate::config::Config;
use crate::history::History;
use crate::model::ProfileKey;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

pub trait HistoryStore {
    /// Keys most recent first.
    fn history(&self) -> Result<Vec<ProfileKey>, StoreError>;
    /// Front-inserts `key`, moving it if already present.
    fn add_history(&mut self, key: &ProfileKey) -> Result<(), StoreError>;
}

pub trait CollectionStore {
    fn collections(&self) -> Result<Collections, StoreError>;
    fn add_collection(&mut self, name: &str) -> Result<String, StoreError>;
    fn remove_collection(&mut self, name: &str) -> Result<(), StoreError>;
    fn set_membership(
        &mut self,
        name: &str,
        key: &ProfileKey,
        member: bool,
    ) -> Result<(), StoreError>;
}

pub trait LauncherStore: HistoryStore + CollectionStore {}

impl<T: HistoryStore + CollectionStore> LauncherStore for T {}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    history: History,
    collections: Collections,
}

impl MemoryStore {
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history: History::with_limit(limit),
            collections: Collections::new(),
        }
    }
}

impl HistoryStore for MemoryStore {
    fn history(&self) -> Result<Vec<ProfileKey>, StoreError> {
        Ok(self.history.keys().to_vec())
    }

    fn add_history(&mut self, key: &ProfileKey) -> Result<(), StoreError> {
        self.history.add(key.clone());
        Ok(())
    }
}

impl CollectionStore for MemoryStore {
    fn collections(&self) -> Result<Collections, StoreError> {
        Ok(self.collections.clone())
    }

    fn add_collection(&mut self, name: &str) -> Result<String, StoreError> {
        Ok(self.collections.add(name)?)
    }

    fn remove_collection(&mut self, name: &str) -> Result<(), StoreError> {
        Ok(self.collections.remove(name)?)
    }

    fn set_membership(
        &mut self,
        name: &str,
        key: &ProfileKey,
        member: bool,
    ) -> Result<(), StoreError> {
        Ok(self.collections.set_membership(name, key.clone(), member)?)
    }
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS history (
    browser TEXT NOT NULL,
    directory TEXT NOT NULL,
    seq INTEGER NOT NULL,
    PRIMARY KEY (browser, directory)
);
CREATE TABLE IF NOT EXISTS collection (
    name TEXT PRIMARY KEY,
    position INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS collection_member (
    name TEXT NOT NULL,
    browser TEXT NOT NULL,
    directory TEXT NOT NULL,
    PRIMARY KEY (name, browser, directory)
);
";

pub struct SqliteStore {
    db: Connection,
    history_limit: usize,
}

impl SqliteStore {
    pub fn open_memory(history_limit: usize) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, history_limit)
    }

    pub fn open_file(path: &Path, history_limit: usize) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::with_connection(Connection::open(path)?, history_limit)
    }

    pub fn open_from_config(cfg: &Config) -> Result<Self, StoreError> {
        Self::open_file(&cfg.db_path, cfg.history_limit)
    }

    pub fn with_connection(db: Connection, history_limit: usize) -> Result<Self, StoreError> {
        db.execute_batch(SCHEMA)?;
        Ok(Self {
            db,
            history_limit: history_limit.max(1),
        })
    }

    fn collection_exists(&self, name: &str) -> Result<bool, StoreError> {
        let found = self
            .db
            .query_row(
                "SELECT 1 FROM collection WHERE name = ?1",
                params![name],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl HistoryStore for SqliteStore {
    fn history(&self) -> Result<Vec<ProfileKey>, StoreError> {
        let mut stmt = self
            .db
            .prepare("SELECT browser, directory FROM history ORDER BY seq DESC")?;
        let rows = stmt.query_map([], |row| {
            Ok(ProfileKey {
                browser: row.get(0)?,
                directory: row.get(1)?,
            })
        })?;
        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }

    fn add_history(&mut self, key: &ProfileKey) -> Result<(), StoreError> {
        let tx = self.db.transaction()?;
        tx.execute(
            "INSERT INTO history (browser, directory, seq)
             VALUES (?1, ?2, (SELECT COALESCE(MAX(seq), 0) + 1 FROM history))
             ON CONFLICT(browser, directory) DO UPDATE SET seq = excluded.seq",
            params![key.browser, key.directory],
        )?;
        tx.execute(
            "DELETE FROM history WHERE seq NOT IN
             (SELECT seq FROM history ORDER BY seq DESC LIMIT ?1)",
            params![self.history_limit as i64],
        )?;
        tx.commit()?;
        Ok(())
    }
}

impl CollectionStore for SqliteStore {
    fn collections(&self) -> Result<Collections, StoreError> {
        let mut collections = Collections::new();

        let mut names = self
            .db
            .prepare("SELECT name FROM collection ORDER BY position ASC")?;
        let rows = names.query_map([], |row| row.get::<_, String>(0))?;
        for row in rows {
            collections.add(&row?)?;
        }

        let mut members = self
            .db
            .prepare("SELECT name, browser, directory FROM collection_member")?;
        let rows = members.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                ProfileKey {
                    browser: row.get(1)?,
                    directory: row.get(2)?,
                },
            ))
        })?;
        for row in rows {
            let (name, key) = row?;
            if collections.contains(&name) {
                collections.set_membership(&name, key, true)?;
            }
        }

        Ok(collections)
    }

    fn add_collection(&mut self, name: &str) -> Result<String, StoreError> {
        let name = validate_name(name)?;
        if self.collection_exists(&name)? {
            return Err(CollectionError::Duplicate(name).into());
        }
        self.db.execute(
            "INSERT INTO collection (name, position)
             VALUES (?1, (SELECT COALESCE(MAX(position), 0) + 1 FROM collection))",
            params![name],
        )?;
        Ok(name)
    }

    fn remove_collection(&mut self, name: &str) -> Result<(), StoreError> {
        if !self.collection_exists(name)? {
            return Err(CollectionError::NotFound(name.to_string()).into());
        }
        let tx = self.db.transaction()?;
        tx.execute("DELETE FROM collection_member WHERE name = ?1", params![name])?;
        tx.execute("DELETE FROM collection WHERE name = ?1", params![name])?;
        tx.commit()?;
        Ok(())
    }

    fn set_membership(
        &mut self,
        name: &str,
        key: &ProfileKey,
        member: bool,
    ) -> Result<(), StoreError> {
        if !self.collection_exists(name)? {
            return Err(CollectionError::NotFound(name.to_string()).into());
        }
        if member {
            self.db.execute(
                "INSERT OR IGNORE INTO collection_member (name, browser, directory)
                 VALUES (?1, ?2, ?3)",
                params![name, key.browser, key.directory],
            )?;
        } else {
            self.db.execute(
                "DELETE FROM collection_member
                 WHERE name = ?1 AND browser = ?2 AND directory = ?3",
                params![name, key.browser, key.directory],
            )?;
        }
        Ok(())
    }
}

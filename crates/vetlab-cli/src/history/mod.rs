//! `SQLite`-backed storage for the history blob.
//!
//! The engine persists the whole history as one JSON text under a single key;
//! this module provides that key-value slot in a local `SQLite` file.

use std::path::Path;

use anyhow::Context as _;
use rusqlite::{Connection, OptionalExtension as _};
use vetlab_engine::{BlobBackend, BlobHistoryStore};

/// Open or create the DB at `path`, running `CREATE TABLE IF NOT EXISTS` for the
/// key-value table.
///
/// # Errors
/// Returns an error if the directory cannot be created or the DB cannot be opened.
pub fn open_db(path: &Path) -> anyhow::Result<Connection> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create db dir {}", parent.display()))?;
    }
    let conn = Connection::open(path).with_context(|| format!("open db at {}", path.display()))?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )
    .context("create kv table")?;
    Ok(conn)
}

/// One `SQLite` connection used as a keyed text store.
pub struct SqliteBlob {
    conn: Connection,
}

impl SqliteBlob {
    pub const fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// # Errors
    /// See [`open_db`].
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        open_db(path).map(Self::new)
    }

    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl BlobBackend for SqliteBlob {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .with_context(|| format!("read blob {key}"))
    }

    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                rusqlite::params![key, value],
            )
            .with_context(|| format!("write blob {key}"))?;
        tracing::debug!(key, bytes = value.len(), "history blob written");
        Ok(())
    }
}

pub type SqliteHistoryStore = BlobHistoryStore<SqliteBlob>;

/// Open the history store kept in the DB at `path`.
///
/// # Errors
/// See [`open_db`].
pub fn open_store(path: &Path) -> anyhow::Result<SqliteHistoryStore> {
    SqliteBlob::open(path).map(BlobHistoryStore::new)
}

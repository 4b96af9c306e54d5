//! Persistent key-value slot contracts and implementations.
//!
//! # Responsibility
//! - Provide whole-value read/write access to named text slots.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Writes are full overwrites; there are no partial or append writes.
//! - `write_all` stores every entry or none of them.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Slot repository error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Slot content exists but cannot be decoded.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted slot data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for named persistent slots.
pub trait SlotRepository {
    /// Reads one slot. `Ok(None)` when the slot was never written.
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>>;
    /// Overwrites one slot.
    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.write_all(&[(key, value)])
    }
    /// Overwrites several slots atomically.
    fn write_all(&self, entries: &[(&str, &str)]) -> RepoResult<()>;
}

impl<T: SlotRepository + ?Sized> SlotRepository for &T {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_all(&self, entries: &[(&str, &str)]) -> RepoResult<()> {
        (**self).write_all(entries)
    }
}

/// SQLite-backed slot repository over the `kv_slots` table.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Fails with `InvalidData` when `kv_slots` is missing, which means the
    /// connection did not come from `open_db`/`open_db_in_memory`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'kv_slots'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::InvalidData(
                "required table `kv_slots` is missing".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_all(&self, entries: &[(&str, &str)]) -> RepoResult<()> {
        // Store is single-writer; an unchecked transaction lets us keep `&self`.
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO kv_slots (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%s', 'now') * 1000)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at;",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

/// Process-local slot repository for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySlotRepository {
    slots: RefCell<BTreeMap<String, String>>,
}

impl MemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository with one pre-populated slot.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let repo = Self::new();
        repo.slots.borrow_mut().insert(key.into(), value.into());
        repo
    }
}

impl SlotRepository for MemorySlotRepository {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write_all(&self, entries: &[(&str, &str)]) -> RepoResult<()> {
        let mut slots = self.slots.borrow_mut();
        for (key, value) in entries {
            slots.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }
}

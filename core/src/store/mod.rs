//! SQLite persistence layer.
//!
//! RULE: only the store talks to the database. The intake and
//! settlement services call store methods; they never execute SQL.

use crate::error::LedgerResult;
use rusqlite::Connection;

mod draw;
mod rates;
mod settlement;
mod ticket;

pub use settlement::LedgerEntryRow;

pub struct LedgerStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl LedgerStore {
    /// Open (or create) the ledger database at `path`.
    pub fn open(path: &str) -> LedgerResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> LedgerResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> LedgerResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

//! `SQLite` database connection and whole-database operations.
//!
//! The database is stored at `~/.pomoguard/pomoguard.db` by default and
//! contains the timer, cycle, site-visit, daily-stats and site-limit tables.

use std::path::Path;

use rusqlite::{Connection, DatabaseName};
use tracing::info;

use crate::error::StoreError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path.
    ///
    /// Creates the database file and bootstraps the schema if necessary.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the database cannot be opened or
    /// the schema cannot be created.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| {
            StoreError::Connection(format!("Failed to open database {}: {e}", path.display()))
        })?;

        info!(path = %path.display(), "Opened activity database");
        Self::init(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the database cannot be opened or
    /// the schema cannot be created.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            StoreError::Connection(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        // Enable foreign keys
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| StoreError::Connection(format!("Failed to enable foreign keys: {e}")))?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Bootstrap the schema. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns an error if a `CREATE` statement fails.
    pub fn migrate(&self) -> Result<(), StoreError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, StoreError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Serialize the whole main database into a byte image.
    ///
    /// The bytes are a complete `SQLite` database file and can be written
    /// to disk or loaded by any `SQLite` reader.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if serialization fails.
    pub fn export(&self) -> Result<Vec<u8>, StoreError> {
        let data = self
            .conn
            .serialize(DatabaseName::Main)
            .map_err(|e| StoreError::sqlite("Failed to export database", &e))?;

        Ok(data.to_vec())
    }
}

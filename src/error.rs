//! Error types for pomoguard.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors produced by the activity store and the CLI built on it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write violated a check, unique, foreign-key or not-null constraint.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// The database could not be opened or bootstrapped.
    #[error("connection error: {0}")]
    Connection(String),

    /// Any other database engine failure.
    #[error("database error: {0}")]
    Database(String),

    /// A requested row does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The process-wide store was already installed.
    #[error("activity store is already initialized")]
    AlreadyInitialized,

    /// Configuration could not be resolved, read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Input could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Classify a `rusqlite` error, keeping constraint failures distinct.
    pub(crate) fn sqlite(context: &str, err: &rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
                Self::SchemaViolation(format!("{context}: {err}"))
            }
            _ => Self::Database(format!("{context}: {err}")),
        }
    }

    /// Whether this error is a constraint failure.
    #[must_use]
    pub const fn is_schema_violation(&self) -> bool {
        matches!(self, Self::SchemaViolation(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_constraint_failure_is_schema_violation() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v TEXT NOT NULL CHECK(v IN ('a')))")
            .unwrap();

        let err = conn
            .execute("INSERT INTO t (v) VALUES ('b')", [])
            .unwrap_err();

        assert!(StoreError::sqlite("insert", &err).is_schema_violation());
    }

    #[test]
    fn test_other_failure_is_database_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.execute("SELECT * FROM missing", []).unwrap_err();

        let mapped = StoreError::sqlite("select", &err);
        assert!(matches!(mapped, StoreError::Database(_)));
        assert!(mapped.to_string().starts_with("database error: select"));
    }
}

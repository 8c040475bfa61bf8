//! Schema bootstrap for the activity database.
//!
//! Every statement is `CREATE ... IF NOT EXISTS`, so bootstrap runs on each
//! open without touching existing rows. The applied version is recorded in
//! `PRAGMA user_version`.

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::StoreError;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Tables created by the schema, in creation order.
pub const TABLES: [&str; 5] = [
    "timer_sessions",
    "completed_cycles",
    "site_visits",
    "daily_stats",
    "site_limits",
];

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, StoreError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StoreError::Connection(format!("Failed to get schema version: {e}")))
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), StoreError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| StoreError::Connection(format!("Failed to set schema version: {e}")))
}

/// Create any missing tables and record the schema version.
pub fn run(conn: &Connection) -> Result<(), StoreError> {
    let current = get_version(conn)?;

    create_schema(conn)?;

    if current < CURRENT_VERSION {
        info!(from = current, to = CURRENT_VERSION, "Initialized activity schema");
        set_version(conn, CURRENT_VERSION)?;
    } else {
        debug!(version = current, "Activity schema already present");
    }

    Ok(())
}

/// Creates tables for:
/// - `timer_sessions`: work and break timer runs
/// - `completed_cycles`: work sessions paired with their break
/// - `site_visits`: time spent on tracked websites
/// - `daily_stats`: one precomputed summary row per day
/// - `site_limits`: per-site daily allowance
fn create_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS timer_sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            start_time TEXT NOT NULL,
            end_time TEXT,
            duration_minutes INTEGER NOT NULL,
            kind TEXT NOT NULL CHECK(kind IN ('work', 'break')),
            preset_id TEXT,
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_timer_sessions_start
        ON timer_sessions(start_time);

        CREATE TABLE IF NOT EXISTS completed_cycles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            work_session_id INTEGER NOT NULL,
            break_session_id INTEGER,
            completed_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (work_session_id) REFERENCES timer_sessions(id),
            FOREIGN KEY (break_session_id) REFERENCES timer_sessions(id)
        );

        CREATE TABLE IF NOT EXISTS site_visits (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            site_url TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT,
            duration_seconds INTEGER,
            blocked INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_site_visits_site_start
        ON site_visits(site_url, start_time);

        CREATE TABLE IF NOT EXISTS daily_stats (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL UNIQUE,
            total_work_minutes INTEGER NOT NULL DEFAULT 0,
            total_break_minutes INTEGER NOT NULL DEFAULT 0,
            completed_cycles INTEGER NOT NULL DEFAULT 0,
            blocked_attempts INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS site_limits (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            site_url TEXT NOT NULL UNIQUE,
            daily_limit_minutes INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        ",
    )
    .map_err(|e| StoreError::Connection(format!("Schema bootstrap failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                 ORDER BY name",
            )
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn test_bootstrap_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        let mut expected: Vec<String> = TABLES.iter().map(ToString::to_string).collect();
        expected.sort();
        assert_eq!(table_names(&conn), expected);
    }

    #[test]
    fn test_bootstrap_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        conn.execute(
            "INSERT INTO daily_stats (date, total_work_minutes) VALUES ('2024-01-01', 50)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO site_limits (site_url, daily_limit_minutes) VALUES ('example.com', 30)",
            [],
        )
        .unwrap();

        let before = table_names(&conn);
        run(&conn).unwrap();

        assert_eq!(table_names(&conn), before);
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        let minutes: i64 = conn
            .query_row(
                "SELECT total_work_minutes FROM daily_stats WHERE date = '2024-01-01'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(minutes, 50);

        let limits: i64 = conn
            .query_row("SELECT COUNT(*) FROM site_limits", [], |row| row.get(0))
            .unwrap();
        assert_eq!(limits, 1);
    }

    #[test]
    fn test_kind_check_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO timer_sessions (start_time, duration_minutes, kind)
             VALUES ('2024-01-01 10:00:00', 25, 'lunch')",
            [],
        );
        let err = result.unwrap_err();
        assert!(StoreError::sqlite("insert", &err).is_schema_violation());
    }

    #[test]
    fn test_daily_stats_date_unique() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        conn.execute("INSERT INTO daily_stats (date) VALUES ('2024-01-01')", [])
            .unwrap();
        let err = conn
            .execute("INSERT INTO daily_stats (date) VALUES ('2024-01-01')", [])
            .unwrap_err();
        assert!(StoreError::sqlite("insert", &err).is_schema_violation());
    }

    #[test]
    fn test_get_version_new_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_version(&conn).unwrap(), 0);
    }
}

//! The activity store.
//!
//! One connection, one schema, one statement per operation. The store can
//! be used directly (tests, embedding) or installed as the process-wide
//! instance returned by [`ActivityStore::instance`].
//!
//! # Lifecycle
//!
//! The process-wide instance is created at most once. The first call to
//! [`ActivityStore::instance`] loads [`Config`], opens the database and
//! bootstraps the schema while holding an initialization guard, so racing
//! first callers block and then all see the same store. A host that wants
//! a custom path or clock calls [`ActivityStore::install`] during startup
//! instead. The installed store lives until process exit and its
//! connection is never replaced.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use once_cell::sync::OnceCell;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info, warn};

use super::limit::SiteLimit;
use super::session::{CompletedCycle, SessionKind, TimerSession};
use super::stats::DailyStats;
use super::visit::{SiteVisit, SiteVisitStats};
use crate::config::Config;
use crate::core::datetime::{format_date, format_timestamp, parse_date, parse_timestamp};
use crate::core::{Clock, SystemClock};
use crate::error::{Result, StoreError};
use crate::storage::Database;

static INSTANCE: OnceCell<ActivityStore> = OnceCell::new();

/// Typed access to timer, visit, stats and limit tables.
pub struct ActivityStore {
    db: Mutex<Database>,
    clock: Arc<dyn Clock>,
    weekly_window_days: u32,
}

impl ActivityStore {
    /// The process-wide store, created on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the database
    /// cannot be opened. A failed attempt is not cached.
    pub fn instance() -> Result<&'static Self> {
        Self::get_or_open(&INSTANCE, || {
            let config = Config::load()?;
            Self::open(&config)
        })
    }

    /// Initialize `cell` with `open` unless another caller already did.
    ///
    /// Concurrent first callers block until one `open` finishes; only that
    /// store is kept.
    fn get_or_open(cell: &OnceCell<Self>, open: impl FnOnce() -> Result<Self>) -> Result<&Self> {
        cell.get_or_try_init(open)
    }

    /// Install `store` as the process-wide instance.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyInitialized` if an instance exists.
    pub fn install(store: Self) -> Result<&'static Self> {
        INSTANCE
            .set(store)
            .map_err(|_| StoreError::AlreadyInitialized)?;
        INSTANCE.get().ok_or(StoreError::AlreadyInitialized)
    }

    /// Open the store described by `config` with the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the database path cannot be resolved or opened.
    pub fn open(config: &Config) -> Result<Self> {
        let path = config.database_path()?;
        let store = Self::open_at(&path)?.with_weekly_window(config.stats.weekly_window_days);
        info!(path = %path.display(), "Activity store ready");
        Ok(store)
    }

    /// Open a store on a database file with the system clock.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the database cannot be opened.
    pub fn open_at(path: &Path) -> Result<Self> {
        Ok(Self::with_clock(Database::open_at(path)?, Arc::new(SystemClock)))
    }

    /// Open a store on a fresh in-memory database with the system clock.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the database cannot be opened.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::with_clock(
            Database::open_in_memory()?,
            Arc::new(SystemClock),
        ))
    }

    /// Build a store over an open database and an explicit clock.
    #[must_use]
    pub fn with_clock(db: Database, clock: Arc<dyn Clock>) -> Self {
        Self {
            db: Mutex::new(db),
            clock,
            weekly_window_days: 7,
        }
    }

    /// Change how many days back [`Self::get_weekly_stats`] reaches.
    #[must_use]
    pub fn with_weekly_window(mut self, days: u32) -> Self {
        self.weekly_window_days = days;
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|_| StoreError::Database("activity store lock poisoned".to_string()))
    }

    /// The current UTC day according to the store's clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    // ── Timer sessions ────────────────────────────────────────

    /// Start a timer session now and return its id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::SchemaViolation` if the row breaks a constraint.
    pub fn start_timer_session(
        &self,
        kind: SessionKind,
        duration_minutes: i64,
        preset_id: &str,
    ) -> Result<i64> {
        let now = format_timestamp(self.clock.now());
        let db = self.lock()?;
        let conn = db.connection();

        conn.execute(
            r"INSERT INTO timer_sessions
              (start_time, duration_minutes, kind, preset_id, completed, created_at)
              VALUES (?1, ?2, ?3, ?4, 0, ?1)",
            params![now, duration_minutes, kind.as_str(), preset_id],
        )
        .map_err(|e| StoreError::sqlite("Failed to start timer session", &e))?;

        let id = conn.last_insert_rowid();
        debug!(id, kind = kind.as_str(), duration_minutes, "Started timer session");
        Ok(id)
    }

    /// Mark a running session completed now.
    ///
    /// Returns the number of rows changed: 0 when the id is unknown or the
    /// session already has an end time.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn complete_timer_session(&self, session_id: i64) -> Result<usize> {
        let now = format_timestamp(self.clock.now());
        let db = self.lock()?;

        let changed = db
            .connection()
            .execute(
                r"UPDATE timer_sessions
                  SET end_time = ?1, completed = 1
                  WHERE id = ?2 AND end_time IS NULL",
                params![now, session_id],
            )
            .map_err(|e| StoreError::sqlite("Failed to complete timer session", &e))?;

        if changed == 0 {
            warn!(session_id, "No running timer session to complete");
        } else {
            debug!(session_id, "Completed timer session");
        }
        Ok(changed)
    }

    /// Get a timer session by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_timer_session(&self, session_id: i64) -> Result<Option<TimerSession>> {
        let db = self.lock()?;

        db.connection()
            .query_row(
                r"SELECT id, start_time, end_time, duration_minutes, kind,
                         preset_id, completed, created_at
                  FROM timer_sessions WHERE id = ?1",
                [session_id],
                row_to_session,
            )
            .optional()
            .map_err(|e| StoreError::sqlite("Failed to query timer session", &e))
    }

    /// Link a work session with its break and return the cycle id.
    ///
    /// Neither session has to be completed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::SchemaViolation` if either id does not name a
    /// timer session.
    pub fn record_completed_cycle(
        &self,
        work_session_id: i64,
        break_session_id: Option<i64>,
    ) -> Result<i64> {
        let now = format_timestamp(self.clock.now());
        let db = self.lock()?;
        let conn = db.connection();

        conn.execute(
            r"INSERT INTO completed_cycles (work_session_id, break_session_id, completed_at)
              VALUES (?1, ?2, ?3)",
            params![work_session_id, break_session_id, now],
        )
        .map_err(|e| StoreError::sqlite("Failed to record completed cycle", &e))?;

        let id = conn.last_insert_rowid();
        debug!(id, work_session_id, ?break_session_id, "Recorded completed cycle");
        Ok(id)
    }

    /// Get a completed cycle by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_completed_cycle(&self, cycle_id: i64) -> Result<Option<CompletedCycle>> {
        let db = self.lock()?;

        db.connection()
            .query_row(
                r"SELECT id, work_session_id, break_session_id, completed_at
                  FROM completed_cycles WHERE id = ?1",
                [cycle_id],
                row_to_cycle,
            )
            .optional()
            .map_err(|e| StoreError::sqlite("Failed to query completed cycle", &e))
    }

    // ── Site visits ───────────────────────────────────────────

    /// Open a visit to `site_url` now and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn start_site_visit(&self, site_url: &str) -> Result<i64> {
        let now = format_timestamp(self.clock.now());
        let db = self.lock()?;
        let conn = db.connection();

        conn.execute(
            r"INSERT INTO site_visits (site_url, start_time, blocked, created_at)
              VALUES (?1, ?2, 0, ?2)",
            params![site_url, now],
        )
        .map_err(|e| StoreError::sqlite("Failed to start site visit", &e))?;

        let id = conn.last_insert_rowid();
        debug!(id, site_url, "Started site visit");
        Ok(id)
    }

    /// Close an open visit now.
    ///
    /// `duration_seconds` is computed in the statement from the stored
    /// start time and the store clock's end time, in whole seconds.
    /// Returns the number of rows changed: 0 when the id is unknown or the
    /// visit is already closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn end_site_visit(&self, visit_id: i64) -> Result<usize> {
        let now = format_timestamp(self.clock.now());
        let db = self.lock()?;

        let changed = db
            .connection()
            .execute(
                r"UPDATE site_visits
                  SET end_time = ?1,
                      duration_seconds = CAST(strftime('%s', ?1) AS INTEGER)
                                        - CAST(strftime('%s', start_time) AS INTEGER)
                  WHERE id = ?2 AND end_time IS NULL",
                params![now, visit_id],
            )
            .map_err(|e| StoreError::sqlite("Failed to end site visit", &e))?;

        if changed == 0 {
            warn!(visit_id, "No open site visit to end");
        } else {
            debug!(visit_id, "Ended site visit");
        }
        Ok(changed)
    }

    /// Record a visit that a limit policy refused.
    ///
    /// The row starts and ends now with zero duration and counts toward
    /// the day's blocked total.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn record_blocked_attempt(&self, site_url: &str) -> Result<i64> {
        let now = format_timestamp(self.clock.now());
        let db = self.lock()?;
        let conn = db.connection();

        conn.execute(
            r"INSERT INTO site_visits
              (site_url, start_time, end_time, duration_seconds, blocked, created_at)
              VALUES (?1, ?2, ?2, 0, 1, ?2)",
            params![site_url, now],
        )
        .map_err(|e| StoreError::sqlite("Failed to record blocked attempt", &e))?;

        let id = conn.last_insert_rowid();
        debug!(id, site_url, "Recorded blocked attempt");
        Ok(id)
    }

    /// Get a site visit by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_site_visit(&self, visit_id: i64) -> Result<Option<SiteVisit>> {
        let db = self.lock()?;

        db.connection()
            .query_row(
                r"SELECT id, site_url, start_time, end_time, duration_seconds,
                         blocked, created_at
                  FROM site_visits WHERE id = ?1",
                [visit_id],
                row_to_visit,
            )
            .optional()
            .map_err(|e| StoreError::sqlite("Failed to query site visit", &e))
    }

    // ── Site limits ───────────────────────────────────────────

    /// Set the daily allowance for `site_url`.
    ///
    /// Inserts a new limit, or overwrites the minutes and refreshes
    /// `updated_at` of the existing one. `created_at` is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn set_site_limit(&self, site_url: &str, daily_limit_minutes: i64) -> Result<()> {
        let now = format_timestamp(self.clock.now());
        let db = self.lock()?;

        db.connection()
            .execute(
                r"INSERT INTO site_limits (site_url, daily_limit_minutes, created_at, updated_at)
                  VALUES (?1, ?2, ?3, ?3)
                  ON CONFLICT(site_url) DO UPDATE SET
                      daily_limit_minutes = excluded.daily_limit_minutes,
                      updated_at = excluded.updated_at",
                params![site_url, daily_limit_minutes, now],
            )
            .map_err(|e| StoreError::sqlite("Failed to set site limit", &e))?;

        debug!(site_url, daily_limit_minutes, "Set site limit");
        Ok(())
    }

    /// Get the limit for `site_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_site_limit(&self, site_url: &str) -> Result<Option<SiteLimit>> {
        let db = self.lock()?;

        db.connection()
            .query_row(
                r"SELECT id, site_url, daily_limit_minutes, created_at, updated_at
                  FROM site_limits WHERE site_url = ?1",
                [site_url],
                row_to_limit,
            )
            .optional()
            .map_err(|e| StoreError::sqlite("Failed to query site limit", &e))
    }

    /// All limits, ordered by site.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_site_limits(&self) -> Result<Vec<SiteLimit>> {
        let db = self.lock()?;

        let mut stmt = db
            .connection()
            .prepare(
                r"SELECT id, site_url, daily_limit_minutes, created_at, updated_at
                  FROM site_limits ORDER BY site_url",
            )
            .map_err(|e| StoreError::sqlite("Failed to prepare query", &e))?;

        let rows = stmt
            .query_map([], row_to_limit)
            .map_err(|e| StoreError::sqlite("Failed to query site limits", &e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| StoreError::sqlite("Failed to read site limit", &e))
    }

    // ── Stats ─────────────────────────────────────────────────

    /// The precomputed stats row for `date`, today when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_daily_stats(&self, date: Option<NaiveDate>) -> Result<Option<DailyStats>> {
        let day = format_date(date.unwrap_or_else(|| self.today()));
        let db = self.lock()?;

        db.connection()
            .query_row(
                r"SELECT id, date, total_work_minutes, total_break_minutes,
                         completed_cycles, blocked_attempts, created_at, updated_at
                  FROM daily_stats WHERE date = ?1",
                [day],
                row_to_daily_stats,
            )
            .optional()
            .map_err(|e| StoreError::sqlite("Failed to query daily stats", &e))
    }

    /// Stats rows dated within the trailing window, oldest first.
    ///
    /// The window starts `weekly_window_days` before today (7 by default)
    /// and includes today. A window reaching past the earliest
    /// representable day covers the whole table.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_weekly_stats(&self) -> Result<Vec<DailyStats>> {
        let since = Duration::try_days(i64::from(self.weekly_window_days))
            .and_then(|window| self.today().checked_sub_signed(window))
            .unwrap_or(NaiveDate::MIN);
        let since = format_date(since);
        let db = self.lock()?;

        let mut stmt = db
            .connection()
            .prepare(
                r"SELECT id, date, total_work_minutes, total_break_minutes,
                         completed_cycles, blocked_attempts, created_at, updated_at
                  FROM daily_stats
                  WHERE date >= ?1
                  ORDER BY date ASC",
            )
            .map_err(|e| StoreError::sqlite("Failed to prepare query", &e))?;

        let rows = stmt
            .query_map([since], row_to_daily_stats)
            .map_err(|e| StoreError::sqlite("Failed to query weekly stats", &e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| StoreError::sqlite("Failed to read daily stats", &e))
    }

    /// Visit totals for `site_url` on `date`, today when `None`.
    ///
    /// Visits belong to the day their `start_time` falls on. A day without
    /// visits yields zero counts and no duration.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_site_visit_stats(
        &self,
        site_url: &str,
        date: Option<NaiveDate>,
    ) -> Result<SiteVisitStats> {
        let date = date.unwrap_or_else(|| self.today());
        let db = self.lock()?;

        let (visit_count, total_duration_seconds, blocked_count): (i64, Option<i64>, i64) = db
            .connection()
            .query_row(
                r"SELECT COUNT(*),
                         SUM(duration_seconds),
                         COUNT(CASE WHEN blocked = 1 THEN 1 END)
                  FROM site_visits
                  WHERE site_url = ?1 AND date(start_time) = ?2",
                params![site_url, format_date(date)],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .map_err(|e| StoreError::sqlite("Failed to query site visit stats", &e))?;

        Ok(SiteVisitStats {
            site_url: site_url.to_string(),
            date,
            visit_count,
            total_duration_seconds,
            blocked_count,
        })
    }

    // ── Export ────────────────────────────────────────────────

    /// The whole database as an `SQLite` file image.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_data(&self) -> Result<Vec<u8>> {
        let bytes = self.lock()?.export()?;
        info!(bytes = bytes.len(), "Exported activity database");
        Ok(bytes)
    }
}

/// Read a stored timestamp column.
fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    parse_timestamp(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn optional_timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| {
        parse_timestamp(&t)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

fn row_to_session(row: &Row<'_>) -> rusqlite::Result<TimerSession> {
    let kind_str: String = row.get(4)?;
    let kind = kind_str
        .parse::<SessionKind>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(TimerSession {
        id: row.get(0)?,
        start_time: timestamp_at(row, 1)?,
        end_time: optional_timestamp_at(row, 2)?,
        duration_minutes: row.get(3)?,
        kind,
        preset_id: row.get(5)?,
        completed: row.get(6)?,
        created_at: timestamp_at(row, 7)?,
    })
}

fn row_to_cycle(row: &Row<'_>) -> rusqlite::Result<CompletedCycle> {
    Ok(CompletedCycle {
        id: row.get(0)?,
        work_session_id: row.get(1)?,
        break_session_id: row.get(2)?,
        completed_at: timestamp_at(row, 3)?,
    })
}

fn row_to_visit(row: &Row<'_>) -> rusqlite::Result<SiteVisit> {
    Ok(SiteVisit {
        id: row.get(0)?,
        site_url: row.get(1)?,
        start_time: timestamp_at(row, 2)?,
        end_time: optional_timestamp_at(row, 3)?,
        duration_seconds: row.get(4)?,
        blocked: row.get(5)?,
        created_at: timestamp_at(row, 6)?,
    })
}

fn row_to_limit(row: &Row<'_>) -> rusqlite::Result<SiteLimit> {
    Ok(SiteLimit {
        id: row.get(0)?,
        site_url: row.get(1)?,
        daily_limit_minutes: row.get(2)?,
        created_at: timestamp_at(row, 3)?,
        updated_at: timestamp_at(row, 4)?,
    })
}

fn row_to_daily_stats(row: &Row<'_>) -> rusqlite::Result<DailyStats> {
    let date_str: String = row.get(1)?;
    let date = parse_date(&date_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;

    Ok(DailyStats {
        id: row.get(0)?,
        date,
        total_work_minutes: row.get(2)?,
        total_break_minutes: row.get(3)?,
        completed_cycles: row.get(4)?,
        blocked_attempts: row.get(5)?,
        created_at: timestamp_at(row, 6)?,
        updated_at: timestamp_at(row, 7)?,
    })
}

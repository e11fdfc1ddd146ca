use std::time::Duration;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::RowMapDbError;
use crate::params::{build_result_set, convert_params};
use crate::results::ResultSet;
use crate::types::RowValues;

/// Options for opening a database file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteOptions {
    /// Path to the database file. An empty path means "not configured":
    /// connecting becomes a no-op and the handle stays unconnected.
    pub db_path: String,
    /// Apply `PRAGMA journal_mode = WAL` after opening.
    pub journal_mode_wal: bool,
    /// Optional driver-level busy timeout.
    pub busy_timeout: Option<Duration>,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            journal_mode_wal: true,
            busy_timeout: None,
        }
    }
}

/// Fluent builder for `SqliteOptions`.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn journal_mode_wal(mut self, enabled: bool) -> Self {
        self.opts.journal_mode_wal = enabled;
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.opts.busy_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }
}

/// Handle owning at most one live connection to a SQLite database file.
///
/// All calls are blocking, synchronous request/response against the single
/// connection; there is no pooling and no internal locking. Concurrency
/// safety is delegated to SQLite itself.
#[derive(Debug)]
pub struct SqliteDb {
    conn: Option<Connection>,
    options: SqliteOptions,
}

impl SqliteDb {
    /// Create an unconnected handle.
    #[must_use]
    pub fn new(options: SqliteOptions) -> Self {
        Self {
            conn: None,
            options,
        }
    }

    /// Create a handle and connect it in one step.
    ///
    /// With an empty destination path this still succeeds, returning an
    /// unconnected handle (see [`SqliteDb::connect`]).
    ///
    /// # Errors
    /// Returns `RowMapDbError::ConnectionError` if the file cannot be opened
    /// or the liveness probe fails.
    pub fn open(options: SqliteOptions) -> Result<Self, RowMapDbError> {
        let mut db = Self::new(options);
        db.connect()?;
        Ok(db)
    }

    #[must_use]
    pub fn destination(&self) -> &str {
        &self.options.db_path
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Open the connection to the configured destination.
    ///
    /// An empty destination is treated as "not configured" and connecting is
    /// a logged no-op. After a successful open, pragmas are applied and a
    /// liveness probe runs. If the probe fails the (possibly bad) connection
    /// is retained and the error surfaced; callers can `disconnect` and
    /// retry.
    ///
    /// # Errors
    /// Returns `RowMapDbError::ConnectionError` if the open, the pragmas, or
    /// the liveness probe fail.
    pub fn connect(&mut self) -> Result<(), RowMapDbError> {
        if self.options.db_path.is_empty() {
            debug!("destination not configured; skipping connect");
            return Ok(());
        }
        if self.conn.is_some() {
            debug!(destination = %self.options.db_path, "already connected");
            return Ok(());
        }

        debug!(destination = %self.options.db_path, "connecting to database file");
        let conn = Connection::open(&self.options.db_path).map_err(|e| {
            error!(destination = %self.options.db_path, error = %e, "failed to open database file");
            RowMapDbError::ConnectionError(format!(
                "failed to open `{}`: {e}",
                self.options.db_path
            ))
        })?;

        if let Some(timeout) = self.options.busy_timeout {
            conn.busy_timeout(timeout).map_err(|e| {
                RowMapDbError::ConnectionError(format!("failed to set busy timeout: {e}"))
            })?;
        }
        if self.options.journal_mode_wal {
            conn.execute_batch("PRAGMA journal_mode = WAL;").map_err(|e| {
                RowMapDbError::ConnectionError(format!("failed to apply WAL pragma: {e}"))
            })?;
        }

        // A failed probe leaves the connection reference in place.
        self.conn = Some(conn);
        self.check_connection()?;

        info!(destination = %self.options.db_path, "connection established");
        Ok(())
    }

    /// Probe the connection for liveness with `SELECT 1`.
    ///
    /// # Errors
    /// Returns `RowMapDbError::ConnectionError` if the handle is unconnected
    /// or the probe fails.
    pub fn check_connection(&self) -> Result<(), RowMapDbError> {
        debug!(destination = %self.options.db_path, "checking connection");
        let conn = self.connection()?;
        conn.query_row("SELECT 1", [], |_| Ok(())).map_err(|e| {
            error!(destination = %self.options.db_path, error = %e, "liveness probe failed");
            RowMapDbError::ConnectionError(format!("liveness probe failed: {e}"))
        })
    }

    /// Release the connection.
    ///
    /// Not idempotent: a second call fails with `ConnectionError` because
    /// the handle no longer holds a connection.
    ///
    /// # Errors
    /// Returns `RowMapDbError::ConnectionError` if there is no live
    /// connection or the driver reports a close failure (the connection is
    /// put back in that case).
    pub fn disconnect(&mut self) -> Result<(), RowMapDbError> {
        let conn = self.conn.take().ok_or_else(|| {
            RowMapDbError::ConnectionError("no live connection to release".into())
        })?;
        match conn.close() {
            Ok(()) => {
                info!(destination = %self.options.db_path, "connection closed");
                Ok(())
            }
            Err((conn, e)) => {
                error!(destination = %self.options.db_path, error = %e, "failed to close connection");
                self.conn = Some(conn);
                Err(RowMapDbError::ConnectionError(format!(
                    "failed to close connection: {e}"
                )))
            }
        }
    }

    pub(crate) fn connection(&self) -> Result<&Connection, RowMapDbError> {
        self.conn.as_ref().ok_or_else(|| {
            RowMapDbError::ConnectionError(
                "no live connection; call connect() first".into(),
            )
        })
    }

    /// Execute a batch of statements (DDL, setup scripts).
    ///
    /// # Errors
    /// Returns `RowMapDbError::ConnectionError` if unconnected, otherwise
    /// `RowMapDbError::ExecutionError` on failure.
    pub fn execute_batch(&self, sql: &str) -> Result<(), RowMapDbError> {
        let conn = self.connection()?;
        conn.execute_batch(sql)
            .map_err(|e| RowMapDbError::ExecutionError(format!("batch failed: {e}")))
    }

    /// Execute a SELECT and materialize the full result set.
    ///
    /// # Errors
    /// Returns `RowMapDbError::ConnectionError` if unconnected,
    /// `RowMapDbError::PrepareError` if the SQL is rejected, and
    /// `RowMapDbError::ExecutionError`/`ScanError` from execution.
    pub fn select(&self, sql: &str, params: &[RowValues]) -> Result<ResultSet, RowMapDbError> {
        let conn = self.connection()?;
        let values = convert_params(params);
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| RowMapDbError::PrepareError(format!("`{sql}`: {e}")))?;
        let result_set = build_result_set(&mut stmt, &values)?;
        debug!(sql, rows = result_set.results.len(), "select");
        Ok(result_set)
    }

    /// Execute a DML statement and return the affected-row count.
    ///
    /// # Errors
    /// Returns `RowMapDbError::ConnectionError` if unconnected,
    /// `RowMapDbError::PrepareError` if the SQL is rejected, and
    /// `RowMapDbError::ExecutionError` if binding or execution fails.
    pub fn dml(&self, sql: &str, params: &[RowValues]) -> Result<usize, RowMapDbError> {
        let conn = self.connection()?;
        let values = convert_params(params);
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| RowMapDbError::PrepareError(format!("`{sql}`: {e}")))?;
        let refs: Vec<&dyn rusqlite::ToSql> =
            values.iter().map(|v| v as &dyn rusqlite::ToSql).collect();
        let affected = stmt
            .execute(&refs[..])
            .map_err(|e| RowMapDbError::ExecutionError(format!("`{sql}`: {e}")))?;
        debug!(sql, affected, "dml");
        Ok(affected)
    }

    /// Rowid assigned by the most recent successful insert on this
    /// connection.
    ///
    /// # Errors
    /// Returns `RowMapDbError::ConnectionError` if unconnected.
    pub fn last_insert_rowid(&self) -> Result<i64, RowMapDbError> {
        Ok(self.connection()?.last_insert_rowid())
    }
}

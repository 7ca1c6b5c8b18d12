pub mod schema;

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{BoardError, BoardResult};

/// Open (or create) the board database at the given path with the schema initialized.
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open database at {}", path.display()))?;

    // Set first: switching to WAL and creating the schema both need the write lock.
    conn.busy_timeout(std::time::Duration::from_millis(5000))?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    schema::init_schema(&conn).context("failed to initialize schema")?;

    tracing::info!(path = %path.display(), "database initialized");
    Ok(conn)
}

/// Open an in-memory database with the schema applied.
pub fn open_memory_database() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    schema::init_schema(&conn).context("failed to initialize schema")?;
    Ok(conn)
}

/// Shared handle to the board database.
///
/// Every access goes through [`Store::call`], which locks the connection on the
/// blocking thread pool and releases it when the closure returns, on success,
/// error or panic alike.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `f` with exclusive access to the connection.
    pub async fn call<T, F>(&self, f: F) -> BoardResult<T>
    where
        F: FnOnce(&mut Connection) -> BoardResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            // A panicking handler already rolled back its transaction on unwind.
            let mut conn = db.lock().unwrap_or_else(|poisoned| {
                tracing::warn!("db lock poisoned by an earlier panic, recovering");
                poisoned.into_inner()
            });
            f(&mut conn)
        })
        .await
        .map_err(|e| BoardError::Internal(format!("db task failed: {e}")))?
    }
}

/// Result of a database health check.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub integrity_ok: bool,
    pub integrity_details: String,
    pub idea_count: u64,
    pub comment_count: u64,
    pub like_count: u64,
}

/// Run `PRAGMA integrity_check` and collect row counts.
pub fn check_database_health(conn: &Connection) -> Result<HealthReport> {
    let integrity: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .context("integrity check failed to run")?;

    let count = |table: &str| -> Result<u64> {
        let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?;
        Ok(n as u64)
    };

    Ok(HealthReport {
        integrity_ok: integrity == "ok",
        integrity_details: integrity,
        idea_count: count("ideas")?,
        comment_count: count("comments")?,
        like_count: count("likes")?,
    })
}

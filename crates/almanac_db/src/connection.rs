//! Database connection management.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::schema;

/// Handle to one calendar's database.
///
/// Each calendar is a standalone SQLite file. A handle owns a single live
/// connection; sharing one file between several handles or processes is
/// unsupported.
#[derive(Debug, Clone)]
pub struct CalendarDb {
    pool: SqlitePool,
}

impl CalendarDb {
    /// Create a calendar database at `path`, erasing any existing calendar
    /// stored there.
    ///
    /// Drops and recreates every table, then seeds the category types.
    pub async fn create_new(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("Creating calendar database: {}", path.display());
        let pool = Self::connect(path, true).await?;
        schema::create_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Open an existing calendar database at `path` without modifying its
    /// schema or data.
    pub async fn open_existing(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DbError::missing_database(path.display().to_string()));
        }

        info!("Opening calendar database: {}", path.display());
        let pool = Self::connect(path, false).await?;
        schema::validate_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Open an in-memory calendar (for testing).
    pub async fn open_in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .foreign_keys(false);

        // In-memory must be a single connection to share state
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        schema::create_schema(&pool).await?;
        Ok(Self { pool })
    }

    async fn connect(path: &Path, create_if_missing: bool) -> DbResult<SqlitePool> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(create_if_missing)
            .foreign_keys(false)
            .journal_mode(SqliteJournalMode::Wal)
            .pragma("synchronous", "NORMAL");

        // Single interactive user, single live connection
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        debug!("Database connection established");
        Ok(pool)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection.
    ///
    /// Resolves only once the connection is fully closed and the file lock
    /// released, so the same path can be reopened or deleted immediately
    /// afterwards. Safe to call more than once.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Check if the database is healthy.
    pub async fn health_check(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Get database statistics.
    pub async fn stats(&self) -> DbResult<DbStats> {
        let category_type_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categoryTypes")
            .fetch_one(&self.pool)
            .await?;

        let category_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        let event_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(DbStats {
            category_type_count,
            category_count,
            event_count,
        })
    }
}

/// Database statistics.
#[derive(Debug, Clone)]
pub struct DbStats {
    pub category_type_count: i64,
    pub category_count: i64,
    pub event_count: i64,
}

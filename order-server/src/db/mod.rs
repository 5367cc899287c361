//! Database Module
//!
//! Handles SQLite connection pool and migrations

pub mod repository;

use crate::utils::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::time::Duration;

/// Applied to every pooled connection
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database service: owns the SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) the database file with WAL mode and apply migrations
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON")
            // Wait on write contention instead of failing immediately
            .busy_timeout(BUSY_TIMEOUT)
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    /// Single-connection in-memory database with the real schema
    ///
    /// One connection keeps every query on the same memory database.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

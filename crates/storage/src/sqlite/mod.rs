use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{QuizHistoryRepository, Storage, UserProgressRepository, WordRepository};

mod history_repo;
mod mapping;
mod migrate;
mod progress_repo;
mod word_repo;

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Word store, quiz history and player progress in one `SQLite` database.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Parse `database_url` and apply the pragmas every connection needs.
fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, SqliteInitError> {
    Ok(SqliteConnectOptions::from_str(database_url)?
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT))
}

impl SqliteRepository {
    /// Open a pool on `database_url`; call [`Self::migrate`] before use.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the URL is malformed or the database
    /// cannot be opened.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(BUSY_TIMEOUT)
            .connect_with(connect_options(database_url)?)
            .await?;
        tracing::debug!(db = database_url, "sqlite pool opened");
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Bring the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if a migration statement fails.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Connect, migrate, and expose one `SQLite` database through every
    /// repository trait.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connecting or migrating fails.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(database_url).await?;
        repo.migrate().await?;
        Ok(Self {
            words: Arc::new(repo.clone()) as Arc<dyn WordRepository>,
            history: Arc::new(repo.clone()) as Arc<dyn QuizHistoryRepository>,
            progress: Arc::new(repo) as Arc<dyn UserProgressRepository>,
        })
    }
}

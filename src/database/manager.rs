use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::record::RecordError;

/// Errors from the record store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Invalid record: {0}")]
    Record(#[from] RecordError),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DatabaseError::UniqueViolation(db_err.message().to_string())
            }
            sqlx::Error::RowNotFound => DatabaseError::NotFound("row not found".to_string()),
            _ => DatabaseError::Sqlx(err),
        }
    }
}

const CREATE_EMPLOYEES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name    TEXT    NOT NULL,
    middle_name   TEXT,
    last_name     TEXT    NOT NULL,
    date_of_birth TEXT    NOT NULL,
    email         TEXT    NOT NULL UNIQUE,
    is_active     BOOLEAN NOT NULL DEFAULT 1
)
"#;

/// Connection pool construction and schema bootstrap for the record store
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a pool for the configured URL and make sure the schema exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
        if config.url.trim().is_empty() {
            return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
        }

        let mut options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
        if !config.enable_query_logging {
            options = options.disable_statement_logging();
        }

        let mut pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.connection_timeout));

        // Every connection to an in-memory database gets its own private database,
        // so the pool is pinned to one connection that is never recycled.
        pool_options = if Self::is_in_memory(&config.url) {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(config.max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        Self::bootstrap_schema(&pool).await?;

        info!(
            "Connected to record store {} (max_connections={})",
            config.url,
            pool.options().get_max_connections()
        );
        Ok(pool)
    }

    /// Idempotent table creation
    pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_EMPLOYEES_TABLE).execute(pool).await?;
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    fn is_in_memory(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 4,
            connection_timeout: 5,
            enable_query_logging: false,
        }
    }

    #[test]
    fn detects_in_memory_urls() {
        assert!(DatabaseManager::is_in_memory("sqlite::memory:"));
        assert!(DatabaseManager::is_in_memory("sqlite://file:test?mode=memory&cache=shared"));
        assert!(!DatabaseManager::is_in_memory("sqlite://employees.db"));
    }

    #[tokio::test]
    async fn in_memory_pool_is_pinned_to_one_connection() {
        let pool = DatabaseManager::connect(&memory_config()).await.unwrap();
        assert_eq!(pool.options().get_max_connections(), 1);
        DatabaseManager::health_check(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let pool = DatabaseManager::connect(&memory_config()).await.unwrap();
        DatabaseManager::bootstrap_schema(&pool).await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn empty_url_is_a_config_error() {
        let mut config = memory_config();
        config.url = "  ".to_string();
        let rt = tokio::runtime::Runtime::new().unwrap();
        let err = rt.block_on(DatabaseManager::connect(&config)).unwrap_err();
        assert!(matches!(err, DatabaseError::ConfigMissing("DATABASE_URL")));
    }
}

//! PostgreSQL storage adapter implementation

pub mod config;
mod horizon;
mod line;
mod point;
pub mod schema;

pub use config::{ConfigError, PoolConfig, PostgresConfig};

use geotoolbox_core::error::{Result, ToolboxError};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgConnection, PgPool, Row};

/// PostgreSQL storage adapter
pub struct PostgresStore {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given configuration
    pub async fn new(config: PostgresConfig) -> Result<Self> {
        config.validate()?;

        let pool = PgPoolOptions::new()
            .min_connections(config.pool.min_connections)
            .max_connections(config.pool.max_connections)
            .acquire_timeout(config.pool.acquire_timeout)
            .idle_timeout(config.pool.idle_timeout)
            .connect(&config.database_url)
            .await
            .map_err(storage_error("connect to database"))?;

        tracing::info!(max_connections = config.pool.max_connections, "Connected to PostgreSQL");
        Ok(Self { pool, config })
    }

    /// Create a new PostgreSQL store and make sure the tables exist
    pub async fn with_schema(config: PostgresConfig) -> Result<Self> {
        let store = Self::new(config).await?;
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create missing tables and indexes. Existing tables are left as they are.
    pub async fn ensure_schema(&self) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(storage_error("begin transaction"))?;
        for statement in schema::STATEMENTS {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(storage_error("create schema"))?;
        }
        tx.commit().await.map_err(storage_error("commit schema"))?;

        tracing::debug!(statements = schema::STATEMENTS.len(), "Schema ensured");
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &PostgresConfig {
        &self.config
    }

    /// Perform a health check on the database connection
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error("run health check"))?;
        Ok(())
    }
}

/// Map a database error to a storage error naming the failed action
pub(crate) fn storage_error(action: &'static str) -> impl FnOnce(sqlx::Error) -> ToolboxError {
    move |e| ToolboxError::Storage(format!("Failed to {}: {}", action, e))
}

pub(crate) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| ToolboxError::Storage(format!("Failed to read column {}: {}", name, e)))
}

/// Stored ids use -1 for "none"
pub(crate) fn sentinel_id(id: Option<i64>) -> i64 {
    id.unwrap_or(-1)
}

/// Advance the id sequence of `table` after a row was written with an explicit id
pub(crate) async fn sync_id_sequence(conn: &mut PgConnection, table: &'static str) -> Result<()> {
    sqlx::query(&schema::sync_sequence_sql(table))
        .execute(conn)
        .await
        .map_err(storage_error("advance id sequence"))?;
    Ok(())
}

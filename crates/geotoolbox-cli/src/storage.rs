use anyhow::{Context, Result};
use geotoolbox_core::config::StorageKind;
use geotoolbox_core::ports::{HorizonStore, LineStore, PointStore};
use geotoolbox_store::{MemoryGeoStore, PostgresConfig, PostgresStore};
use std::sync::Arc;

/// Host and database name of a connection URL, without credentials
fn describe_database_url(url: &str) -> (String, String) {
    let host = url
        .split('@')
        .nth(1)
        .and_then(|s| s.split('/').next())
        .unwrap_or("localhost")
        .to_string();

    let database = url
        .split('/')
        .next_back()
        .and_then(|s| s.split('?').next())
        .unwrap_or("")
        .to_string();

    (host, database)
}

pub struct Storage {
    pub points: Arc<dyn PointStore>,
    pub lines: Arc<dyn LineStore>,
    pub horizons: Arc<dyn HorizonStore>,
}

impl Storage {
    pub async fn new(kind: StorageKind) -> Result<Self> {
        match kind {
            StorageKind::Memory => Ok(Self::new_memory()),
            StorageKind::Postgres => {
                let store = Arc::new(connect_postgres().await?);
                Ok(Self { points: store.clone(), lines: store.clone(), horizons: store })
            }
        }
    }

    fn new_memory() -> Self {
        tracing::debug!("Using in-memory storage; nothing is kept after the command exits");
        let store = Arc::new(MemoryGeoStore::new());
        Self { points: store.clone(), lines: store.clone(), horizons: store }
    }
}

/// Connect to the database named by DATABASE_URL
pub async fn connect_postgres() -> Result<PostgresStore> {
    let config = PostgresConfig::from_env().context(
        "Failed to load PostgreSQL configuration. Set DATABASE_URL environment variable.",
    )?;

    PostgresStore::new(config.clone()).await.map_err(|e| {
        let (host, database) = describe_database_url(&config.database_url);
        anyhow::anyhow!(
            "Failed to connect to PostgreSQL\n\n\
                Host: {}\n\
                Database: {}\n\n\
                Check that the server is running and DATABASE_URL is correct.\n\n\
                Error: {}",
            host,
            database,
            e
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_database_url() {
        let (host, database) = describe_database_url("postgresql://geo:secret@db:5432/geology?sslmode=disable");
        assert_eq!(host, "db:5432");
        assert_eq!(database, "geology");
    }
}

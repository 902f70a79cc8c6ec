//! Schema command implementation

use crate::output::OutputWriter;
use crate::storage::connect_postgres;
use anyhow::{bail, Context, Result};
use geotoolbox_core::config::{LayeredConfig, StorageKind};

pub async fn execute(settings: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    if settings.storage.value != StorageKind::Postgres {
        bail!(
            "The schema command needs PostgreSQL storage (configured: {}). Use --storage postgres.",
            settings.storage.value
        );
    }

    let store = connect_postgres().await?;
    store.health_check().await.context("Database health check failed")?;
    store.ensure_schema().await.context("Failed to create schema")?;

    output.success("Schema is up to date");
    Ok(())
}

use anyhow::{Context, Result};
use geotoolbox_core::config::{CliConfigOverrides, LayeredConfig, StorageKind};
use std::path::Path;

use crate::cli::StorageBackend;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "geotoolbox.toml";

impl From<StorageBackend> for StorageKind {
    fn from(backend: StorageBackend) -> Self {
        match backend {
            StorageBackend::Memory => StorageKind::Memory,
            StorageBackend::Postgres => StorageKind::Postgres,
        }
    }
}

/// Resolve configuration: defaults, then file, then environment, then flags
pub fn load(path: Option<&Path>, storage: Option<StorageBackend>) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    match path {
        Some(path) => {
            config = config
                .load_from_file(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?;
        }
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                tracing::debug!("Using {}", DEFAULT_CONFIG_FILE);
                config = config
                    .load_from_file(default)
                    .with_context(|| format!("Failed to load {}", DEFAULT_CONFIG_FILE))?;
            }
        }
    }

    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        storage: storage.map(StorageKind::from),
        ..Default::default()
    });

    Ok(config)
}

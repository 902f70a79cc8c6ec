use crate::constants::{FLOAT_PRECISION, STANDARD_REFERENCE_SYSTEM};
use crate::error::{Result, ToolboxError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Persistence backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Memory,
    Postgres,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Memory => write!(f, "memory"),
            StorageKind::Postgres => write!(f, "postgres"),
        }
    }
}

/// Layered configuration for GeoToolbox
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub float_precision: ConfigValue<f64>,
    pub reference_system: ConfigValue<String>,
    pub storage: ConfigValue<StorageKind>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            float_precision: ConfigValue::new(FLOAT_PRECISION, ConfigSource::Default),
            reference_system: ConfigValue::new(
                STANDARD_REFERENCE_SYSTEM.to_string(),
                ConfigSource::Default,
            ),
            storage: ConfigValue::new(StorageKind::Memory, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ToolboxError::ConfigFileNotFound { path: path.to_path_buf() });
        }

        let content = fs::read_to_string(path)?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| ToolboxError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(precision) = file_config.float_precision {
            self.float_precision.update(validate_float_precision(precision)?, ConfigSource::File);
        }

        if let Some(reference_system) = file_config.reference_system {
            self.reference_system.update(reference_system, ConfigSource::File);
        }

        if let Some(storage) = file_config.storage {
            self.storage.update(storage, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOTOOLBOX_FLOAT_PRECISION
        if let Ok(precision_str) = env::var("GEOTOOLBOX_FLOAT_PRECISION") {
            match parse_float_precision(&precision_str) {
                Ok(precision) => {
                    self.float_precision.update(precision, ConfigSource::Environment)
                }
                Err(_) => tracing::warn!(
                    "Invalid GEOTOOLBOX_FLOAT_PRECISION value '{}': expected a positive number",
                    precision_str
                ),
            }
        }

        // GEOTOOLBOX_REFERENCE_SYSTEM
        if let Ok(reference_system) = env::var("GEOTOOLBOX_REFERENCE_SYSTEM") {
            if reference_system.trim().is_empty() {
                tracing::warn!("Ignoring empty GEOTOOLBOX_REFERENCE_SYSTEM");
            } else {
                self.reference_system.update(reference_system, ConfigSource::Environment);
            }
        }

        // GEOTOOLBOX_STORAGE
        if let Ok(storage_str) = env::var("GEOTOOLBOX_STORAGE") {
            match parse_storage_kind(&storage_str) {
                Ok(storage) => self.storage.update(storage, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOTOOLBOX_STORAGE value '{}': expected memory or postgres",
                    storage_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(precision) = overrides.float_precision {
            self.float_precision.update(precision, ConfigSource::Cli);
        }

        if let Some(reference_system) = overrides.reference_system {
            self.reference_system.update(reference_system, ConfigSource::Cli);
        }

        if let Some(storage) = overrides.storage {
            self.storage.update(storage, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "float_precision".to_string(),
            (self.float_precision.value.to_string(), self.float_precision.source),
        );

        map.insert(
            "reference_system".to_string(),
            (self.reference_system.value.clone(), self.reference_system.source),
        );

        map.insert("storage".to_string(), (self.storage.value.to_string(), self.storage.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    float_precision: Option<f64>,
    reference_system: Option<String>,
    storage: Option<StorageKind>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub float_precision: Option<f64>,
    pub reference_system: Option<String>,
    pub storage: Option<StorageKind>,
}

/// Parse a coordinate tolerance from string
pub fn parse_float_precision(s: &str) -> Result<f64> {
    let value = s.trim().parse::<f64>().map_err(|_| ToolboxError::ConfigInvalid {
        key: "float_precision".to_string(),
        reason: format!("Invalid tolerance: {}. Use a positive number", s),
    })?;
    validate_float_precision(value)
}

fn validate_float_precision(value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ToolboxError::ConfigInvalid {
            key: "float_precision".to_string(),
            reason: format!("Invalid tolerance: {}. Use a positive number", value),
        })
    }
}

/// Parse storage backend from string
pub fn parse_storage_kind(s: &str) -> Result<StorageKind> {
    match s.to_lowercase().as_str() {
        "memory" | "mem" => Ok(StorageKind::Memory),
        "postgres" | "postgresql" | "pg" => Ok(StorageKind::Postgres),
        _ => Err(ToolboxError::ConfigInvalid {
            key: "storage".to_string(),
            reason: format!("Invalid storage backend: {}. Use memory or postgres", s),
        }),
    }
}

//! Error types for GeoToolbox

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolboxError {
    // Entity errors
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Cannot convert '{value}' to {target}")]
    Conversion { value: String, target: &'static str },

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Invalid extent: {reason}")]
    InvalidExtent { reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    #[error("Config file not found at {path}")]
    ConfigFileNotFound { path: PathBuf },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ToolboxError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ToolboxError::NotFound { what: what.into() }
    }
}

pub type Result<T> = std::result::Result<T, ToolboxError>;

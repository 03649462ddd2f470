// src/error.rs

//! Crate-wide error type
//!
//! Library modules return [`Result`]; the binary wraps these in `anyhow`
//! with additional context.

use crate::script::ConfigurationError;
use thiserror::Error;

/// Errors produced by the lunx library
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid migration configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse settings TOML: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("Failed to serialize settings TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Enumeration error: {0}")]
    Enumeration(String),
}

/// Result type for lunx library operations
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the health service resource resolver.
//!
//! Digit extraction and resolution errors live next to the code that
//! produces them in [`crate::resources`]; this module ties them together
//! with configuration and I/O failures for the CLI surface.

use crate::resources::ResolveError;
use thiserror::Error;

/// Top-level error for the library and the `hs-resources` binary.
#[derive(Debug, Error)]
pub enum HealthServiceError {
    /// Reading a manifest or configuration file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A resource manifest was not usable as input
    #[error("Invalid manifest: {0}")]
    Manifest(String),

    /// Rendering output failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Resolution fell back to defaults and the caller chose to abort
    #[error("Resource resolution failed: {0}")]
    Resolve(#[from] ResolveError),
}

/// Errors raised while loading `.healthservice.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParsingFailed(String),

    #[error("Configuration file not found: {0}")]
    NotFound(String),
}

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, HealthServiceError>;

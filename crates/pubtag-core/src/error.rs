//! Error types for pubtag

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using PubtagError
pub type Result<T> = std::result::Result<T, PubtagError>;

/// Main error type for pubtag operations
#[derive(Debug, Error)]
pub enum PubtagError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Manifest-related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Hosting service errors
    #[error(transparent)]
    Host(#[from] HostError),

    /// Step output errors
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required field
    #[error("Missing required input: {0}")]
    MissingField(String),

    /// Invalid configuration value
    #[error("Invalid input: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

/// Manifest-related errors
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file does not exist
    #[error("pubspec.yaml does not exist. (looked in {0})")]
    NotFound(PathBuf),

    /// Manifest file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// No version field
    #[error("No version field found in pubspec.yaml")]
    MissingVersion,

    /// Version field is not a scalar
    #[error("Invalid version field in pubspec.yaml: {0}")]
    InvalidVersion(String),
}

/// Hosting service errors
#[derive(Debug, Error)]
pub enum HostError {
    /// API returned a non-success status
    #[error("{status} {message}")]
    Api { status: u16, message: String },

    /// Request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Credentials missing or rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),
}

/// Step output errors
#[derive(Debug, Error)]
pub enum OutputError {
    /// Output file could not be written
    #[error("Failed to write output {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Value contains the generated delimiter
    #[error("Output {0} contains the heredoc delimiter")]
    DelimiterCollision(String),
}

//! Error types for hoard-core

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using hoard-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the builder, the reconciliation engine and the
/// download pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Cross-field or format violation caught before any remote call
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Local file unreadable or unwritable
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed PEM, JSON or stored payload
    #[error("Format error: {message}")]
    Format { message: String },

    /// Remote identity absent when a value was expected
    #[error("Secret not found: {identity}")]
    NotFound { identity: String },

    /// Remote identity already exists on create
    #[error("Secret already exists: {identity}")]
    Conflict { identity: String },

    /// Recomputed checksum does not match the stored one
    #[error("sha256 mismatch for {}: expected {expected}, got {actual}", path.display())]
    Integrity {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Identity prefix or record kind is not one of the supported kinds
    #[error("Unsupported secret kind: {kind}. Valid kinds: rdspostgres, snowflake, ssl_certificate, text_file, jsondoc")]
    UnsupportedKind { kind: String },

    /// Transport, auth or unclassified store failure
    #[error("Remote store error: {message}")]
    Remote { message: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration contents
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an IO error bound to the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    pub fn not_found(identity: impl Into<String>) -> Self {
        Self::NotFound {
            identity: identity.into(),
        }
    }

    pub fn conflict(identity: impl Into<String>) -> Self {
        Self::Conflict {
            identity: identity.into(),
        }
    }

    /// Create an integrity error for a file whose checksum did not match
    pub fn integrity(
        path: impl AsRef<Path>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::Integrity {
            path: path.as_ref().to_path_buf(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedKind { kind: kind.into() }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

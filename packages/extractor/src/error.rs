//! Error types for the extractor.
//!
//! Only failures that stop a document (or the whole run) are errors.
//! A pass that finds nothing returns a value such as
//! `DocumentType::Unknown` or an empty list instead.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// The document could not be read or its text could not be extracted.
    #[error("Failed to extract text from {}: {message}", .path.display())]
    Acquisition { path: PathBuf, message: String },

    /// Writing the structured record failed.
    #[error("Failed to write record to {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Log destination could not be set up.
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

impl ExtractorError {
    /// Build an acquisition error for `path`.
    pub fn acquisition(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Acquisition {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;

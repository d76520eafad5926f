//! Configuration constants and directory settings for the extractor.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ExtractorError, Result};

/// Jurisdiction written to every record. Not derived from document text.
pub const DEFAULT_JURISDICTION: &str = "Bogotá";

/// Default root searched recursively for input documents.
pub const DEFAULT_INPUT_DIR: &str = "data/raw_pdfs/datos";

/// Default directory for processed records.
pub const DEFAULT_OUTPUT_DIR: &str = "data/processed";

/// Default log file.
pub const DEFAULT_LOG_FILE: &str = "logs/legal_rag.log";

/// Environment variable overriding the input root.
pub const ENV_INPUT_DIR: &str = "LEGAL_EXTRACTOR_INPUT_DIR";

/// Environment variable overriding the output directory.
pub const ENV_OUTPUT_DIR: &str = "LEGAL_EXTRACTOR_OUTPUT_DIR";

/// Environment variable overriding the log file.
pub const ENV_LOG_FILE: &str = "LEGAL_EXTRACTOR_LOG_FILE";

/// Environment variable overriding the record format.
pub const ENV_FORMAT: &str = "LEGAL_EXTRACTOR_FORMAT";

/// Serialization format of record files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// File extension for records in this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Detect the format of an existing record file from its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ExtractorError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(ExtractorError::InvalidConfig(format!(
                "unknown output format '{other}', expected 'json' or 'yaml'"
            ))),
        }
    }
}

/// Directory and output settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Root searched recursively for documents.
    pub input_dir: PathBuf,

    /// Directory receiving one record file per document.
    pub output_dir: PathBuf,

    /// Log file (console logging is always on).
    pub log_file: PathBuf,

    /// Record serialization format.
    pub format: OutputFormat,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            format: OutputFormat::Json,
        }
    }
}

impl ExtractorConfig {
    /// Defaults overridden by `LEGAL_EXTRACTOR_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values returned from `lookup`.
    ///
    /// Empty values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(ENV_INPUT_DIR) {
            config.input_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get(ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(file) = get(ENV_LOG_FILE) {
            config.log_file = PathBuf::from(file);
        }
        if let Some(format) = get(ENV_FORMAT) {
            config.format = format.parse()?;
        }

        Ok(config)
    }

    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_log_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.log_file = file.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Create the input and output directories if they do not exist.
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.input_dir, &self.output_dir] {
            if dir.exists() && !dir.is_dir() {
                return Err(ExtractorError::InvalidConfig(format!(
                    "not a directory: {}",
                    dir.display()
                )));
            }
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

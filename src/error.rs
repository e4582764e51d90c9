//! Error handling for status extraction.
//!
//! Extraction itself never fails: malformed lines are skipped. These errors
//! cover everything around it, such as reading input files, loading the
//! status whitelist and validating configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Unsupported input file: {path} - {reason}")]
    UnsupportedInput { path: PathBuf, reason: String },

    #[error("Invalid status whitelist in file: {path} - {reason}")]
    InvalidWhitelist { path: PathBuf, reason: String },

    #[error("Status whitelist JSON error: {0}")]
    WhitelistJson(#[from] serde_json::Error),

    #[error("Config file parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid date '{value}': expected dd/mm/yyyy or yyyy-mm-dd")]
    InvalidDate { value: String },
}

impl ExtractorError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid whitelist error for a file
    pub fn invalid_whitelist(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidWhitelist {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid date error
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractorError>;

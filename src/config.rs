//! Configuration management and validation.
//!
//! Holds the spreadsheet column layout, the re-call exclusion rule, matching
//! leniency and optional date filters. Configuration is layered: a TOML file
//! (explicit path, then `STATUS_EXTRACTOR_CONFIG`, then the user config
//! directory), with command-line overrides applied on top by the CLI.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME, DEFAULT_ARRIVED_AT_COLUMN,
    DEFAULT_RECALL_EXCLUDED_STATUS, DEFAULT_RECEIVER_COLUMN, DEFAULT_SEQUENCE_COLUMN,
    DEFAULT_STATUS_COLUMN,
};
use crate::dates::{normalize_date, parse_date};
use crate::error::{ExtractorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Named spreadsheet column roles (zero-based indices)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    /// Sequence number column; a numeric value marks a record row
    pub sequence: usize,

    /// Arrival date column
    pub arrived_at: usize,

    /// Receiver name column
    pub receiver: usize,

    /// Status column, possibly holding several status lines
    pub status: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            sequence: DEFAULT_SEQUENCE_COLUMN,
            arrived_at: DEFAULT_ARRIVED_AT_COLUMN,
            receiver: DEFAULT_RECEIVER_COLUMN,
            status: DEFAULT_STATUS_COLUMN,
        }
    }
}

impl ColumnLayout {
    /// A record row must have more columns than this
    pub fn status_index(&self) -> usize {
        self.status
    }

    fn validate(&self) -> Result<()> {
        let roles = [
            ("sequence", self.sequence),
            ("arrived_at", self.arrived_at),
            ("receiver", self.receiver),
            ("status", self.status),
        ];

        for (i, (name_a, index_a)) in roles.iter().enumerate() {
            for (name_b, index_b) in &roles[i + 1..] {
                if index_a == index_b {
                    return Err(ExtractorError::configuration(format!(
                        "Columns '{}' and '{}' both use index {}",
                        name_a, name_b, index_a
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Extraction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Status dropped on calls made after the arrival day (empty disables)
    pub recall_excluded_status: String,

    /// Accept bare statuses whose text contains, or is contained by, a label
    pub lenient_matching: bool,

    /// Keep only records that arrived on this date
    pub arrived_date: Option<String>,

    /// Keep only records called on this date
    pub called_date: Option<String>,

    /// Column positions in the pasted sheet
    pub columns: ColumnLayout,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            recall_excluded_status: DEFAULT_RECALL_EXCLUDED_STATUS.to_string(),
            lenient_matching: false,
            arrived_date: None,
            called_date: None,
            columns: ColumnLayout::default(),
        }
    }
}

impl ExtractorConfig {
    /// Use a custom column layout
    pub fn with_columns(mut self, columns: ColumnLayout) -> Self {
        self.columns = columns;
        self
    }

    /// Set the status excluded from re-call data
    pub fn with_recall_excluded_status(mut self, status: impl Into<String>) -> Self {
        self.recall_excluded_status = status.into();
        self
    }

    /// Enable substring fallback for bare statuses
    pub fn with_lenient_matching(mut self) -> Self {
        self.lenient_matching = true;
        self
    }

    /// Filter by arrival date
    pub fn with_arrived_date(mut self, date: impl Into<String>) -> Self {
        self.arrived_date = Some(date.into());
        self
    }

    /// Filter by call date
    pub fn with_called_date(mut self, date: impl Into<String>) -> Self {
        self.called_date = Some(date.into());
        self
    }

    /// Normalized arrival filter, if set
    pub fn arrived_filter(&self) -> Option<String> {
        normalized_filter(self.arrived_date.as_deref())
    }

    /// Normalized call filter, if set
    pub fn called_filter(&self) -> Option<String> {
        normalized_filter(self.called_date.as_deref())
    }

    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        self.columns.validate()?;

        for value in [&self.arrived_date, &self.called_date].into_iter().flatten() {
            if !value.trim().is_empty() && parse_date(value).is_none() {
                return Err(ExtractorError::invalid_date(value.clone()));
            }
        }

        Ok(())
    }

    /// Parse a TOML configuration document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Default config file location under the user config directory
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ExtractorError::configuration("Could not determine user config directory")
        })?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load with layered lookup: explicit file, then environment variable,
    /// then the default location, falling back to built-in defaults
    pub fn load_layered(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ExtractorError::configuration(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            return Self::load(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(env_path);
            if !path.exists() {
                return Err(ExtractorError::configuration(format!(
                    "{} points to a missing file: {}",
                    CONFIG_ENV_VAR,
                    path.display()
                )));
            }
            return Self::load(&path);
        }

        match Self::default_config_path() {
            Ok(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

fn normalized_filter(value: Option<&str>) -> Option<String> {
    value
        .map(normalize_date)
        .filter(|normalized| !normalized.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ExtractorConfig::default();
        assert_eq!(config.columns.status, 10);
        assert_eq!(config.columns.receiver, 4);
        assert_eq!(config.recall_excluded_status, DEFAULT_RECALL_EXCLUDED_STATUS);
        assert!(!config.lenient_matching);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = ExtractorConfig::default()
            .with_lenient_matching()
            .with_recall_excluded_status("")
            .with_arrived_date("5/2/2026")
            .with_called_date("2026-02-06");

        assert!(config.lenient_matching);
        assert!(config.recall_excluded_status.is_empty());
        assert_eq!(config.arrived_filter(), Some("05/02/2026".to_string()));
        assert_eq!(config.called_filter(), Some("06/02/2026".to_string()));
    }

    #[test]
    fn test_validate_rejects_shared_column() {
        let columns = ColumnLayout {
            receiver: 1,
            ..ColumnLayout::default()
        };
        let err = ExtractorConfig::default()
            .with_columns(columns)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("both use index 1"));
    }

    #[test]
    fn test_validate_rejects_bad_filter_date() {
        let err = ExtractorConfig::default()
            .with_arrived_date("someday")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ExtractorError::InvalidDate { .. }));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml_str(
            r#"
lenient_matching = true

[columns]
status = 12
"#,
        )
        .unwrap();

        assert!(config.lenient_matching);
        assert_eq!(config.columns.status, 12);
        assert_eq!(config.columns.arrived_at, DEFAULT_ARRIVED_AT_COLUMN);
        assert_eq!(config.recall_excluded_status, DEFAULT_RECALL_EXCLUDED_STATUS);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default().with_called_date("01/03/2026");
        let text = toml::to_string(&config).unwrap();
        assert_eq!(ExtractorConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_layered_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "recall_excluded_status = \"Delivered\"").unwrap();

        let config = ExtractorConfig::load_layered(Some(file.path())).unwrap();
        assert_eq!(config.recall_excluded_status, "Delivered");
    }

    #[test]
    fn test_load_layered_missing_explicit_file() {
        let result = ExtractorConfig::load_layered(Some(Path::new("/no/such/config.toml")));
        assert!(matches!(result, Err(ExtractorError::Configuration { .. })));
    }
}

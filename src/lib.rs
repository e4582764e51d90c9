//! Status Extractor Library
//!
//! Turns text pasted from a call-center delivery spreadsheet into per-status
//! call counts and a flat list of normalized call records.
//!
//! This library provides tools for:
//! - Classifying tab-separated rows as record rows or continuation rows
//! - Carrying the arrival date and receiver forward across continuation rows
//! - Normalizing `d/m/yyyy` and `yyyy-mm-dd` dates to `dd/mm/yyyy`
//! - Validating statuses against a whitelist by label or slug
//! - Zero-filled status counts and a suggested arrival date for data entry
//! - A grouped preview of the same records

pub mod config;
pub mod constants;
pub mod dates;
pub mod error;
pub mod extractor;
pub mod input;
pub mod models;
pub mod report;
pub mod whitelist;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{ColumnLayout, ExtractorConfig};
pub use error::{ExtractorError, Result};
pub use extractor::StatusExtractor;
pub use models::{
    ExtractionOutcome, ExtractionStats, FormEntries, Preview, ProcessedRecord, StatusDefinition,
};
pub use whitelist::{MatchMode, StatusWhitelist};

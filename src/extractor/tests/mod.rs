//! Test utilities for status extraction
//!
//! Helpers to build pasted rows in the delivery sheet layout and a fixed
//! whitelist and clock.

use chrono::NaiveDate;

use crate::config::ExtractorConfig;
use crate::constants::DEFAULT_RECALL_EXCLUDED_STATUS;
use crate::extractor::StatusExtractor;
use crate::models::StatusDefinition;
use crate::whitelist::StatusWhitelist;


/// Fixed "today" used by extractors built with [`create_test_extractor`]
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}

/// `test_today()` as `dd/mm/yyyy`
pub const TEST_TODAY: &str = "15/03/2026";

/// Whitelist with a Khmer delivered-home label and two English statuses
pub fn create_test_whitelist() -> StatusWhitelist {
    StatusWhitelist::new(vec![
        StatusDefinition::new("delivered-home", DEFAULT_RECALL_EXCLUDED_STATUS),
        StatusDefinition::new("no-answer", "No Answer"),
        StatusDefinition::new("call-back", "Call back"),
    ])
}

/// Extractor over the test whitelist with default config and a fixed clock
pub fn create_test_extractor() -> StatusExtractor {
    create_extractor_with(ExtractorConfig::default())
}

/// Extractor over the test whitelist with the given config and a fixed clock
pub fn create_extractor_with(config: ExtractorConfig) -> StatusExtractor {
    StatusExtractor::new(create_test_whitelist(), config).with_today(test_today())
}

/// Build an 11-column record row: sequence, arrival date, receiver, status
pub fn record_row(sequence: &str, arrived_at: &str, receiver: &str, status: &str) -> String {
    [
        sequence, arrived_at, "PKG", "Phnom Penh", receiver, "", "", "", "", "", status,
    ]
    .join("\t")
}

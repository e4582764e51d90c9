//! Core data structures for status extraction.
//!
//! Defines the status whitelist entry, the records produced by a parse,
//! per-status summaries, form entries and extraction statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One recognized call status, as served by the status backend
///
/// The backend also sends audit fields (`createdBy`, `createdAt`); they are
/// ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDefinition {
    pub key: String,
    pub label: String,
}

impl StatusDefinition {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// One validated status occurrence with normalized `dd/mm/yyyy` dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedRecord {
    pub arrived_at: String,
    pub receiver: String,
    pub called_at: String,
    /// Time of day from a dated status line, as written (`h:mm:ss`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub called_time: Option<String>,
    pub status: String,
}

/// Preview summary for one status: the first record's dates plus a count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub arrived_at: String,
    pub called_at: String,
    pub count: usize,
}

/// All records sharing one status, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusGroup {
    pub status: String,
    pub summary: StatusSummary,
    pub records: Vec<ProcessedRecord>,
}

/// Read-only breakdown of a paste, grouped by status in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub total_records: usize,
    pub groups: Vec<StatusGroup>,
}

impl Preview {
    /// Number of distinct statuses in the preview
    pub fn status_count(&self) -> usize {
        self.groups.len()
    }
}

/// Values handed to the data-entry form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormEntries {
    /// Status key to count, zero-filled for every whitelist key
    pub entries: BTreeMap<String, String>,
    /// Most common arrival date among the records, empty if none
    pub arrived_at: String,
}

/// Line-level statistics for a single extraction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Non-blank rows examined
    pub lines_seen: usize,

    /// Lines classified as record rows
    pub record_rows: usize,

    /// Lines classified as continuation rows
    pub continuation_rows: usize,

    /// Continuation rows skipped because no arrival date was known yet
    pub orphan_rows: usize,

    /// Status lines that matched neither pattern or failed validation
    pub ignored_lines: usize,

    /// Delivered-home statuses dropped on a later call day
    pub recall_exclusions: usize,

    /// Records dropped by the arrived/called date filters
    pub filtered_records: usize,

    /// Status text that was not in the whitelist, with occurrence counts
    pub unmatched: BTreeMap<String, usize>,
}

impl ExtractionStats {
    /// Total occurrences of statuses missing from the whitelist
    pub fn unmatched_total(&self) -> usize {
        self.unmatched.values().sum()
    }
}

/// Result of one extraction: the records plus how the input was read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    pub records: Vec<ProcessedRecord>,
    pub stats: ExtractionStats,
}

impl ExtractionOutcome {
    /// Whether the paste produced no records at all
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_definition_ignores_backend_audit_fields() {
        let json = r#"{"key":"no-answer","label":"No answer","createdBy":"admin","createdAt":"2026-01-01T00:00:00Z"}"#;
        let def: StatusDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def, StatusDefinition::new("no-answer", "No answer"));
    }

    #[test]
    fn test_form_entries_serialize_camel_case() {
        let mut entries = BTreeMap::new();
        entries.insert("status-a".to_string(), "1".to_string());
        let form = FormEntries {
            entries,
            arrived_at: "27/01/2026".to_string(),
        };

        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["entries"]["status-a"], "1");
        assert_eq!(json["arrivedAt"], "27/01/2026");
    }

    #[test]
    fn test_record_omits_missing_time() {
        let record = ProcessedRecord {
            arrived_at: "01/01/2026".to_string(),
            receiver: "Dara".to_string(),
            called_at: "01/01/2026".to_string(),
            called_time: None,
            status: "No answer".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("calledTime").is_none());
        assert_eq!(json["calledAt"], "01/01/2026");
    }

    #[test]
    fn test_unmatched_total() {
        let mut stats = ExtractionStats::default();
        stats.unmatched.insert("Typo".to_string(), 2);
        stats.unmatched.insert("Other".to_string(), 3);
        assert_eq!(stats.unmatched_total(), 5);
    }
}

//! Stateful extraction over pasted lines
//!
//! The pass is a fold: each line takes the current [`ParseState`] and
//! returns the next one, appending accepted records to the outcome. Record
//! rows may replace the arrival date and receiver; continuation rows inherit
//! them. Text is split into rows by [`split_rows`], so quoted multi-line
//! cells stay inside their row.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::aggregate::{aggregate, build_preview, most_common_arrived_at};
use super::classifier::{ContinuationRow, LineKind, RecordRow, classify_line};
use super::rows::split_rows;
use super::status_line::{StatusLine, parse_status_line, split_status_cell};
use crate::config::ExtractorConfig;
use crate::dates::{self, format_date, normalize_date};
use crate::models::{ExtractionOutcome, FormEntries, Preview, ProcessedRecord};
use crate::whitelist::{MatchMode, StatusWhitelist};

/// Values carried forward from the last record row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    pub current_arrived_at: String,
    pub current_receiver: String,
}

impl ParseState {
    /// State after reading a record row: a normalizable arrival date and a
    /// non-empty receiver replace the carried values
    pub fn advance(self, row: &RecordRow<'_>) -> Self {
        let arrived_at = normalize_date(row.arrived_at);
        Self {
            current_arrived_at: if arrived_at.is_empty() {
                self.current_arrived_at
            } else {
                arrived_at
            },
            current_receiver: if row.receiver.is_empty() {
                self.current_receiver
            } else {
                row.receiver.to_string()
            },
        }
    }
}

/// Candidate status occurrence before validation
struct Candidate<'a> {
    status: &'a str,
    mode: MatchMode,
    called_at: String,
    called_time: Option<String>,
    /// Whether a failed match belongs in `stats.unmatched`
    reportable: bool,
}

/// Extracts call status records from spreadsheet paste data
///
/// Holds only read-only inputs, so one extractor can serve any number of
/// calls; every call builds its own state.
#[derive(Debug, Clone)]
pub struct StatusExtractor {
    whitelist: StatusWhitelist,
    config: ExtractorConfig,
    today: Option<NaiveDate>,
    arrived_filter: Option<String>,
    called_filter: Option<String>,
}

impl StatusExtractor {
    /// Create an extractor for a whitelist and configuration
    pub fn new(whitelist: StatusWhitelist, config: ExtractorConfig) -> Self {
        let arrived_filter = config.arrived_filter();
        let called_filter = config.called_filter();
        Self {
            whitelist,
            config,
            today: None,
            arrived_filter,
            called_filter,
        }
    }

    /// Use a fixed date for bare statuses instead of the system clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn whitelist(&self) -> &StatusWhitelist {
        &self.whitelist
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Run one pass over the text and collect validated records
    ///
    /// Never fails: lines that cannot be read are skipped and counted.
    pub fn extract(&self, text: &str) -> ExtractionOutcome {
        let rows = split_rows(text);
        self.extract_rows(rows.iter().map(String::as_str))
    }

    /// Run one pass over rows that were already split, such as rows from a
    /// quote-aware reader whose status cells keep their embedded newlines
    pub fn extract_rows<'a>(&self, rows: impl IntoIterator<Item = &'a str>) -> ExtractionOutcome {
        let today = format_date(self.today.unwrap_or_else(dates::today));

        let (_, outcome) = rows
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .fold(
                (ParseState::default(), ExtractionOutcome::default()),
                |(state, mut outcome), line| {
                    let state = self.extract_line(state, line, &today, &mut outcome);
                    (state, outcome)
                },
            );

        info!(
            "Extracted {} records from {} rows ({} record rows, {} continuation rows)",
            outcome.records.len(),
            outcome.stats.lines_seen,
            outcome.stats.record_rows,
            outcome.stats.continuation_rows
        );

        if !outcome.stats.unmatched.is_empty() {
            warn!(
                "{} status occurrences were not in the whitelist: {}",
                outcome.stats.unmatched_total(),
                outcome
                    .stats
                    .unmatched
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        outcome
    }

    /// Extract and reduce to the values the data-entry form needs
    pub fn process(&self, text: &str) -> FormEntries {
        let outcome = self.extract(text);
        if outcome.is_empty() {
            warn!("No records found in pasted data");
        }
        self.form_entries(&outcome)
    }

    /// Extract and group for the read-only preview
    pub fn preview(&self, text: &str) -> Preview {
        build_preview(&self.extract(text).records)
    }

    /// Form values for an existing outcome
    pub fn form_entries(&self, outcome: &ExtractionOutcome) -> FormEntries {
        FormEntries {
            entries: aggregate(&outcome.records, &self.whitelist),
            arrived_at: most_common_arrived_at(&outcome.records),
        }
    }

    fn extract_line(
        &self,
        state: ParseState,
        line: &str,
        today: &str,
        outcome: &mut ExtractionOutcome,
    ) -> ParseState {
        outcome.stats.lines_seen += 1;

        match classify_line(line, &self.config.columns) {
            LineKind::Record(row) => {
                outcome.stats.record_rows += 1;
                let state = state.advance(&row);
                for sub_line in split_status_cell(row.status) {
                    self.apply_status_line(&state, sub_line, true, today, outcome);
                }
                state
            }
            LineKind::Continuation(ContinuationRow {
                status,
                has_other_cells,
            }) => {
                outcome.stats.continuation_rows += 1;
                if state.current_arrived_at.is_empty() {
                    debug!("Skipping line before any record row: {}", line.trim());
                    outcome.stats.orphan_rows += 1;
                } else {
                    // Bare text next to other cells is a stray sheet row
                    for sub_line in split_status_cell(status) {
                        self.apply_status_line(&state, sub_line, !has_other_cells, today, outcome);
                    }
                }
                state
            }
        }
    }

    fn apply_status_line(
        &self,
        state: &ParseState,
        text: &str,
        reportable: bool,
        today: &str,
        outcome: &mut ExtractionOutcome,
    ) {
        let candidate = match parse_status_line(text) {
            StatusLine::Empty => return,
            StatusLine::Dated {
                status,
                called_at,
                called_time,
            } => Candidate {
                status,
                mode: MatchMode::Exact,
                called_at,
                called_time: Some(called_time.to_string()),
                reportable: true,
            },
            StatusLine::Bare(status) => Candidate {
                status,
                mode: MatchMode::CaseInsensitive,
                called_at: today.to_string(),
                called_time: None,
                reportable,
            },
        };

        self.accept(state, candidate, outcome);
    }

    fn accept(&self, state: &ParseState, candidate: Candidate<'_>, outcome: &mut ExtractionOutcome) {
        let Some(status) = self.resolve_status(candidate.status, candidate.mode) else {
            outcome.stats.ignored_lines += 1;
            if candidate.reportable {
                *outcome
                    .stats
                    .unmatched
                    .entry(candidate.status.to_string())
                    .or_insert(0) += 1;
            }
            debug!("Ignoring unrecognized status: {}", candidate.status);
            return;
        };

        if self.is_recall_exclusion(state, &status, &candidate.called_at) {
            debug!(
                "Excluding re-call status '{}' called {} for arrival {}",
                candidate.status, candidate.called_at, state.current_arrived_at
            );
            outcome.stats.recall_exclusions += 1;
            return;
        }

        if !self.passes_filters(&state.current_arrived_at, &candidate.called_at) {
            outcome.stats.filtered_records += 1;
            return;
        }

        outcome.records.push(ProcessedRecord {
            arrived_at: state.current_arrived_at.clone(),
            receiver: state.current_receiver.clone(),
            called_at: candidate.called_at,
            called_time: candidate.called_time,
            status,
        });
    }

    /// Text to store for a recognized status, or `None` if unrecognized
    fn resolve_status(&self, status: &str, mode: MatchMode) -> Option<String> {
        if self.whitelist.is_valid(status, mode) {
            return Some(status.to_string());
        }

        if self.config.lenient_matching && mode == MatchMode::CaseInsensitive {
            return self
                .whitelist
                .find_containing(status)
                .map(|definition| definition.label.clone());
        }

        None
    }

    /// A delivered-home status on a call made after the arrival day
    fn is_recall_exclusion(&self, state: &ParseState, status: &str, called_at: &str) -> bool {
        let sentinel = self.config.recall_excluded_status.as_str();
        if sentinel.is_empty() || status != sentinel {
            return false;
        }

        let arrived_at = &state.current_arrived_at;
        !arrived_at.is_empty()
            && !called_at.is_empty()
            && normalize_date(arrived_at) != normalize_date(called_at)
    }

    fn passes_filters(&self, arrived_at: &str, called_at: &str) -> bool {
        if let Some(filter) = &self.arrived_filter {
            if normalize_date(arrived_at) != *filter {
                return false;
            }
        }

        if let Some(filter) = &self.called_filter {
            if normalize_date(called_at) != *filter {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_replaces_non_empty_values() {
        let state = ParseState {
            current_arrived_at: "01/01/2026".to_string(),
            current_receiver: "Old".to_string(),
        };
        let row = RecordRow {
            arrived_at: "2/1/2026 08:00:00",
            receiver: "New",
            status: "",
        };

        let next = state.advance(&row);
        assert_eq!(next.current_arrived_at, "02/01/2026");
        assert_eq!(next.current_receiver, "New");
    }

    #[test]
    fn test_advance_keeps_values_for_blank_or_bad_fields() {
        let state = ParseState {
            current_arrived_at: "01/01/2026".to_string(),
            current_receiver: "Old".to_string(),
        };
        let row = RecordRow {
            arrived_at: "pending",
            receiver: "",
            status: "",
        };

        assert_eq!(state.clone().advance(&row), state);
    }
}

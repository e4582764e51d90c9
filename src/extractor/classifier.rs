//! Line classification for pasted spreadsheet rows
//!
//! A record row starts a new parcel: its sequence column is a plain number
//! and the row reaches the status column. Every other line is a
//! continuation row, usually part of a multi-line status cell that was
//! flattened into separate lines by the paste. Only the first filled cell of
//! a continuation row is read as status text.

use crate::config::ColumnLayout;

/// Fields of a record row, trimmed; absent columns read as empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRow<'a> {
    pub arrived_at: &'a str,
    pub receiver: &'a str,
    pub status: &'a str,
}

/// Status text of a continuation row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuationRow<'a> {
    /// First non-empty cell, trimmed
    pub status: &'a str,
    /// Whether any later cell is filled too
    pub has_other_cells: bool,
}

/// Classification of one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Record(RecordRow<'a>),
    Continuation(ContinuationRow<'a>),
}

/// Classify a line by splitting it on tabs
pub fn classify_line<'a>(line: &'a str, layout: &ColumnLayout) -> LineKind<'a> {
    let columns: Vec<&str> = line.split('\t').collect();

    if columns.len() <= layout.status_index() {
        return continuation(&columns);
    }

    let sequence = column(&columns, layout.sequence);
    if !is_sequence_number(sequence) {
        return continuation(&columns);
    }

    LineKind::Record(RecordRow {
        arrived_at: column(&columns, layout.arrived_at),
        receiver: column(&columns, layout.receiver),
        status: column(&columns, layout.status),
    })
}

fn continuation<'a>(columns: &[&'a str]) -> LineKind<'a> {
    let mut filled = columns.iter().map(|c| c.trim()).filter(|c| !c.is_empty());
    let status = filled.next().unwrap_or("");
    LineKind::Continuation(ContinuationRow {
        status,
        has_other_cells: filled.next().is_some(),
    })
}

fn column<'a>(columns: &[&'a str], index: usize) -> &'a str {
    columns.get(index).map(|c| c.trim()).unwrap_or("")
}

fn is_sequence_number(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

//! Quote-aware splitting of pasted text into sheet rows
//!
//! Spreadsheet apps quote a cell that holds line breaks, so a status cell
//! with several call lines arrives as `"line one\nline two"`. Reading the
//! paste as tab-delimited CSV keeps such a cell inside its row, and columns
//! after it stay separate cells. A quote that is never closed swallows the
//! rows after it; when a cell ends up holding a tab the paste is split on
//! plain newlines instead.

use csv::ReaderBuilder;
use tracing::{debug, warn};

/// Split pasted text into rows, cells joined by tabs
pub fn split_rows(text: &str) -> Vec<String> {
    match read_quoted_rows(text) {
        Some(rows) => rows,
        None => {
            warn!("Unbalanced quotes in pasted data, reading it line by line");
            text.lines().map(str::to_string).collect()
        }
    }
}

fn read_quoted_rows(text: &str) -> Option<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!("Quote-aware read failed: {}", e);
                return None;
            }
        };

        if record.iter().any(|cell| cell.contains('\t')) {
            return None;
        }

        rows.push(record.iter().collect::<Vec<_>>().join("\t"));
    }

    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rows() {
        let rows = split_rows("1\ta\tb\nNo Answer\r\n\n2\tc");
        assert_eq!(rows, vec!["1\ta\tb", "No Answer", "2\tc"]);
    }

    #[test]
    fn test_quoted_cell_keeps_line_breaks() {
        let rows = split_rows("1\t\"Busy\nNo Answer\"\tnote\n2\tx");
        assert_eq!(rows, vec!["1\tBusy\nNo Answer\tnote", "2\tx"]);
    }

    #[test]
    fn test_doubled_quotes_are_unescaped() {
        let rows = split_rows("1\t\"say \"\"hi\"\"\nBusy\"");
        assert_eq!(rows, vec!["1\tsay \"hi\"\nBusy"]);
    }

    #[test]
    fn test_unclosed_quote_falls_back_to_lines() {
        let rows = split_rows("1\t\"Busy\n2\tx\tNo Answer");
        assert_eq!(rows, vec!["1\t\"Busy", "2\tx\tNo Answer"]);
    }

    #[test]
    fn test_unclosed_quote_without_tabs_keeps_lines_in_cell() {
        let rows = split_rows("\"Busy\nNo Answer");
        assert_eq!(rows, vec!["Busy\nNo Answer"]);
    }
}

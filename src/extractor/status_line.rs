//! Status-line parsing
//!
//! A status line is either `<status> <d/m/yyyy h:mm:ss>` or a bare status.
//! Spreadsheet cells copied with embedded newlines arrive wrapped in double
//! quotes, so quote characters around the line are dropped first.

use crate::dates::normalize_date;
use regex::Regex;
use std::sync::LazyLock;

static DATED_STATUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(.+?)\s+([0-9]{1,2}/[0-9]{1,2}/[0-9]{4})\s+([0-9]{1,2}:[0-9]{2}:[0-9]{2})$",
    )
    .expect("valid status line regex")
});

/// One parsed status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine<'a> {
    /// Status followed by the call date-time
    Dated {
        status: &'a str,
        /// Call date as `dd/mm/yyyy`
        called_at: String,
        /// Call time as written
        called_time: &'a str,
    },
    /// Status text with no date-time
    Bare(&'a str),
    /// Nothing left after trimming
    Empty,
}

/// Parse a single status line
pub fn parse_status_line(text: &str) -> StatusLine<'_> {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return StatusLine::Empty;
    }

    match DATED_STATUS.captures(cleaned) {
        Some(caps) => {
            let (Some(status), Some(date), Some(time)) = (caps.get(1), caps.get(2), caps.get(3))
            else {
                return StatusLine::Bare(cleaned);
            };
            StatusLine::Dated {
                status: status.as_str().trim(),
                called_at: normalize_date(date.as_str()),
                called_time: time.as_str(),
            }
        }
        None => StatusLine::Bare(cleaned),
    }
}

/// Split a status cell into its non-blank lines
pub fn split_status_cell(cell: &str) -> impl Iterator<Item = &str> {
    cell.lines().filter(|line| !clean(line).is_empty())
}

fn clean(text: &str) -> &str {
    text.trim().trim_matches('"').trim()
}

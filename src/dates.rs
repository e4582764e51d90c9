//! Date normalization for spreadsheet dates.
//!
//! Every date the extractor emits is canonical `dd/mm/yyyy`. Input may be
//! the spreadsheet's own `d/m/yyyy` (often with a time suffix) or ISO
//! `yyyy-mm-dd`. Normalization is purely textual; calendar validity is only
//! checked by [`parse_date`].

use crate::constants::CANONICAL_DATE_FORMAT;
use chrono::{Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})").expect("valid date regex"));

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{4})-([0-9]{2})-([0-9]{2})").expect("valid date regex"));

/// Normalize a date to `dd/mm/yyyy`, or return an empty string if the text
/// holds no recognizable date
pub fn normalize_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    if let Some(caps) = SLASH_DATE.captures(raw) {
        return format!("{:0>2}/{:0>2}/{}", &caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = ISO_DATE.captures(raw) {
        return format!("{}/{}/{}", &caps[3], &caps[2], &caps[1]);
    }

    String::new()
}

/// Render a calendar date as `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

/// Today's date from the local system clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse any supported date shape into a calendar date
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let normalized = normalize_date(raw);
    if normalized.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(&normalized, CANONICAL_DATE_FORMAT).ok()
}

//! Call status extraction from spreadsheet paste data
//!
//! Reads tab-separated rows copied from the delivery sheet and produces
//! validated call records. One pass feeds both consumers: the data-entry
//! form (zero-filled status counts plus a suggested arrival date) and the
//! preview table (records grouped by status).
//!
//! ## Architecture
//!
//! - [`rows`] - Quote-aware row splitting of the paste
//! - [`classifier`] - Record row versus continuation row
//! - [`status_line`] - `status + date-time` or bare status parsing
//! - [`parser`] - The stateful pass and validation rules
//! - [`aggregate`] - Counts, suggested arrival date and preview grouping
//!
//! ## Usage
//!
//! ```rust
//! use status_extractor::{ExtractorConfig, StatusDefinition, StatusExtractor, StatusWhitelist};
//!
//! let whitelist = StatusWhitelist::new(vec![StatusDefinition::new("busy", "Busy")]);
//! let extractor = StatusExtractor::new(whitelist, ExtractorConfig::default());
//!
//! let paste = "1\t27/01/2026\t\t\tDara\t\t\t\t\t\tBusy 27/01/2026 11:41:10";
//! let form = extractor.process(paste);
//!
//! assert_eq!(form.entries["busy"], "1");
//! assert_eq!(form.arrived_at, "27/01/2026");
//! ```

pub mod aggregate;
pub mod classifier;
pub mod parser;
pub mod rows;
pub mod status_line;

#[cfg(test)]
pub mod tests;

pub use aggregate::{aggregate, build_preview, group_by_status, most_common_arrived_at, summarize};
pub use classifier::{ContinuationRow, LineKind, RecordRow, classify_line};
pub use parser::{ParseState, StatusExtractor};
pub use rows::split_rows;
pub use status_line::{StatusLine, parse_status_line};

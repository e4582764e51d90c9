//! Application constants for the status extractor
//!
//! Default column positions, the re-call sentinel status, accepted input
//! file types and environment variable names.

// =============================================================================
// Spreadsheet Column Layout
// =============================================================================

/// Column A: running sequence number that marks a record row
pub const DEFAULT_SEQUENCE_COLUMN: usize = 0;

/// Column B: date the parcel arrived
pub const DEFAULT_ARRIVED_AT_COLUMN: usize = 1;

/// Column E: receiver name
pub const DEFAULT_RECEIVER_COLUMN: usize = 4;

/// Column K: call status, optionally followed by the call date-time
pub const DEFAULT_STATUS_COLUMN: usize = 10;

// =============================================================================
// Status Rules
// =============================================================================

/// "Delivered home". Dropped when it appears on a call made after the
/// arrival day.
pub const DEFAULT_RECALL_EXCLUDED_STATUS: &str = "ដឹកដល់ផ្ទះ";

/// Canonical date format used for every date the extractor emits
pub const CANONICAL_DATE_FORMAT: &str = "%d/%m/%Y";

// =============================================================================
// Input Handling
// =============================================================================

/// File extensions accepted as paste data
pub const ACCEPTED_INPUT_EXTENSIONS: &[&str] = &["txt", "csv", "tsv"];

/// Path argument that means "read from stdin"
pub const STDIN_MARKER: &str = "-";

/// Shown when a paste produced no records
pub const EMPTY_RESULT_MESSAGE: &str = "No valid data found in Column B, Column E, and Column K. Please check your spreadsheet format.";

// =============================================================================
// Configuration Locations
// =============================================================================

/// Directory name under the user config dir
pub const CONFIG_DIR_NAME: &str = "status-extractor";

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV_VAR: &str = "STATUS_EXTRACTOR_CONFIG";

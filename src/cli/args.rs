//! Command-line argument definitions
//!
//! Two subcommands share one argument set: `process` prints the data-entry
//! form values and `preview` prints records grouped by status.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ExtractorConfig;
use crate::dates::parse_date;
use crate::report::OutputFormat;

/// Extract call status counts from spreadsheet paste data
///
/// Reads tab-separated rows copied from a delivery sheet, validates each
/// call status against a whitelist and reports per-status counts.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "status-extractor",
    version,
    about = "Extract per-status call counts from spreadsheet paste data",
    long_about = "Reads tab-separated rows copied from a call-center delivery sheet, \
                  carries the arrival date and receiver across continuation rows, \
                  validates every call status against a whitelist and reports \
                  zero-filled per-status counts plus the most common arrival date."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print form values: per-status counts and the suggested arrival date
    Process(ExtractArgs),
    /// Print records grouped by status
    Preview(ExtractArgs),
}

/// Arguments shared by `process` and `preview`
#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
    /// Paste data: a .txt/.csv/.tsv file, a directory of them, or `-` for stdin
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Status whitelist file (JSON array or TOML with [[statuses]])
    #[arg(short = 's', long = "statuses", value_name = "FILE")]
    pub statuses: PathBuf,

    /// Configuration file
    ///
    /// If not specified, STATUS_EXTRACTOR_CONFIG is used, then the user
    /// config directory (status-extractor/config.toml).
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Keep only records that arrived on this date (dd/mm/yyyy or yyyy-mm-dd)
    #[arg(long = "arrived-date", value_name = "DATE")]
    pub arrived_date: Option<String>,

    /// Keep only records called on this date (dd/mm/yyyy or yyyy-mm-dd)
    #[arg(long = "called-date", value_name = "DATE")]
    pub called_date: Option<String>,

    /// Date to use for statuses without a call date (defaults to the system date)
    #[arg(long = "today", value_name = "DATE")]
    pub today: Option<String>,

    /// Accept bare statuses that contain, or are contained by, a whitelist label
    #[arg(long = "lenient")]
    pub lenient: bool,

    /// Status dropped on calls after the arrival day (empty string disables)
    #[arg(long = "recall-status", value_name = "STATUS")]
    pub recall_status: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long = "output-file", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Output format for results
    #[arg(short = 'f', long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Enable verbose logging (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl ExtractArgs {
    /// Get the log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// The fixed "today" date, if one was given
    pub fn parse_today(&self) -> Result<Option<NaiveDate>> {
        self.today
            .as_deref()
            .map(|raw| {
                parse_date(raw).with_context(|| {
                    format!("Invalid --today date '{}': expected dd/mm/yyyy or yyyy-mm-dd", raw)
                })
            })
            .transpose()
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut ExtractorConfig) {
        if let Some(date) = &self.arrived_date {
            config.arrived_date = Some(date.clone());
        }
        if let Some(date) = &self.called_date {
            config.called_date = Some(date.clone());
        }
        if let Some(status) = &self.recall_status {
            config.recall_excluded_status = status.clone();
        }
        if self.lenient {
            config.lenient_matching = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_extract(args: &[&str]) -> ExtractArgs {
        let parsed = Args::try_parse_from(args.iter().copied()).unwrap();
        match parsed.command {
            Some(Commands::Process(extract_args)) | Some(Commands::Preview(extract_args)) => {
                extract_args
            }
            None => panic!("expected a subcommand"),
        }
    }

    #[test]
    fn test_process_defaults() {
        let args = parse_extract(&["status-extractor", "process", "paste.txt", "-s", "statuses.json"]);

        assert_eq!(args.input, PathBuf::from("paste.txt"));
        assert_eq!(args.statuses, PathBuf::from("statuses.json"));
        assert_eq!(args.format, OutputFormat::Human);
        assert!(!args.lenient);
        assert_eq!(args.get_log_level(), "warn");
    }

    #[test]
    fn test_preview_with_flags() {
        let args = parse_extract(&[
            "status-extractor",
            "preview",
            "-",
            "--statuses",
            "statuses.toml",
            "--format",
            "json",
            "--arrived-date",
            "2026-01-27",
            "--lenient",
            "-vv",
        ]);

        assert_eq!(args.input, PathBuf::from("-"));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.arrived_date.as_deref(), Some("2026-01-27"));
        assert!(args.lenient);
        assert_eq!(args.get_log_level(), "debug");
    }

    #[test]
    fn test_statuses_is_required() {
        let result = Args::try_parse_from(["status-extractor", "process", "paste.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from([
            "status-extractor",
            "process",
            "paste.txt",
            "-s",
            "s.json",
            "-q",
            "-v",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let args = Args::try_parse_from(["status-extractor"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_parse_today() {
        let args = parse_extract(&[
            "status-extractor",
            "process",
            "p.txt",
            "-s",
            "s.json",
            "--today",
            "5/3/2026",
        ]);
        assert_eq!(
            args.parse_today().unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 5)
        );

        let args = parse_extract(&[
            "status-extractor",
            "process",
            "p.txt",
            "-s",
            "s.json",
            "--today",
            "someday",
        ]);
        assert!(args.parse_today().is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let args = parse_extract(&[
            "status-extractor",
            "process",
            "p.txt",
            "-s",
            "s.json",
            "--called-date",
            "01/02/2026",
            "--recall-status",
            "",
            "--lenient",
        ]);

        let mut config = ExtractorConfig::default().with_arrived_date("27/01/2026");
        args.apply_overrides(&mut config);

        assert_eq!(config.arrived_date.as_deref(), Some("27/01/2026"));
        assert_eq!(config.called_date.as_deref(), Some("01/02/2026"));
        assert_eq!(config.recall_excluded_status, "");
        assert!(config.lenient_matching);
    }
}

//! Rendering of extraction results
//!
//! Each view renders to a `String` in one of three formats so the command
//! layer only decides where the text goes.

use colored::*;

use crate::constants::EMPTY_RESULT_MESSAGE;
use crate::error::Result;
use crate::models::{ExtractionStats, FormEntries, Preview};
use crate::whitelist::StatusWhitelist;

/// Output format for rendered results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for spreadsheets
    Csv,
}

/// Render the form values
pub fn render_form(
    form: &FormEntries,
    whitelist: &StatusWhitelist,
    stats: &ExtractionStats,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human_form(form, whitelist, stats)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(form)?),
        OutputFormat::Csv => Ok(csv_form(form, whitelist)),
    }
}

/// Render the grouped preview
pub fn render_preview(
    preview: &Preview,
    stats: &ExtractionStats,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human_preview(preview, stats)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(preview)?),
        OutputFormat::Csv => Ok(csv_preview(preview)),
    }
}

fn human_form(form: &FormEntries, whitelist: &StatusWhitelist, stats: &ExtractionStats) -> String {
    let mut output = format!(
        "{}\n{}\n",
        "📋 Call Status Counts".bright_green().bold(),
        "====================="
    );

    let total: usize = form
        .entries
        .values()
        .filter_map(|count| count.parse::<usize>().ok())
        .sum();

    if total == 0 {
        output.push_str(&format!("\n{}\n", EMPTY_RESULT_MESSAGE.yellow()));
    } else {
        output.push_str(&format!(
            "📅 Arrived At: {}\n\n",
            form.arrived_at.bright_cyan()
        ));
    }

    let width = whitelist
        .statuses()
        .iter()
        .map(|status| status.label.chars().count())
        .max()
        .unwrap_or(0);

    for status in whitelist.statuses() {
        let count = form.entries.get(&status.key).map_or("0", String::as_str);
        let padding = width.saturating_sub(status.label.chars().count());
        let count = if count == "0" {
            count.bright_black()
        } else {
            count.bright_yellow().bold()
        };
        output.push_str(&format!(
            "  {}{}  {}  {}\n",
            status.label,
            " ".repeat(padding),
            count,
            format!("({})", status.key).bright_black()
        ));
    }

    output.push('\n');
    output.push_str(&human_stats(stats));
    output
}

fn human_preview(preview: &Preview, stats: &ExtractionStats) -> String {
    let mut output = format!(
        "{}\n{}\n",
        "🔎 Status Preview".bright_green().bold(),
        "================="
    );

    if preview.groups.is_empty() {
        output.push_str(&format!("\n{}\n\n", EMPTY_RESULT_MESSAGE.yellow()));
        output.push_str(&human_stats(stats));
        return output;
    }

    output.push_str(&format!(
        "📄 Total Records: {}\n🏷️  Statuses: {}\n\n",
        preview.total_records,
        preview.status_count()
    ));

    for group in &preview.groups {
        output.push_str(&format!(
            "{} {}\n",
            group.status.bright_cyan().bold(),
            format!(
                "({} records, arrived {}, called {})",
                group.summary.count, group.summary.arrived_at, group.summary.called_at
            )
            .bright_black()
        ));

        for record in &group.records {
            let called = match &record.called_time {
                Some(time) => format!("{} {}", record.called_at, time),
                None => record.called_at.clone(),
            };
            output.push_str(&format!(
                "    {}  {}  {}\n",
                record.arrived_at, called, record.receiver
            ));
        }
        output.push('\n');
    }

    output.push_str(&human_stats(stats));
    output
}

fn human_stats(stats: &ExtractionStats) -> String {
    let mut output = format!(
        "Lines: {} ({} record rows, {} continuation rows)\n",
        stats.lines_seen, stats.record_rows, stats.continuation_rows
    );

    let skipped = [
        ("ignored", stats.ignored_lines),
        ("re-call exclusions", stats.recall_exclusions),
        ("filtered", stats.filtered_records),
        ("before first record row", stats.orphan_rows),
    ];
    let skipped: Vec<String> = skipped
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(name, count)| format!("{} {}", count, name))
        .collect();
    if !skipped.is_empty() {
        output.push_str(&format!("Skipped: {}\n", skipped.join(", ")));
    }

    if !stats.unmatched.is_empty() {
        output.push_str(&format!(
            "{}\n",
            format!("⚠️  Not in whitelist ({}):", stats.unmatched_total()).yellow()
        ));
        for (status, count) in &stats.unmatched {
            output.push_str(&format!("    {} x{}\n", status, count));
        }
    }

    output
}

fn csv_form(form: &FormEntries, whitelist: &StatusWhitelist) -> String {
    let mut csv = String::from("key,label,count\n");
    for status in whitelist.statuses() {
        let count = form.entries.get(&status.key).map_or("0", String::as_str);
        csv.push_str(&format!(
            "{},{},{}\n",
            csv_escape(&status.key),
            csv_escape(&status.label),
            count
        ));
    }
    csv
}

fn csv_preview(preview: &Preview) -> String {
    let mut csv = String::from("status,arrived_at,receiver,called_at,called_time\n");
    for group in &preview.groups {
        for record in &group.records {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                csv_escape(&record.status),
                record.arrived_at,
                csv_escape(&record.receiver),
                record.called_at,
                record.called_time.as_deref().unwrap_or("")
            ));
        }
    }
    csv
}

/// Escape CSV field values
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::build_preview;
    use crate::models::{ProcessedRecord, StatusDefinition};
    use std::collections::BTreeMap;

    fn create_test_whitelist() -> StatusWhitelist {
        StatusWhitelist::new(vec![
            StatusDefinition::new("no-answer", "No Answer"),
            StatusDefinition::new("call-back", "Call back, later"),
        ])
    }

    fn create_test_form(no_answer: &str) -> FormEntries {
        let mut entries = BTreeMap::new();
        entries.insert("no-answer".to_string(), no_answer.to_string());
        entries.insert("call-back".to_string(), "0".to_string());
        FormEntries {
            entries,
            arrived_at: if no_answer == "0" {
                String::new()
            } else {
                "27/01/2026".to_string()
            },
        }
    }

    fn create_test_record(status: &str, receiver: &str) -> ProcessedRecord {
        ProcessedRecord {
            arrived_at: "27/01/2026".to_string(),
            receiver: receiver.to_string(),
            called_at: "27/01/2026".to_string(),
            called_time: Some("11:41:10".to_string()),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("simple"), "simple");
        assert_eq!(csv_escape("with,comma"), "\"with,comma\"");
        assert_eq!(csv_escape("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_json_form_shape() {
        let form = create_test_form("3");
        let json = render_form(
            &form,
            &create_test_whitelist(),
            &ExtractionStats::default(),
            OutputFormat::Json,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["entries"]["no-answer"], "3");
        assert_eq!(value["entries"]["call-back"], "0");
        assert_eq!(value["arrivedAt"], "27/01/2026");
    }

    #[test]
    fn test_csv_form_follows_whitelist_order() {
        let csv = render_form(
            &create_test_form("2"),
            &create_test_whitelist(),
            &ExtractionStats::default(),
            OutputFormat::Csv,
        )
        .unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "key,label,count");
        assert_eq!(lines[1], "no-answer,No Answer,2");
        assert_eq!(lines[2], "call-back,\"Call back, later\",0");
    }

    #[test]
    fn test_human_form_empty_state() {
        let output = render_form(
            &create_test_form("0"),
            &create_test_whitelist(),
            &ExtractionStats::default(),
            OutputFormat::Human,
        )
        .unwrap();

        assert!(output.contains(EMPTY_RESULT_MESSAGE));
    }

    #[test]
    fn test_human_form_lists_unmatched() {
        let mut stats = ExtractionStats::default();
        stats.unmatched.insert("Wrong Number".to_string(), 2);

        let output = render_form(
            &create_test_form("1"),
            &create_test_whitelist(),
            &stats,
            OutputFormat::Human,
        )
        .unwrap();

        assert!(output.contains("No Answer"));
        assert!(output.contains("Wrong Number x2"));
        assert!(!output.contains(EMPTY_RESULT_MESSAGE));
    }

    #[test]
    fn test_csv_preview_rows() {
        let preview = build_preview(&[
            create_test_record("No Answer", "Dara"),
            create_test_record("No Answer", "Sok, Vanna"),
        ]);

        let csv = render_preview(&preview, &ExtractionStats::default(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "No Answer,27/01/2026,Dara,27/01/2026,11:41:10");
        assert_eq!(
            lines[2],
            "No Answer,27/01/2026,\"Sok, Vanna\",27/01/2026,11:41:10"
        );
    }

    #[test]
    fn test_json_preview_shape() {
        let preview = build_preview(&[create_test_record("No Answer", "Dara")]);
        let json =
            render_preview(&preview, &ExtractionStats::default(), OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalRecords"], 1);
        assert_eq!(value["groups"][0]["summary"]["calledAt"], "27/01/2026");
        assert_eq!(value["groups"][0]["records"][0]["calledTime"], "11:41:10");
    }
}

//! Aggregation of extracted records
//!
//! Turns the flat record list into the form's status counts, the suggested
//! arrival date and the grouped preview. All groupings keep first-seen order.

use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{Preview, ProcessedRecord, StatusGroup, StatusSummary};
use crate::whitelist::StatusWhitelist;

/// Count records per whitelist key
///
/// Every whitelist key is present, zero-filled, so a form fed from this map
/// always overwrites stale values. Labels resolve by case-insensitive label
/// and then by slug; spellings that resolve to the same key are summed.
pub fn aggregate(
    records: &[ProcessedRecord],
    whitelist: &StatusWhitelist,
) -> BTreeMap<String, String> {
    let mut entries: BTreeMap<String, String> = whitelist
        .keys()
        .map(|key| (key.to_string(), "0".to_string()))
        .collect();

    let mut per_key: BTreeMap<&str, usize> = BTreeMap::new();
    for (label, count) in count_in_order(records.iter().map(|r| r.status.as_str())) {
        match whitelist.resolve_key(label) {
            Some(key) => *per_key.entry(key).or_insert(0) += count,
            None => debug!("Dropping {} occurrences of unknown status '{}'", count, label),
        }
    }

    for (key, count) in per_key {
        entries.insert(key.to_string(), count.to_string());
    }

    entries
}

/// Most frequent non-empty arrival date; ties go to the first value seen
pub fn most_common_arrived_at(records: &[ProcessedRecord]) -> String {
    let counts = count_in_order(
        records
            .iter()
            .map(|r| r.arrived_at.as_str())
            .filter(|arrived_at| !arrived_at.is_empty()),
    );

    let mut best = "";
    let mut best_count = 0;
    for (arrived_at, count) in counts {
        if count > best_count {
            best = arrived_at;
            best_count = count;
        }
    }

    best.to_string()
}

/// Per-status summary holding the first record's dates
pub fn summarize(records: &[ProcessedRecord]) -> Vec<(String, StatusSummary)> {
    group_by_status(records)
        .into_iter()
        .map(|(status, group)| {
            let summary = summary_for(&group);
            (status, summary)
        })
        .collect()
}

/// Records grouped by status
pub fn group_by_status(records: &[ProcessedRecord]) -> Vec<(String, Vec<ProcessedRecord>)> {
    let mut groups: Vec<(String, Vec<ProcessedRecord>)> = Vec::new();

    for record in records {
        match groups.iter_mut().find(|(status, _)| *status == record.status) {
            Some((_, group)) => group.push(record.clone()),
            None => groups.push((record.status.clone(), vec![record.clone()])),
        }
    }

    groups
}

/// Build the preview view from the same records the form uses
pub fn build_preview(records: &[ProcessedRecord]) -> Preview {
    let groups = group_by_status(records)
        .into_iter()
        .map(|(status, records)| StatusGroup {
            summary: summary_for(&records),
            status,
            records,
        })
        .collect();

    Preview {
        total_records: records.len(),
        groups,
    }
}

fn summary_for(group: &[ProcessedRecord]) -> StatusSummary {
    let first = group.first();
    StatusSummary {
        arrived_at: first.map(|r| r.arrived_at.clone()).unwrap_or_default(),
        called_at: first.map(|r| r.called_at.clone()).unwrap_or_default(),
        count: group.len(),
    }
}

/// Occurrence counts in first-seen order
fn count_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    counts
}

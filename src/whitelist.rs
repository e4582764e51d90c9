//! Status whitelist loading and matching.
//!
//! The whitelist is the set of call statuses the backend recognizes. A
//! candidate status from the spreadsheet is accepted when its text equals a
//! label, or when its slug equals a key.

use crate::error::{ExtractorError, Result};
use crate::models::StatusDefinition;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// How labels are compared against a candidate status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Label must match exactly (dated status lines)
    Exact,
    /// Label compared ignoring case (bare status lines)
    CaseInsensitive,
}

/// Derive a key-style slug: lowercase, runs outside `[a-z0-9]` collapsed to
/// a single `-`, no leading or trailing `-`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[derive(Deserialize)]
struct TomlWhitelist {
    statuses: Vec<StatusDefinition>,
}

/// Ordered set of recognized statuses, read-only for the duration of a parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusWhitelist {
    statuses: Vec<StatusDefinition>,
}

impl StatusWhitelist {
    pub fn new(statuses: Vec<StatusDefinition>) -> Self {
        Self { statuses }
    }

    /// Parse the backend's JSON array of status definitions
    pub fn from_json_str(content: &str) -> Result<Self> {
        let statuses: Vec<StatusDefinition> = serde_json::from_str(content)?;
        Ok(Self::new(statuses))
    }

    /// Parse a TOML document with `[[statuses]]` tables
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let parsed: TomlWhitelist = toml::from_str(content)?;
        Ok(Self::new(parsed.statuses))
    }

    /// Load a whitelist file; `.toml` files are read as TOML, anything else as JSON
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ExtractorError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let whitelist = if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
        .map_err(|e| ExtractorError::invalid_whitelist(path, e.to_string()))?;

        whitelist
            .check()
            .map_err(|reason| ExtractorError::invalid_whitelist(path, reason))?;

        debug!(
            "Loaded {} statuses from {}",
            whitelist.len(),
            path.display()
        );
        Ok(whitelist)
    }

    /// Reject empty or duplicate keys
    pub fn check(&self) -> std::result::Result<(), String> {
        let mut seen = HashSet::new();
        for status in &self.statuses {
            if status.key.trim().is_empty() {
                return Err(format!("status '{}' has an empty key", status.label));
            }
            if !seen.insert(status.key.as_str()) {
                return Err(format!("duplicate status key '{}'", status.key));
            }
        }
        Ok(())
    }

    pub fn statuses(&self) -> &[StatusDefinition] {
        &self.statuses
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.statuses.iter().map(|s| s.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Whether a candidate status is recognized
    pub fn is_valid(&self, candidate: &str, mode: MatchMode) -> bool {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return false;
        }

        let label_hit = match mode {
            MatchMode::Exact => self.statuses.iter().any(|s| s.label == candidate),
            MatchMode::CaseInsensitive => {
                let lowered = candidate.to_lowercase();
                self.statuses
                    .iter()
                    .any(|s| s.label.to_lowercase() == lowered)
            }
        };

        label_hit || self.has_key(&slugify(candidate))
    }

    /// Find a status whose label contains the candidate or is contained by it
    pub fn find_containing(&self, candidate: &str) -> Option<&StatusDefinition> {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return None;
        }
        self.statuses.iter().find(|s| {
            !s.label.is_empty() && (s.label.contains(candidate) || candidate.contains(&s.label))
        })
    }

    /// Resolve an observed label to its key: case-insensitive label first,
    /// then the label's slug as a key
    pub fn resolve_key(&self, label: &str) -> Option<&str> {
        let lowered = label.to_lowercase();
        if let Some(status) = self
            .statuses
            .iter()
            .find(|s| s.label.to_lowercase() == lowered)
        {
            return Some(status.key.as_str());
        }

        let slug = slugify(label);
        self.statuses
            .iter()
            .find(|s| !slug.is_empty() && s.key == slug)
            .map(|s| s.key.as_str())
    }

    fn has_key(&self, slug: &str) -> bool {
        !slug.is_empty() && self.statuses.iter().any(|s| s.key == slug)
    }
}

impl From<Vec<StatusDefinition>> for StatusWhitelist {
    fn from(statuses: Vec<StatusDefinition>) -> Self {
        Self::new(statuses)
    }
}

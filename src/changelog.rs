//! Changelog data.
//!
//! Read from `changelog.json` in the content root:
//!
//! ```json
//! {
//!   "upcoming": [{ "text": "Module: Data visualization" }],
//!   "inProgress": [{ "text": "Template: Magic Store" }],
//!   "entries": [
//!     {
//!       "date": "2025-03-09",
//!       "title": "New Template",
//!       "items": [
//!         { "text": "New template: Magic Docs", "link": "/templates/magic-docs", "type": "add" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Entries come back newest first. `displayDate` is optional and derived
//! from `date` (`"Mar 9"`) when left out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CHANGELOG_FILE: &str = "changelog.json";

#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid changelog in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("entry \"{title}\" has invalid date \"{date}\", expected YYYY-MM-DD")]
    Date { title: String, date: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Add,
    Update,
    Fix,
    Remove,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Add => "add",
            ChangeKind::Update => "update",
            ChangeKind::Fix => "fix",
            ChangeKind::Remove => "remove",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(rename = "type")]
    pub kind: ChangeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogEntry {
    /// `YYYY-MM-DD`; doubles as the entry's anchor id.
    pub date: String,
    #[serde(default)]
    pub display_date: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<ChangelogItem>,
}

/// A roadmap-style teaser line without date or link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedItem {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Changelog {
    pub upcoming: Vec<PlannedItem>,
    pub in_progress: Vec<PlannedItem>,
    pub entries: Vec<ChangelogEntry>,
}

impl Changelog {
    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.in_progress.is_empty() && self.entries.is_empty()
    }
}

/// `"2025-03-09"` → `"Mar 9"`
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

fn parse_entry_date(entry: &ChangelogEntry) -> Result<NaiveDate, ChangelogError> {
    NaiveDate::parse_from_str(entry.date.trim(), "%Y-%m-%d").map_err(|_| ChangelogError::Date {
        title: entry.title.clone(),
        date: entry.date.clone(),
    })
}

/// Validate dates, fill in display dates and order entries newest first.
///
/// Entries sharing a date keep their file order.
pub fn normalize(mut changelog: Changelog) -> Result<Changelog, ChangelogError> {
    let mut dated = Vec::with_capacity(changelog.entries.len());
    for mut entry in changelog.entries {
        let date = parse_entry_date(&entry)?;
        if entry.display_date.trim().is_empty() {
            entry.display_date = display_date(date);
        }
        dated.push((date, entry));
    }
    dated.sort_by(|a, b| b.0.cmp(&a.0));
    changelog.entries = dated.into_iter().map(|(_, entry)| entry).collect();
    Ok(changelog)
}

/// Load `changelog.json` from the content root.
///
/// A missing file is an empty changelog.
pub fn load_changelog(root: &Path) -> Result<Changelog, ChangelogError> {
    let path = root.join(CHANGELOG_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Changelog::default()),
        Err(source) => return Err(ChangelogError::Io { path, source }),
    };
    let changelog: Changelog =
        serde_json::from_str(&content).map_err(|source| ChangelogError::Json {
            path: path.clone(),
            source,
        })?;
    normalize(changelog)
}

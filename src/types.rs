//! Shared types produced by the content indexer.
//!
//! Every query (`list_pages`, `sort_pages`, adjacency, sections, navigation)
//! speaks in these types. They serialize to JSON for the `index` command.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color scheme hint for a navigation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagVariant {
    Brand,
    Accent,
    Neutral,
    Success,
    Info,
    Danger,
    Gradient,
}

/// Descriptive metadata taken from a page's front matter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Empty when the front matter has no `title`.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    /// Resolved order: front matter first, then the directory `meta.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// One content file discovered under the content root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Path relative to the content root, extension stripped, `/`-separated.
    pub slug: String,
    /// Body text after the front-matter block.
    pub content: String,
    pub metadata: PageMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_tag_variant: Option<TagVariant>,
}

impl PageRecord {
    /// First slug segment. A top-level page is its own section.
    pub fn section(&self) -> &str {
        section_of(&self.slug)
    }

    /// True when the slug has no path separator.
    pub fn is_top_level(&self) -> bool {
        !self.slug.contains('/')
    }
}

/// First segment of a slug.
pub fn section_of(slug: &str) -> &str {
    slug.split('/').next().unwrap_or(slug)
}

/// Ordering strategy for page listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    /// Explicit order ascending, unordered pages after, slug as fallback.
    #[default]
    Order,
    /// Title ascending.
    Alphabetical,
    /// Most recently updated first.
    Date,
    /// Grouped by section, explicit order inside each section.
    Section,
}

impl SortType {
    pub fn as_str(self) -> &'static str {
        match self {
            SortType::Order => "order",
            SortType::Alphabetical => "alphabetical",
            SortType::Date => "date",
            SortType::Section => "section",
        }
    }
}

impl fmt::Display for SortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortType(pub String);

impl fmt::Display for UnknownSortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown sort type '{}' (expected order, alphabetical, date or section)",
            self.0
        )
    }
}

impl std::error::Error for UnknownSortType {}

impl FromStr for SortType {
    type Err = UnknownSortType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "order" => Ok(SortType::Order),
            "alphabetical" => Ok(SortType::Alphabetical),
            "date" => Ok(SortType::Date),
            "section" => Ok(SortType::Section),
            other => Err(UnknownSortType(other.to_string())),
        }
    }
}

/// Previous/next neighbours of a page. Both `None` when unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Adjacent {
    pub previous: Option<PageRecord>,
    pub next: Option<PageRecord>,
}

/// Pages sharing a first slug segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub section: String,
    pub pages: Vec<PageRecord>,
}

/// Sidebar tree node. Groups have children, pages don't.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    /// Page slug, or the group's path relative to the content root.
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_tag_variant: Option<TagVariant>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

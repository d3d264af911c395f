//! Centralized slug and label handling.
//!
//! Every content file is addressed by its slug: the path relative to the
//! content root with the extension stripped and separators normalized to `/`.
//! The same slug segments double as display labels once dashes become
//! spaces:
//!
//! - `get-started/installation.mdx` → slug `get-started/installation`
//! - section `get-started` → label "Get Started"
//! - breadcrumb for `components/forms/input` → ["Components", "Forms"]

use std::path::{Component, Path};

/// Build a slug from a path relative to the content root.
///
/// Only the final component loses its extension; dotted directory names are
/// kept intact.
pub fn slug_from_relative(rel: &Path) -> String {
    let mut parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if let Some(last) = parts.last_mut()
        && let Some(stem) = Path::new(last.as_str()).file_stem()
    {
        *last = stem.to_string_lossy().into_owned();
    }
    parts.join("/")
}

/// Title-case a slug segment: dashes become spaces, each word capitalized,
/// the rest of each word lowercased.
///
/// - `"get-started"` → `"Get Started"`
/// - `"API-reference"` → `"Api Reference"`
pub fn title_case(segment: &str) -> String {
    segment
        .replace('-', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalize the first letter of each dash-separated word, keeping the rest.
fn capitalize_words(segment: &str) -> String {
    segment
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parent segments of a slug as display labels. Empty for top-level pages.
///
/// `"components/data-display/table"` → `["Components", "Data Display"]`
pub fn breadcrumb(slug: &str) -> Vec<String> {
    let parts: Vec<&str> = slug.split('/').collect();
    parts[..parts.len() - 1]
        .iter()
        .map(|p| capitalize_words(p))
        .collect()
}

/// Turn heading text into a URL fragment id.
///
/// - Lowercases, keeps letters and digits
/// - Whitespace, dashes and underscores become single dashes
/// - Other punctuation is dropped
/// - Leading and trailing dashes are stripped
pub fn heading_anchor(text: &str) -> String {
    let mut anchor = String::with_capacity(text.len());
    let mut prev_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            anchor.extend(c.to_lowercase());
            prev_dash = false;
        } else if (c.is_whitespace() || c == '-' || c == '_') && !prev_dash {
            anchor.push('-');
            prev_dash = true;
        }
    }
    anchor.trim_matches('-').to_string()
}

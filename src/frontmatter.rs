//! Front-matter parsing for content files.
//!
//! A content file may open with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Installation
//! summary: Get the toolkit running locally
//! updatedAt: 2025-02-01
//! order: 2
//! tag: New
//! navTagVariant: success
//! ---
//! Body text handed to the renderer untouched.
//! ```
//!
//! Parsing is a pure function from raw text to `(FrontMatter, body)`. A file
//! that does not start with a fence has no front matter: every field takes
//! its default and the whole text is the body.

use crate::types::TagVariant;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front matter opened with '---' but never closed")]
    Unterminated,
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Typed view of a front-matter block.
///
/// Keys follow the content authors' camelCase convention. Keys this struct
/// doesn't know are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub image: Option<String>,
    #[serde(rename = "updatedAt", deserialize_with = "scalar_string")]
    pub updated_at: Option<String>,
    #[serde(rename = "publishedAt", deserialize_with = "scalar_string")]
    pub published_at: Option<String>,
    /// Raw `order` value; see [`FrontMatter::order`].
    #[serde(rename = "order")]
    pub raw_order: Option<serde_yaml::Value>,
    #[serde(alias = "navTag", deserialize_with = "scalar_string")]
    pub tag: Option<String>,
    #[serde(rename = "tagLabel", alias = "navLabel", deserialize_with = "scalar_string")]
    pub tag_label: Option<String>,
    #[serde(rename = "navIcon", deserialize_with = "scalar_string")]
    pub nav_icon: Option<String>,
    #[serde(rename = "navTagVariant")]
    pub nav_tag_variant: Option<TagVariant>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Interpret the `order` key.
    ///
    /// Integers and numeric strings (`"3"`, `3.0`) are accepted. Anything
    /// else is an error message; the caller decides whether to drop it.
    pub fn order(&self) -> Result<Option<i64>, String> {
        match &self.raw_order {
            None | Some(serde_yaml::Value::Null) => Ok(None),
            Some(serde_yaml::Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    Ok(Some(i))
                } else {
                    n.as_f64()
                        .and_then(integral)
                        .map(Some)
                        .ok_or_else(|| format!("order {n} is not an integer"))
                }
            }
            Some(serde_yaml::Value::String(s)) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral))
                    .map(Some)
                    .ok_or_else(|| format!("order '{s}' is not a number"))
            }
            Some(other) => Err(format!("order must be a number, found {other:?}")),
        }
    }
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

/// Accept any YAML scalar where a string is expected.
///
/// Authors write `title: 2025` or `tag: yes` without quotes; those are
/// still meant as text.
fn scalar_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Option::<serde_yaml::Value>::deserialize(d)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_yaml::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar, found {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

/// A content file split into metadata and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub front_matter: FrontMatter,
    pub body: String,
}

/// Split raw text into the YAML block (if any) and the body.
pub fn split_front_matter(raw: &str) -> Result<(Option<&str>, &str), FrontMatterError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some(first_end) = raw.find('\n') else {
        return if is_fence(raw) {
            Err(FrontMatterError::Unterminated)
        } else {
            Ok((None, raw))
        };
    };
    if !is_fence(&raw[..first_end]) {
        return Ok((None, raw));
    }

    let block_start = first_end + 1;
    let mut pos = block_start;
    while pos <= raw.len() {
        let line_end = raw[pos..].find('\n').map(|i| pos + i);
        let line = &raw[pos..line_end.unwrap_or(raw.len())];
        if is_fence(line) || line.trim_end() == "..." {
            let body = match line_end {
                Some(end) => &raw[end + 1..],
                None => "",
            };
            return Ok((Some(&raw[block_start..pos]), body));
        }
        match line_end {
            Some(end) => pos = end + 1,
            None => break,
        }
    }
    Err(FrontMatterError::Unterminated)
}

/// Only blank lines and comments: an empty YAML stream.
fn is_blank_yaml(yaml: &str) -> bool {
    yaml.lines().map(str::trim).all(|l| l.is_empty() || l.starts_with('#'))
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == "---"
}

/// Parse a content file into typed front matter and body.
pub fn parse_front_matter(raw: &str) -> Result<ParsedDocument, FrontMatterError> {
    let (block, body) = split_front_matter(raw)?;

    let front_matter = match block {
        None => FrontMatter::default(),
        Some(yaml) if is_blank_yaml(yaml) => FrontMatter::default(),
        Some(yaml) => match serde_yaml::from_str::<serde_yaml::Value>(yaml)? {
            serde_yaml::Value::Null => FrontMatter::default(),
            value @ serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value)?,
            other => return Err(FrontMatterError::NotAMapping(value_kind(&other))),
        },
    };

    Ok(ParsedDocument {
        front_matter,
        body: body.to_string(),
    })
}

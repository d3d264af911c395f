//! Page ordering strategies.
//!
//! [`sort_pages`] never mutates its input; it returns a sorted copy. All
//! comparisons end in a slug tie-break so that repeated calls over the same
//! content produce identical output regardless of directory iteration order.

use crate::types::{PageRecord, SortType};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Ordering;

/// Sort a copy of `pages` with the given strategy.
pub fn sort_pages(pages: &[PageRecord], sort: SortType) -> Vec<PageRecord> {
    let mut sorted = pages.to_vec();
    match sort {
        SortType::Order => sorted.sort_by(by_order),
        SortType::Alphabetical => sorted.sort_by(|a, b| {
            a.metadata
                .title
                .cmp(&b.metadata.title)
                .then_with(|| a.slug.cmp(&b.slug))
        }),
        SortType::Date => {
            sorted.sort_by(|a, b| {
                date_key(b)
                    .cmp(&date_key(a))
                    .then_with(|| a.slug.cmp(&b.slug))
            });
        }
        SortType::Section => sorted.sort_by(by_section),
    }
    sorted
}

/// Explicit orders first (ascending), then pages without one.
pub(crate) fn cmp_explicit(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_order(a: &PageRecord, b: &PageRecord) -> Ordering {
    cmp_explicit(a.metadata.order, b.metadata.order).then_with(|| a.slug.cmp(&b.slug))
}

fn by_section(a: &PageRecord, b: &PageRecord) -> Ordering {
    a.section()
        .cmp(b.section())
        .then_with(|| by_order(a, b))
}

/// Milliseconds since the epoch; missing or unparseable dates count as 0.
fn date_key(page: &PageRecord) -> i64 {
    page.metadata
        .updated_at
        .as_deref()
        .and_then(parse_date)
        .map(|d| d.timestamp_millis())
        .unwrap_or(0)
}

/// Parse the date forms content authors use in front matter.
///
/// - RFC 3339: `2025-02-01T10:30:00Z`, `2025-02-01T10:30:00+02:00`
/// - naive timestamp (UTC): `2025-02-01T10:30:00`
/// - plain date (midnight UTC): `2025-02-01`
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|n| n.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|n| n.and_utc())
        })
}

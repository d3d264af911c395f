//! On-page table of contents.
//!
//! Collects level 2–6 headings from a page body so the layout can render a
//! "on this page" list next to the article. Level 1 is the page title and is
//! left out.
//!
//! Markdown heading attributes are honoured:
//!
//! ```text
//! ## Installing {#install}        → id "install"
//! ## Internal notes {.no-nav}     → excluded from the list
//! ```

use crate::naming::heading_anchor;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;
use std::collections::HashMap;

/// Class that keeps a heading out of the table of contents.
pub const EXCLUDE_CLASS: &str = "no-nav";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub id: String,
    pub text: String,
    pub level: u8,
}

struct Open {
    level: u8,
    id: Option<String>,
    excluded: bool,
    text: String,
}

/// Extract the headings of a page body in document order.
///
/// Generated ids are unique within the page: repeats get `-1`, `-2`, ...
pub fn extract_headings(body: &str) -> Vec<Heading> {
    let parser = Parser::new_ext(body, Options::ENABLE_HEADING_ATTRIBUTES);
    let mut headings = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut open: Option<Open> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading {
                level, id, classes, ..
            }) => {
                open = Some(Open {
                    level: level as u8,
                    id: id.map(|s| s.to_string()),
                    excluded: classes.iter().any(|c| &**c == EXCLUDE_CLASS),
                    text: String::new(),
                });
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some(heading) = open.as_mut() {
                    heading.text.push_str(&t);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(heading) = open.as_mut() {
                    heading.text.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some(heading) = open.take() else {
                    continue;
                };
                if heading.level < 2 || heading.excluded {
                    continue;
                }
                let text = heading.text.trim().to_string();
                let base = heading.id.unwrap_or_else(|| heading_anchor(&text));
                let id = unique_id(base, &mut seen);
                headings.push(Heading {
                    id,
                    text,
                    level: heading.level,
                });
            }
            _ => {}
        }
    }

    headings
}

fn unique_id(base: String, seen: &mut HashMap<String, usize>) -> String {
    let count = seen.entry(base.clone()).or_insert(0);
    let id = if *count == 0 {
        base
    } else {
        format!("{base}-{count}")
    };
    *count += 1;
    id
}

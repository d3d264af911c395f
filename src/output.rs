//! CLI output formatting for every query command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entity (page,
//! section, board, changelog entry) leads with its positional index and
//! title; slugs, dates and source files follow as indented context lines.
//! The result reads as a content inventory while still letting users trace
//! each line back to a file.
//!
//! # Output Format
//!
//! ## Pages
//!
//! ```text
//! 001 Introduction
//!     Source: introduction.mdx
//!     Order: 1
//! 002 Installation
//!     Source: get-started/installation.mdx
//!     Published: 2024-03-09
//! ```
//!
//! ## Sections
//!
//! ```text
//! 001 Get Started (2 pages)
//!     001 Installation (get-started/installation)
//!     002 Quick Start (get-started/quick-start)
//! ```
//!
//! ## Navigation
//!
//! ```text
//! 001 Introduction
//! 002 Get Started
//!     001 Installation
//!     002 Theming [New]
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::changelog::Changelog;
use crate::headings::Heading;
use crate::index::CONTENT_EXTENSION;
use crate::naming::{breadcrumb, title_case};
use crate::roadmap::Product;
use crate::seo::PageMeta;
use crate::types::{Adjacent, NavItem, PageRecord, Section};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional count.
///
/// ```text
/// 001 Get Started (3 pages)
/// 002 Introduction
/// ```
fn entity_header(index: usize, title: &str, count: Option<(usize, &str)>) -> String {
    match count {
        Some((n, noun)) => format!("{} {} ({} {})", format_index(index), title, n, plural(n, noun)),
        None => format!("{} {}", format_index(index), title),
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

/// Display title of a page: its title, or the slug when the title is empty.
fn page_title(page: &PageRecord) -> &str {
    if page.metadata.title.is_empty() {
        &page.slug
    } else {
        &page.metadata.title
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Tree walker
// ============================================================================

/// A flattened node from walking the NavItem tree.
struct TreeNode<'a> {
    depth: usize,
    position: usize,
    item: &'a NavItem,
}

/// Walk the navigation tree, assigning positional indices per sibling level.
fn walk_nav_tree(nav: &[NavItem]) -> Vec<TreeNode<'_>> {
    let mut nodes = Vec::new();
    walk_nav_tree_recursive(nav, 0, &mut nodes);
    nodes
}

fn walk_nav_tree_recursive<'a>(items: &'a [NavItem], depth: usize, nodes: &mut Vec<TreeNode<'a>>) {
    for (i, item) in items.iter().enumerate() {
        nodes.push(TreeNode {
            depth,
            position: i + 1,
            item,
        });
        if item.is_group() {
            walk_nav_tree_recursive(&item.children, depth + 1, nodes);
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

/// One page: header plus source, breadcrumb, order and date context.
fn page_lines(index: usize, page: &PageRecord, depth: usize) -> Vec<String> {
    let pad = indent(depth);
    let mut lines = vec![format!("{}{}", pad, entity_header(index, page_title(page), None))];
    lines.push(format!("{}    Source: {}.{}", pad, page.slug, CONTENT_EXTENSION));
    let crumbs = breadcrumb(&page.slug);
    if !crumbs.is_empty() {
        lines.push(format!("{}    Path: {}", pad, crumbs.join(" / ")));
    }
    if let Some(order) = page.metadata.order {
        lines.push(format!("{}    Order: {}", pad, order));
    }
    if let Some(published) = &page.metadata.published_at {
        lines.push(format!("{}    Published: {}", pad, published));
    }
    if let Some(summary) = &page.metadata.summary {
        let summary = truncate_desc(summary.trim(), 60);
        if !summary.is_empty() {
            lines.push(format!("{}    {}", pad, summary));
        }
    }
    lines
}

pub fn format_pages(pages: &[PageRecord]) -> Vec<String> {
    if pages.is_empty() {
        return vec!["No pages".to_string()];
    }
    pages
        .iter()
        .enumerate()
        .flat_map(|(i, page)| page_lines(i + 1, page, 0))
        .collect()
}

pub fn print_pages(pages: &[PageRecord]) {
    print_lines(format_pages(pages));
}

// ============================================================================
// Sections
// ============================================================================

/// Sections with their pages; top-level pages form their own section.
pub fn format_sections(sections: &[Section]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(entity_header(
            i + 1,
            &title_case(&section.section),
            Some((section.pages.len(), "page")),
        ));
        for (j, page) in section.pages.iter().enumerate() {
            lines.push(format!(
                "    {} ({})",
                entity_header(j + 1, page_title(page), None),
                page.slug
            ));
        }
    }
    lines
}

pub fn print_sections(sections: &[Section]) {
    print_lines(format_sections(sections));
}

// ============================================================================
// Adjacent pages
// ============================================================================

fn neighbour_line(label: &str, page: &Option<PageRecord>) -> String {
    match page {
        Some(p) => format!("{}: {} ({})", label, page_title(p), p.slug),
        None => format!("{}: none", label),
    }
}

pub fn format_adjacent(slug: &str, adjacent: &Adjacent) -> Vec<String> {
    vec![
        slug.to_string(),
        format!("    {}", neighbour_line("Previous", &adjacent.previous)),
        format!("    {}", neighbour_line("Next", &adjacent.next)),
    ]
}

pub fn print_adjacent(slug: &str, adjacent: &Adjacent) {
    print_lines(format_adjacent(slug, adjacent));
}

// ============================================================================
// Navigation
// ============================================================================

pub fn format_navigation(nav: &[NavItem]) -> Vec<String> {
    walk_nav_tree(nav)
        .into_iter()
        .map(|node| {
            let item = node.item;
            let title = item.label.as_deref().unwrap_or(&item.title);
            let mut line = format!(
                "{}{}",
                indent(node.depth),
                entity_header(node.position, title, None)
            );
            if let Some(tag) = item.nav_label.as_deref().or(item.nav_tag.as_deref()) {
                line.push_str(&format!(" [{}]", tag));
            }
            line
        })
        .collect()
}

pub fn print_navigation(nav: &[NavItem]) {
    print_lines(format_navigation(nav));
}

// ============================================================================
// Table of contents
// ============================================================================

/// Headings indented by level, with their anchor.
pub fn format_headings(headings: &[Heading]) -> Vec<String> {
    if headings.is_empty() {
        return vec!["No headings".to_string()];
    }
    headings
        .iter()
        .map(|h| {
            format!(
                "{}{} #{}",
                indent(h.level.saturating_sub(2) as usize),
                h.text,
                h.id
            )
        })
        .collect()
}

pub fn print_headings(headings: &[Heading]) {
    print_lines(format_headings(headings));
}

// ============================================================================
// Page metadata
// ============================================================================

pub fn format_page_meta(meta: &PageMeta) -> Vec<String> {
    let mut lines = vec![meta.title.clone()];
    lines.push(format!("    URL: {}", meta.url));
    lines.push(format!("    Image: {}", meta.image));
    if !meta.description.is_empty() {
        lines.push(format!("    Description: {}", truncate_desc(&meta.description, 80)));
    }
    if let Some(published) = &meta.published_at {
        lines.push(format!("    Published: {}", published));
    }
    if let Some(modified) = &meta.modified_at {
        lines.push(format!("    Modified: {}", modified));
    }
    lines
}

pub fn print_page_meta(meta: &PageMeta) {
    print_lines(format_page_meta(meta));
}

// ============================================================================
// Roadmap
// ============================================================================

pub fn format_roadmap(products: &[Product]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, product) in products.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!(
            "{} [{}]",
            entity_header(i + 1, &product.product, Some((product.task_count(), "task"))),
            product.brand
        ));
        for column in &product.columns {
            lines.push(format!("    {} ({})", column.title, column.tasks.len()));
            for (j, task) in column.tasks.iter().enumerate() {
                let mut line = format!(
                    "        {} [{}]",
                    entity_header(j + 1, &task.title, None),
                    task.kind.label()
                );
                if let Some(user) = &task.user {
                    line.push_str(&format!(" @{}", user.name));
                }
                lines.push(line);
            }
        }
    }
    lines
}

pub fn print_roadmap(products: &[Product]) {
    print_lines(format_roadmap(products));
}

// ============================================================================
// Changelog
// ============================================================================

pub fn format_changelog(changelog: &Changelog) -> Vec<String> {
    if changelog.is_empty() {
        return vec!["No changelog".to_string()];
    }
    let mut lines = Vec::new();
    for (heading, items) in [
        ("In progress", &changelog.in_progress),
        ("Upcoming", &changelog.upcoming),
    ] {
        if items.is_empty() {
            continue;
        }
        lines.push(heading.to_string());
        for item in items {
            lines.push(format!("    {}", item.text));
        }
        lines.push(String::new());
    }
    for (i, entry) in changelog.entries.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            entry.title,
            entry.display_date
        ));
        for item in &entry.items {
            let mut line = format!("    {}: {}", item.kind.as_str(), item.text);
            if let Some(link) = &item.link {
                line.push_str(&format!(" -> {}", link));
            }
            lines.push(line);
        }
    }
    lines
}

pub fn print_changelog(changelog: &Changelog) {
    print_lines(format_changelog(changelog));
}

// ============================================================================
// Tests
// ============================================================================

//! # Magic Docs
//!
//! Content indexing for an MDX documentation site. The filesystem is the
//! data source: every `.mdx` file under the content root is a page, its
//! directory is its section, and optional `meta.json` files pin the order
//! of pages and sections.
//!
//! # Architecture: Query Functions Over the Filesystem
//!
//! There is no build step and no cache. Each query walks the content root,
//! parses front matter, and answers from the fresh page set:
//!
//! ```text
//! content/  →  list_pages  →  Vec<PageRecord>  →  sort / sections / navigation / adjacency
//! ```
//!
//! The pure functions in [`index`] and [`sort`] take a page slice, so unit
//! tests exercise ordering rules without touching the filesystem.
//! [`index::ContentIndex`] binds them to a root directory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`index`] | Walks the content root; sections, sidebar tree, previous/next links, windowed lists |
//! | [`sort`] | The four page orderings and date parsing |
//! | [`frontmatter`] | YAML front-matter split and parse |
//! | [`manifest`] | Per-directory `meta.json` ordering overrides |
//! | [`headings`] | On-page table of contents from Markdown headings |
//! | [`naming`] | Slugs, title-cased labels, breadcrumbs, heading anchors |
//! | [`types`] | Records shared by every query (`PageRecord`, `NavItem`, `SortType`) |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`seo`] | Titles, canonical URLs, social images and JSON-LD per page |
//! | [`roadmap`] | Roadmap boards from built-in data, a JSON file or an issue snapshot |
//! | [`changelog`] | `changelog.json` loading and ordering |
//! | [`logging`] | `tracing` subscriber setup for the CLI |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Tolerant Listing
//!
//! A docs site should render even when one page is broken. Listing never
//! fails: unreadable files and malformed front matter are skipped with a
//! `warn!`, a malformed `meta.json` counts as absent. The `check` command
//! runs [`index::check_content`] to surface everything a listing skipped.
//!
//! ## Two Adjacency Rules
//!
//! Top-level pages (landing, introduction, policies) link only among
//! themselves, ordered by the root `meta.json` and then title. Nested pages
//! read through their section in the requested sort order and continue into
//! the neighbouring section, so a reader can page through the whole manual.

pub mod changelog;
pub mod config;
pub mod frontmatter;
pub mod headings;
pub mod index;
pub mod logging;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod roadmap;
pub mod seo;
pub mod sort;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

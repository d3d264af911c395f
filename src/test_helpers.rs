//! Shared test utilities for the magic-docs test suite.
//!
//! Provides fixture setup, small content-tree builders, record constructors
//! and lookup helpers that panic with a readable message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_page(tmp.path(), "guides/setup.mdx", "title: Setup\norder: 1");
//! write_manifest(tmp.path(), r#"{"sections": {"guides": 1}}"#);
//!
//! let pages = list_pages(tmp.path());
//! assert_eq!(find_page(&pages, "guides/setup").metadata.title, "Setup");
//! ```

use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::manifest::MANIFEST_FILE;
use crate::types::{PageMetadata, PageRecord};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Content tree builders
// =========================================================================

/// Write `<root>/<rel>` with the given YAML front matter and a short body.
pub fn write_page(root: &Path, rel: &str, front_matter: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, format!("---\n{front_matter}\n---\nBody of {rel}\n")).unwrap();
}

/// Write a `meta.json` into `dir`.
pub fn write_manifest(dir: &Path, json: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(MANIFEST_FILE), json).unwrap();
}

// =========================================================================
// Records
// =========================================================================

/// A bare record with a slug and title; every other field is empty.
pub fn page(slug: &str, title: &str) -> PageRecord {
    PageRecord {
        slug: slug.to_string(),
        content: String::new(),
        metadata: PageMetadata {
            title: title.to_string(),
            ..Default::default()
        },
        nav_tag: None,
        nav_label: None,
        nav_icon: None,
        nav_tag_variant: None,
    }
}

/// All slugs in sequence order.
pub fn slugs(pages: &[PageRecord]) -> Vec<String> {
    pages.iter().map(|p| p.slug.clone()).collect()
}

/// Find a page by slug. Panics if not found.
pub fn find_page<'a>(pages: &'a [PageRecord], slug: &str) -> &'a PageRecord {
    pages.iter().find(|p| p.slug == slug).unwrap_or_else(|| {
        let available: Vec<&str> = pages.iter().map(|p| p.slug.as_str()).collect();
        panic!("page '{slug}' not found. Available: {available:?}")
    })
}

/// Slug of an optional neighbour, for adjacency assertions.
pub fn slug_of(page: &Option<PageRecord>) -> Option<&str> {
    page.as_ref().map(|p| p.slug.as_str())
}

// =========================================================================
// Logs
// =========================================================================

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber at `warn` and return its result
/// together with the plain-text log output.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}

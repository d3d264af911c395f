//! Content discovery and navigation queries.
//!
//! The indexer walks the content root, turns every `.mdx` file into a
//! [`PageRecord`], and answers the questions the site layout asks: all pages,
//! pages grouped by section, the sidebar tree, and the previous/next links
//! at the bottom of a docs page.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── meta.json                  # {"pages": {...}, "sections": {...}} (optional)
//! ├── introduction.mdx           # Top-level page: slug "introduction"
//! ├── changelog-policy.mdx
//! ├── get-started/               # Section "get-started"
//! │   ├── meta.json              # {"pages": {"installation": 1}} (optional)
//! │   ├── installation.mdx       # slug "get-started/installation"
//! │   └── configuration.mdx
//! └── components/
//!     └── forms/
//!         └── input.mdx          # slug "components/forms/input", section "components"
//! ```
//!
//! ## Tolerance
//!
//! Nothing here aborts a listing. A missing root lists nothing, a broken file
//! is skipped with a warning, a malformed `meta.json` counts as absent. The
//! index is rebuilt from the file system on every call; callers that need
//! speed cache the results themselves.
//!
//! ## Adjacency
//!
//! Top-level pages only link to other top-level pages, ordered by the root
//! `meta.json` and then by title. Nested pages walk their own section in the
//! requested order and fall through to the neighbouring section at either
//! end, so reading flows continuously across the whole tree.

use crate::frontmatter::{FrontMatterError, parse_front_matter};
use crate::manifest::{DirManifest, ManifestError, load_manifest, read_manifest_lenient};
use crate::naming::{slug_from_relative, title_case};
use crate::sort::{cmp_explicit, sort_pages};
use crate::types::{Adjacent, NavItem, PageMetadata, PageRecord, Section, SortType};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Extension of content files.
pub const CONTENT_EXTENSION: &str = "mdx";

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Front matter error in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

// =============================================================================
// Listing
// =============================================================================

/// List every content page under `root`.
///
/// The returned order follows file names but callers must not rely on it;
/// use [`sort_pages`] for presentation order.
pub fn list_pages(root: &Path) -> Vec<PageRecord> {
    list_pages_in(root, &mut HashMap::new())
}

/// Listing with a manifest cache the caller may pre-seed. Directories already
/// in `manifests` are not read again.
fn list_pages_in(
    root: &Path,
    manifests: &mut HashMap<PathBuf, Option<DirManifest>>,
) -> Vec<PageRecord> {
    if !root.is_dir() {
        warn!(root = %root.display(), "content root does not exist");
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut pages = Vec::new();

    for entry in content_walker(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_content_file(entry.path()) {
            continue;
        }

        let dir = entry.path().parent().unwrap_or(root);
        let manifest = manifests
            .entry(dir.to_path_buf())
            .or_insert_with(|| read_manifest_lenient(dir));

        match read_page(root, entry.path(), manifest.as_ref()) {
            Ok(page) => {
                if seen.insert(page.slug.clone()) {
                    pages.push(page);
                } else {
                    warn!(slug = %page.slug, path = %entry.path().display(), "duplicate slug, skipping");
                }
            }
            Err(e) => warn!(error = %e, "skipping content file"),
        }
    }

    debug!(root = %root.display(), count = pages.len(), "listed pages");
    pages
}

/// Problems a listing silently skips: unreadable entries, broken front
/// matter, malformed `meta.json` files.
pub fn check_content(root: &Path) -> Vec<IndexError> {
    let mut problems = Vec::new();
    if !root.is_dir() {
        return problems;
    }

    let mut manifests: HashMap<PathBuf, Option<DirManifest>> = HashMap::new();
    for entry in content_walker(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                problems.push(IndexError::Walk(e));
                continue;
            }
        };
        if entry.file_type().is_dir() {
            match load_manifest(entry.path()) {
                Ok(manifest) => {
                    manifests.insert(entry.path().to_path_buf(), manifest);
                }
                Err(e) => {
                    manifests.insert(entry.path().to_path_buf(), None);
                    problems.push(e.into());
                }
            }
            continue;
        }
        if !is_content_file(entry.path()) {
            continue;
        }
        let dir = entry.path().parent().unwrap_or(root);
        let manifest = manifests.get(dir).and_then(|m| m.as_ref());
        if let Err(e) = read_page(root, entry.path(), manifest) {
            problems.push(e);
        }
    }
    problems
}

/// Depth-first walk in file-name order, skipping hidden entries below the
/// root and following symlinks.
fn content_walker(root: &Path) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(CONTENT_EXTENSION))
        .unwrap_or(false)
}

/// Read one content file into a record.
///
/// Order resolution: front-matter `order`, then the directory manifest entry
/// for the file stem, then none.
fn read_page(
    root: &Path,
    path: &Path,
    manifest: Option<&DirManifest>,
) -> Result<PageRecord, IndexError> {
    let raw = fs::read_to_string(path).map_err(|source| IndexError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = parse_front_matter(&raw).map_err(|source| IndexError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;

    let rel = path.strip_prefix(root).unwrap_or(path);
    let slug = slug_from_relative(rel);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let fm = doc.front_matter;
    let front_order = fm.order().unwrap_or_else(|reason| {
        warn!(path = %path.display(), %reason, "ignoring front-matter order");
        None
    });
    let order = front_order.or_else(|| manifest.and_then(|m| m.page_order(&stem)));

    Ok(PageRecord {
        slug,
        content: doc.body,
        metadata: PageMetadata {
            title: fm.title.unwrap_or_default(),
            summary: fm.summary,
            image: fm.image,
            updated_at: fm.updated_at,
            published_at: fm.published_at,
            order,
        },
        nav_tag: fm.tag,
        nav_label: fm.tag_label,
        nav_icon: fm.nav_icon,
        nav_tag_variant: fm.nav_tag_variant,
    })
}

// =============================================================================
// Pure queries over a page set
// =============================================================================

/// Neighbours among top-level pages only.
///
/// Ordered by the root manifest's `pages` entry (keyed by slug), then by
/// title. The caller's sort type plays no part here.
pub fn top_level_adjacent(pages: &[PageRecord], slug: &str, root: &DirManifest) -> Adjacent {
    let mut top: Vec<&PageRecord> = pages.iter().filter(|p| p.is_top_level()).collect();
    top.sort_by(|a, b| {
        cmp_explicit(root.page_order(&a.slug), root.page_order(&b.slug))
            .then_with(|| a.metadata.title.cmp(&b.metadata.title))
            .then_with(|| a.slug.cmp(&b.slug))
    });

    let Some(idx) = top.iter().position(|p| p.slug == slug) else {
        return Adjacent::default();
    };
    Adjacent {
        previous: idx.checked_sub(1).map(|i| top[i].clone()),
        next: top.get(idx + 1).map(|p| (*p).clone()),
    }
}

/// Neighbours of a nested page.
///
/// Inside its section the page follows `sort`. At the first page of a
/// section `previous` is the entry just before the section in the global
/// `Section` ordering of all pages; at the last page `next` is the entry just
/// after it. That entry may be a top-level page, since each top-level page
/// is a section of its own.
pub fn nested_adjacent(pages: &[PageRecord], slug: &str, sort: SortType) -> Adjacent {
    let Some(current) = pages.iter().find(|p| p.slug == slug && !p.is_top_level()) else {
        return Adjacent::default();
    };
    let section = current.section();
    let in_section = |p: &PageRecord| !p.is_top_level() && p.section() == section;

    let global = sort_pages(pages, SortType::Section);
    let members: Vec<PageRecord> = pages.iter().filter(|p| in_section(*p)).cloned().collect();
    let local = sort_pages(&members, sort);

    let Some(idx) = local.iter().position(|p| p.slug == slug) else {
        return Adjacent::default();
    };

    let previous = if idx == 0 {
        global
            .iter()
            .position(in_section)
            .and_then(|start| start.checked_sub(1))
            .map(|i| global[i].clone())
    } else {
        Some(local[idx - 1].clone())
    };

    let next = if idx + 1 == local.len() {
        global
            .iter()
            .rposition(in_section)
            .and_then(|end| global.get(end + 1))
            .cloned()
    } else {
        Some(local[idx + 1].clone())
    };

    Adjacent { previous, next }
}

/// Group pages by section.
///
/// Pages inside a group follow `sort`. Groups with an entry in the root
/// manifest's `sections` map come first in that order, the rest follow by
/// name.
pub fn group_sections(pages: &[PageRecord], sort: SortType, root: &DirManifest) -> Vec<Section> {
    let mut groups: BTreeMap<String, Vec<PageRecord>> = BTreeMap::new();
    for page in pages {
        groups
            .entry(page.section().to_string())
            .or_default()
            .push(page.clone());
    }

    let mut sections: Vec<Section> = groups
        .into_iter()
        .map(|(section, pages)| Section {
            pages: sort_pages(&pages, sort),
            section,
        })
        .collect();
    sections.sort_by(|a, b| {
        cmp_explicit(root.section_order(&a.section), root.section_order(&b.section))
            .then_with(|| a.section.cmp(&b.section))
    });
    sections
}

/// Build the sidebar tree.
///
/// Directories become group nodes labelled with their title-cased name,
/// pages become leaves. Siblings are ordered like the `order` sort; root
/// groups take their order from the manifest `sections` map.
pub fn build_navigation(pages: &[PageRecord], root: &DirManifest) -> Vec<NavItem> {
    let refs: Vec<&PageRecord> = pages.iter().collect();
    nav_level(&refs, "", root)
}

fn nav_level(pages: &[&PageRecord], prefix: &str, root: &DirManifest) -> Vec<NavItem> {
    let mut items = Vec::new();
    let mut groups: BTreeMap<&str, Vec<&PageRecord>> = BTreeMap::new();

    for &page in pages {
        let rel = &page.slug[prefix.len()..];
        match rel.split_once('/') {
            None => items.push(leaf_item(page)),
            Some((dir, _)) => groups.entry(dir).or_default().push(page),
        }
    }

    for (dir, members) in groups {
        let path = format!("{prefix}{dir}");
        let children = nav_level(&members, &format!("{path}/"), root);
        let order = if prefix.is_empty() {
            root.section_order(dir)
        } else {
            None
        };
        items.push(NavItem {
            slug: path,
            title: dir.to_string(),
            label: Some(title_case(dir)),
            order,
            nav_tag: None,
            nav_label: None,
            nav_icon: None,
            nav_tag_variant: None,
            children,
        });
    }

    items.sort_by(|a, b| cmp_explicit(a.order, b.order).then_with(|| a.slug.cmp(&b.slug)));
    items
}

fn leaf_item(page: &PageRecord) -> NavItem {
    let title = if page.metadata.title.is_empty() {
        page.slug.rsplit('/').next().unwrap_or(&page.slug).to_string()
    } else {
        page.metadata.title.clone()
    };
    NavItem {
        slug: page.slug.clone(),
        title,
        label: None,
        order: page.metadata.order,
        nav_tag: page.nav_tag.clone(),
        nav_label: page.nav_label.clone(),
        nav_icon: page.nav_icon.clone(),
        nav_tag_variant: page.nav_tag_variant,
        children: Vec::new(),
    }
}

/// A 1-based, inclusive window into a page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageRange {
    #[default]
    All,
    /// From the n-th page to the end.
    From(usize),
    /// From the first to the second position, inclusive.
    Between(usize, usize),
}

impl PageRange {
    pub fn apply<T: Clone>(self, items: &[T]) -> Vec<T> {
        let (start, end) = match self {
            PageRange::All => (0, items.len()),
            PageRange::From(start) => (start.saturating_sub(1), items.len()),
            PageRange::Between(start, end) => (start.saturating_sub(1), end.min(items.len())),
        };
        if start >= end {
            return Vec::new();
        }
        items[start..end].to_vec()
    }
}

// =============================================================================
// ContentIndex
// =============================================================================

/// Query entry point bound to a content root.
///
/// Every method re-reads the file system.
#[derive(Debug, Clone)]
pub struct ContentIndex {
    root: PathBuf,
}

impl ContentIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn list_pages(&self) -> Vec<PageRecord> {
        list_pages(&self.root)
    }

    pub fn sorted_pages(&self, sort: SortType) -> Vec<PageRecord> {
        sort_pages(&self.list_pages(), sort)
    }

    pub fn find_page(&self, slug: &str) -> Option<PageRecord> {
        self.list_pages().into_iter().find(|p| p.slug == slug)
    }

    /// Previous/next pages for `slug`. Never fails: any error is logged and
    /// yields no neighbours.
    pub fn adjacent_pages(&self, slug: &str, sort: SortType) -> Adjacent {
        match self.try_adjacent_pages(slug, sort) {
            Ok(adjacent) => adjacent,
            Err(e) => {
                warn!(%slug, error = %e, "adjacent page lookup failed");
                Adjacent::default()
            }
        }
    }

    /// Fallible form of [`ContentIndex::adjacent_pages`].
    ///
    /// A malformed root `meta.json` is an error here, because top-level
    /// ordering depends on it.
    pub fn try_adjacent_pages(&self, slug: &str, sort: SortType) -> Result<Adjacent, IndexError> {
        if slug.contains('/') {
            return Ok(nested_adjacent(&self.list_pages(), slug, sort));
        }
        let (pages, root) = self.pages_with_root(load_manifest(&self.root)?);
        Ok(top_level_adjacent(&pages, slug, &root))
    }

    pub fn sections(&self, sort: SortType) -> Vec<Section> {
        let (pages, root) = self.pages_with_root(read_manifest_lenient(&self.root));
        group_sections(&pages, sort, &root)
    }

    pub fn navigation(&self) -> Vec<NavItem> {
        let (pages, root) = self.pages_with_root(read_manifest_lenient(&self.root));
        build_navigation(&pages, &root)
    }

    /// List pages with the root `meta.json` already loaded, so the listing
    /// does not read it a second time.
    fn pages_with_root(&self, root_manifest: Option<DirManifest>) -> (Vec<PageRecord>, DirManifest) {
        let mut manifests = HashMap::from([(self.root.clone(), root_manifest)]);
        let pages = list_pages_in(&self.root, &mut manifests);
        let root = manifests.remove(&self.root).flatten().unwrap_or_default();
        (pages, root)
    }

    /// Pages at or below `prefix` (all pages when empty), newest first,
    /// windowed by `range`.
    pub fn page_list(&self, prefix: &str, range: PageRange) -> Vec<PageRecord> {
        let prefix = prefix.trim_matches('/');
        let pages: Vec<PageRecord> = self
            .list_pages()
            .into_iter()
            .filter(|p| {
                prefix.is_empty()
                    || p.slug == prefix
                    || p.slug
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            })
            .collect();
        range.apply(&sort_pages(&pages, SortType::Date))
    }
}

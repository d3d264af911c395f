//! End-to-end queries over the checked-in `fixtures/content` tree.
//!
//! Run with: cargo test --test content_index

use magic_docs::changelog::load_changelog;
use magic_docs::config::load_config;
use magic_docs::headings::extract_headings;
use magic_docs::index::{ContentIndex, PageRange, check_content};
use magic_docs::output::{format_navigation, format_sections};
use magic_docs::roadmap::load_roadmap;
use magic_docs::seo::{changelog_meta, page_meta, roadmap_meta};
use magic_docs::types::{Adjacent, PageRecord, SortType, TagVariant};
use std::path::PathBuf;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

fn index() -> ContentIndex {
    ContentIndex::new(fixtures())
}

fn slugs(pages: &[PageRecord]) -> Vec<&str> {
    pages.iter().map(|p| p.slug.as_str()).collect()
}

fn neighbours(adjacent: &Adjacent) -> (Option<&str>, Option<&str>) {
    (
        adjacent.previous.as_ref().map(|p| p.slug.as_str()),
        adjacent.next.as_ref().map(|p| p.slug.as_str()),
    )
}

#[test]
fn lists_only_visible_mdx_pages() {
    let pages = index().sorted_pages(SortType::Alphabetical);
    assert_eq!(
        slugs(&pages),
        vec![
            "api/reference",
            "components/button",
            "changelog-policy",
            "components/forms/input",
            "get-started/installation",
            "introduction",
            "get-started/quick-start",
            "components/forms/select",
            "support",
            "get-started/theming",
        ]
    );
}

#[test]
fn order_sort_uses_front_matter_then_manifests() {
    let pages = index().sorted_pages(SortType::Order);
    assert_eq!(
        slugs(&pages),
        vec![
            "components/button",
            "get-started/installation",
            "introduction",
            "components/forms/input",
            "get-started/quick-start",
            "components/forms/select",
            "get-started/theming",
            "changelog-policy",
            "api/reference",
            "support",
        ]
    );
}

#[test]
fn date_sort_newest_first_undated_last() {
    let pages = index().sorted_pages(SortType::Date);
    assert_eq!(
        slugs(&pages),
        vec![
            "get-started/theming",
            "get-started/installation",
            "components/button",
            "introduction",
            "get-started/quick-start",
            "changelog-policy",
            "api/reference",
            "components/forms/input",
            "components/forms/select",
            "support",
        ]
    );
}

#[test]
fn page_metadata_is_carried_through() {
    let theming = index().find_page("get-started/theming").unwrap();
    assert_eq!(theming.metadata.title, "Theming");
    assert_eq!(theming.metadata.order, Some(3));
    assert_eq!(theming.nav_tag.as_deref(), Some("New"));
    assert_eq!(theming.nav_icon.as_deref(), Some("palette"));
    assert_eq!(theming.nav_tag_variant, Some(TagVariant::Brand));

    let select = index().find_page("components/forms/select").unwrap();
    assert_eq!(select.nav_label.as_deref(), Some("Beta"));
}

#[test]
fn top_level_adjacency_follows_root_manifest() {
    let idx = index();
    assert_eq!(
        neighbours(&idx.adjacent_pages("introduction", SortType::Order)),
        (None, Some("changelog-policy"))
    );
    assert_eq!(
        neighbours(&idx.adjacent_pages("changelog-policy", SortType::Date)),
        (Some("introduction"), Some("support"))
    );
    assert_eq!(
        neighbours(&idx.adjacent_pages("support", SortType::Order)),
        (Some("changelog-policy"), None)
    );
}

#[test]
fn nested_adjacency_crosses_section_boundaries() {
    let idx = index();
    assert_eq!(
        neighbours(&idx.adjacent_pages("api/reference", SortType::Order)),
        (None, Some("changelog-policy"))
    );
    assert_eq!(
        neighbours(&idx.adjacent_pages("get-started/installation", SortType::Order)),
        (Some("components/forms/select"), Some("get-started/quick-start"))
    );
    assert_eq!(
        neighbours(&idx.adjacent_pages("get-started/theming", SortType::Order)),
        (Some("get-started/quick-start"), Some("introduction"))
    );
}

#[test]
fn components_section_follows_top_level_changelog_policy() {
    // Section ordering: api, changelog-policy, components, get-started, ...
    assert_eq!(
        neighbours(&index().adjacent_pages("components/button", SortType::Order)),
        (Some("changelog-policy"), Some("components/forms/input"))
    );
}

#[test]
fn nested_adjacency_respects_sort_inside_section() {
    let idx = index();
    assert_eq!(
        neighbours(&idx.adjacent_pages("get-started/theming", SortType::Date)),
        (Some("components/forms/select"), Some("get-started/installation"))
    );
    assert_eq!(
        neighbours(&idx.adjacent_pages("get-started/quick-start", SortType::Date)),
        (Some("get-started/installation"), Some("introduction"))
    );
}

#[test]
fn unknown_slug_has_no_neighbours() {
    assert_eq!(
        index().adjacent_pages("nope/missing", SortType::Order),
        Adjacent::default()
    );
}

#[test]
fn sections_manifest_first_then_by_name() {
    let sections = index().sections(SortType::Order);
    let names: Vec<&str> = sections.iter().map(|s| s.section.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "get-started",
            "components",
            "api",
            "changelog-policy",
            "introduction",
            "support",
        ]
    );
    assert_eq!(
        slugs(&sections[1].pages),
        vec![
            "components/button",
            "components/forms/input",
            "components/forms/select",
        ]
    );

    let lines = format_sections(&sections);
    assert_eq!(lines[0], "001 Get Started (3 pages)");
}

#[test]
fn navigation_tree() {
    let nav = index().navigation();
    assert_eq!(
        format_navigation(&nav),
        vec![
            "001 Introduction",
            "002 Get Started",
            "    001 Installation",
            "    002 Quick Start",
            "    003 Theming [New]",
            "003 Components",
            "    001 Button",
            "    002 Forms",
            "        001 Input",
            "        002 Select [Beta]",
            "004 Api",
            "    001 API Reference",
            "005 Changelog Policy",
            "006 Support",
        ]
    );
}

#[test]
fn page_list_windows_newest_pages() {
    let idx = index();
    assert_eq!(
        slugs(&idx.page_list("get-started", PageRange::Between(1, 2))),
        vec!["get-started/theming", "get-started/installation"]
    );
    assert_eq!(
        slugs(&idx.page_list("components/forms", PageRange::All)),
        vec!["components/forms/input", "components/forms/select"]
    );
}

#[test]
fn table_of_contents_for_a_page() {
    let page = index().find_page("get-started/installation").unwrap();
    let headings = extract_headings(&page.content);
    let ids: Vec<(&str, u8)> = headings.iter().map(|h| (h.id.as_str(), h.level)).collect();
    assert_eq!(
        ids,
        vec![
            ("requirements", 2),
            ("node", 3),
            ("install", 2),
            ("requirements-1", 2),
        ]
    );
}

#[test]
fn config_and_page_metadata() {
    let config = load_config(&fixtures()).unwrap();
    assert_eq!(config.base_url, "https://docs.example.com");
    assert_eq!(config.schema.name, "Example Docs");

    assert!(roadmap_meta(&config).is_none());
    assert_eq!(
        changelog_meta(&config).unwrap().title,
        "Changelog – Example Docs"
    );

    let page = index().find_page("get-started/quick-start").unwrap();
    let meta = page_meta(&config, &page);
    assert_eq!(meta.url, "https://docs.example.com/docs/get-started/quick-start");
    assert_eq!(meta.image, "https://docs.example.com/og?title=Quick%20Start");

    let ld = meta.json_ld(&config);
    assert_eq!(ld["@type"], "BlogPosting");
    assert_eq!(ld["dateModified"], "2024-03-01");
}

#[test]
fn changelog_is_newest_first() {
    let changelog = load_changelog(&fixtures()).unwrap();
    let dates: Vec<(&str, &str)> = changelog
        .entries
        .iter()
        .map(|e| (e.date.as_str(), e.display_date.as_str()))
        .collect();
    assert_eq!(
        dates,
        vec![
            ("2025-03-09", "Mar 9"),
            ("2025-02-27", "Feb 27"),
            ("2025-02-24", "Feb 24"),
        ]
    );
    assert_eq!(changelog.upcoming.len(), 2);
    assert_eq!(changelog.in_progress.len(), 1);
}

#[test]
fn roadmap_file_overrides_built_in_boards() {
    let config = load_config(&fixtures()).unwrap();
    let boards = load_roadmap(&fixtures(), &config.roadmap).unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].product, "Example Docs");
    assert_eq!(boards[0].task_count(), 2);
}

#[test]
fn fixtures_pass_check() {
    let problems = check_content(&fixtures());
    assert!(problems.is_empty(), "unexpected problems: {problems:?}");
}

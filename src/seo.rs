//! Page metadata composition.
//!
//! Builds the title, description, canonical URL and social image for every
//! kind of page the site serves, plus the schema.org JSON-LD object that goes
//! into the page head. Everything is derived from [`SiteConfig`] and, for
//! docs pages, the page's front matter:
//!
//! | Page      | Path              | Title                          |
//! |-----------|-------------------|--------------------------------|
//! | home      | `/`               | `<home.title> – <schema.name>` |
//! | docs page | `/docs/<slug>`    | front-matter title             |
//! | roadmap   | `/roadmap`        | `Roadmap – <schema.name>`      |
//! | changelog | `/changelog`      | `Changelog – <schema.name>`    |
//!
//! Pages without an explicit image get the generated `/og?title=...` card.

use crate::config::SiteConfig;
use crate::types::PageRecord;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// Landing and listing pages, emitted as schema.org `WebPage`.
    Website,
    /// Docs pages, emitted as schema.org `BlogPosting`.
    Article,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    /// Absolute canonical URL.
    pub url: String,
    /// Absolute social image URL.
    pub image: String,
    pub kind: PageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}

impl PageMeta {
    /// The schema.org JSON-LD object for this page.
    pub fn json_ld(&self, config: &SiteConfig) -> Value {
        let publisher = publisher(config);
        match self.kind {
            PageKind::Website => json!({
                "@context": "https://schema.org",
                "@type": "WebPage",
                "name": self.title,
                "description": self.description,
                "url": self.url,
                "image": self.image,
                "inLanguage": language_tag(&config.schema.locale),
                "publisher": publisher,
            }),
            PageKind::Article => {
                let mut ld = json!({
                    "@context": "https://schema.org",
                    "@type": "BlogPosting",
                    "headline": self.title,
                    "description": self.description,
                    "url": self.url,
                    "image": self.image,
                    "author": publisher.clone(),
                    "publisher": publisher,
                });
                if let Some(published) = &self.published_at {
                    ld["datePublished"] = json!(published);
                }
                if let Some(modified) = self.modified_at.as_ref().or(self.published_at.as_ref()) {
                    ld["dateModified"] = json!(modified);
                }
                ld
            }
        }
    }
}

/// `<page> – <schema name>`
fn site_title(config: &SiteConfig, page: &str) -> String {
    format!("{page} – {}", config.schema.name)
}

/// Absolute URL of the generated social card for `title`.
pub fn og_image_url(config: &SiteConfig, title: &str) -> String {
    format!("{}/og?title={}", config.origin(), encode_component(title))
}

/// Percent-encode a URL component.
///
/// Leaves ASCII letters, digits and `-_.!~*'()` alone and encodes every other
/// byte of the UTF-8 representation as `%XX`.
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

pub fn home_meta(config: &SiteConfig) -> PageMeta {
    let description = if config.home.description.is_empty() {
        config.schema.description.clone()
    } else {
        config.home.description.clone()
    };
    PageMeta {
        title: site_title(config, &config.home.title),
        description,
        url: format!("{}/", config.origin()),
        image: og_image_url(config, &config.home.title),
        kind: PageKind::Website,
        published_at: None,
        modified_at: None,
    }
}

/// Metadata for a docs page at `/docs/<slug>`.
///
/// A front-matter `image` is a site-relative path; without one the generated
/// card is used. A missing summary falls back to the site description.
pub fn page_meta(config: &SiteConfig, page: &PageRecord) -> PageMeta {
    let meta = &page.metadata;
    let image = match meta.image.as_deref().filter(|i| !i.is_empty()) {
        Some(path) if path.starts_with("http") => path.to_string(),
        Some(path) => format!("{}/{}", config.origin(), path.trim_start_matches('/')),
        None => og_image_url(config, &meta.title),
    };
    PageMeta {
        title: meta.title.clone(),
        description: meta
            .summary
            .clone()
            .unwrap_or_else(|| config.schema.description.clone()),
        url: format!("{}/docs/{}", config.origin(), page.slug),
        image,
        kind: PageKind::Article,
        published_at: meta.published_at.clone(),
        modified_at: meta.updated_at.clone(),
    }
}

fn route_meta(config: &SiteConfig, page: &str, path: &str) -> PageMeta {
    PageMeta {
        title: site_title(config, page),
        description: config.schema.description.clone(),
        url: format!("{}{path}", config.origin()),
        image: og_image_url(config, page),
        kind: PageKind::Website,
        published_at: None,
        modified_at: None,
    }
}

/// Roadmap page metadata, `None` when the route is disabled.
pub fn roadmap_meta(config: &SiteConfig) -> Option<PageMeta> {
    config
        .routes
        .roadmap
        .then(|| route_meta(config, "Roadmap", "/roadmap"))
}

/// Changelog page metadata, `None` when the route is disabled.
pub fn changelog_meta(config: &SiteConfig) -> Option<PageMeta> {
    config
        .routes
        .changelog
        .then(|| route_meta(config, "Changelog", "/changelog"))
}

fn publisher(config: &SiteConfig) -> Value {
    let schema = &config.schema;
    let mut org = json!({
        "@type": schema.kind,
        "name": schema.name,
    });
    if !schema.logo.is_empty() {
        org["logo"] = json!({
            "@type": "ImageObject",
            "url": format!("{}/{}", config.origin(), schema.logo.trim_start_matches('/')),
        });
    }
    if !schema.email.is_empty() {
        org["email"] = json!(schema.email);
    }
    org
}

/// `en_US` → `en-US`
fn language_tag(locale: &str) -> String {
    locale.replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::page;

    #[test]
    fn encode_component_matches_uri_component_rules() {
        assert_eq!(encode_component("Get Started"), "Get%20Started");
        assert_eq!(encode_component("a&b=c/d"), "a%26b%3Dc%2Fd");
        assert_eq!(encode_component("it's (ok)!"), "it's%20(ok)!");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn home_uses_site_title_and_generated_card() {
        let config = SiteConfig::default();
        let meta = home_meta(&config);
        assert_eq!(meta.title, "Docs – Magic Docs");
        assert_eq!(meta.url, "https://docs.once-ui.com/");
        assert_eq!(meta.image, "https://docs.once-ui.com/og?title=Docs");
        assert_eq!(meta.description, config.schema.description);
        assert_eq!(meta.kind, PageKind::Website);
    }

    #[test]
    fn home_description_override() {
        let mut config = SiteConfig::default();
        config.home.description = "Component docs".into();
        assert_eq!(home_meta(&config).description, "Component docs");
    }

    #[test]
    fn docs_page_without_image_gets_encoded_card() {
        let config = SiteConfig::default();
        let mut record = page("get-started/installation", "Install & Setup");
        record.metadata.summary = Some("How to install".into());
        let meta = page_meta(&config, &record);
        assert_eq!(
            meta.url,
            "https://docs.once-ui.com/docs/get-started/installation"
        );
        assert_eq!(
            meta.image,
            "https://docs.once-ui.com/og?title=Install%20%26%20Setup"
        );
        assert_eq!(meta.description, "How to install");
        assert_eq!(meta.kind, PageKind::Article);
    }

    #[test]
    fn docs_page_image_is_made_absolute() {
        let config = SiteConfig {
            base_url: "https://example.com/".into(),
            ..Default::default()
        };
        let mut record = page("intro", "Intro");
        record.metadata.image = Some("/images/cover.jpg".into());
        assert_eq!(
            page_meta(&config, &record).image,
            "https://example.com/images/cover.jpg"
        );
    }

    #[test]
    fn docs_page_missing_summary_falls_back() {
        let config = SiteConfig::default();
        let meta = page_meta(&config, &page("intro", "Intro"));
        assert_eq!(meta.description, config.schema.description);
    }

    #[test]
    fn disabled_routes_yield_none() {
        let mut config = SiteConfig::default();
        assert_eq!(
            roadmap_meta(&config).unwrap().title,
            "Roadmap – Magic Docs"
        );
        assert_eq!(
            changelog_meta(&config).unwrap().url,
            "https://docs.once-ui.com/changelog"
        );

        config.routes.roadmap = false;
        config.routes.changelog = false;
        assert!(roadmap_meta(&config).is_none());
        assert!(changelog_meta(&config).is_none());
    }

    #[test]
    fn article_json_ld_has_dates_and_publisher() {
        let config = SiteConfig::default();
        let mut record = page("intro", "Intro");
        record.metadata.published_at = Some("2024-03-09".into());
        let ld = page_meta(&config, &record).json_ld(&config);
        assert_eq!(ld["@type"], "BlogPosting");
        assert_eq!(ld["headline"], "Intro");
        assert_eq!(ld["datePublished"], "2024-03-09");
        assert_eq!(ld["dateModified"], "2024-03-09");
        assert_eq!(ld["url"], "https://docs.once-ui.com/docs/intro");
        assert_eq!(ld["publisher"]["@type"], "Organization");
        assert_eq!(ld["publisher"]["name"], "Magic Docs");
        assert!(ld["publisher"].get("logo").is_none());
    }

    #[test]
    fn article_json_ld_omits_absent_dates() {
        let config = SiteConfig::default();
        let ld = page_meta(&config, &page("intro", "Intro")).json_ld(&config);
        assert!(ld.get("datePublished").is_none());
        assert!(ld.get("dateModified").is_none());
    }

    #[test]
    fn website_json_ld_includes_language_and_logo() {
        let mut config = SiteConfig::default();
        config.schema.logo = "/logo.svg".into();
        let ld = home_meta(&config).json_ld(&config);
        assert_eq!(ld["@type"], "WebPage");
        assert_eq!(ld["inLanguage"], "en-US");
        assert_eq!(
            ld["publisher"]["logo"]["url"],
            "https://docs.once-ui.com/logo.svg"
        );
    }
}

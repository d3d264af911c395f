//! Site configuration module.
//!
//! Handles loading, validating, and merging the site's `config.toml`. Stock
//! defaults form the base layer; a `config.toml` in the content root
//! overrides any subset of them.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml          # Site config (overrides stock defaults)
//! ├── meta.json
//! ├── introduction.mdx
//! └── get-started/
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! base_url = "https://docs.once-ui.com"
//!
//! [routes]
//! changelog = true
//! roadmap = true
//!
//! [style]
//! theme = "dark"            # dark | light
//! neutral = "gray"          # sand | gray | slate
//! brand = "blue"
//! accent = "blue"
//! solid = "contrast"        # color | contrast
//! solid_style = "flat"      # flat | plastic
//! border = "playful"        # rounded | playful | conservative
//! surface = "translucent"   # filled | translucent
//! transition = "all"        # all | micro | macro
//!
//! [layout]
//! header_width = 90         # rem
//! sidebar_width = 16
//! sidebar_collapsible = false
//!
//! [[social]]
//! name = "GitHub"
//! icon = "github"
//! link = "https://github.com/once-ui-system"
//!
//! [schema]
//! name = "Magic Docs"
//! locale = "en_US"
//!
//! [home]
//! label = "Home"
//!
//! [roadmap]
//! use_linear = false
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse, override just the values you want:
//!
//! ```toml
//! [schema]
//! name = "Acme Docs"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the content root.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute origin of the published site, used for canonical and og URLs.
    pub base_url: String,
    /// Optional pages that can be switched off.
    pub routes: RoutesConfig,
    /// Design-system theme selection.
    pub style: StyleConfig,
    /// Layout widths in rem.
    pub layout: LayoutConfig,
    /// Links shown in the header and footer.
    pub social: Vec<SocialLink>,
    /// Organization data for structured metadata.
    pub schema: SchemaConfig,
    /// Home page labels.
    pub home: HomeConfig,
    /// Where roadmap data comes from.
    pub roadmap: RoadmapConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://docs.once-ui.com".to_string(),
            routes: RoutesConfig::default(),
            style: StyleConfig::default(),
            layout: LayoutConfig::default(),
            social: vec![SocialLink {
                name: "GitHub".to_string(),
                icon: "github".to_string(),
                link: "https://github.com/once-ui-system".to_string(),
            }],
            schema: SchemaConfig::default(),
            home: HomeConfig::default(),
            roadmap: RoadmapConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http") {
            return Err(ConfigError::Validation(
                "base_url must be an absolute http(s) URL".into(),
            ));
        }
        for (name, width) in self.layout.widths() {
            if width == 0 {
                return Err(ConfigError::Validation(format!(
                    "layout.{name} must be positive"
                )));
            }
        }
        for link in &self.social {
            if link.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "social entries need a name".into(),
                ));
            }
        }
        if self.schema.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "schema.name must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// `base_url` without a trailing slash, ready for path concatenation.
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Optional routes. A disabled route has no page and no navigation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutesConfig {
    pub changelog: bool,
    pub roadmap: bool,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            changelog: true,
            roadmap: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Neutral {
    Sand,
    #[default]
    Gray,
    Slate,
}

/// Named palette colors accepted for `brand` and `accent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteColor {
    #[default]
    Blue,
    Indigo,
    Violet,
    Magenta,
    Pink,
    Red,
    Orange,
    Yellow,
    Moss,
    Green,
    Emerald,
    Aqua,
    Cyan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Solid {
    Color,
    #[default]
    Contrast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolidStyle {
    #[default]
    Flat,
    Plastic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Border {
    Rounded,
    #[default]
    Playful,
    Conservative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Filled,
    #[default]
    Translucent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    #[default]
    All,
    Micro,
    Macro,
}

/// Design-system theme selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub theme: Theme,
    pub neutral: Neutral,
    pub brand: PaletteColor,
    pub accent: PaletteColor,
    pub solid: Solid,
    pub solid_style: SolidStyle,
    pub border: Border,
    pub surface: Surface,
    pub transition: Transition,
}

/// Layout widths, all in rem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Max width of the content inside the header.
    pub header_width: u32,
    /// Max width of the body.
    pub body_width: u32,
    pub sidebar_width: u32,
    /// Accordion sidebar instead of a static tree.
    pub sidebar_collapsible: bool,
    /// Width of the main article column.
    pub content_width: u32,
    /// Width of the on-page table of contents.
    pub side_nav_width: u32,
    pub footer_width: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_width: 90,
            body_width: 90,
            sidebar_width: 16,
            sidebar_collapsible: false,
            content_width: 44,
            side_nav_width: 14,
            footer_width: 44,
        }
    }
}

impl LayoutConfig {
    fn widths(&self) -> [(&'static str, u32); 6] {
        [
            ("header_width", self.header_width),
            ("body_width", self.body_width),
            ("sidebar_width", self.sidebar_width),
            ("content_width", self.content_width),
            ("side_nav_width", self.side_nav_width),
            ("footer_width", self.footer_width),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub name: String,
    pub icon: String,
    pub link: String,
}

/// Organization data used in structured metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    pub logo: String,
    /// schema.org type of the publisher, usually `Organization`.
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub email: String,
    pub locale: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            logo: String::new(),
            kind: "Organization".to_string(),
            name: "Magic Docs".to_string(),
            description:
                "Magic Docs is a simple and beautiful documentation template built with Once UI."
                    .to_string(),
            email: String::new(),
            locale: "en_US".to_string(),
        }
    }
}

/// Home page labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeConfig {
    /// Sidebar label of the home link.
    pub label: String,
    /// Page title before the ` – <schema name>` suffix.
    pub title: String,
    /// Meta description. Empty falls back to `schema.description`.
    pub description: String,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            label: "Home".to_string(),
            title: "Docs".to_string(),
            description: String::new(),
        }
    }
}

/// Roadmap data source selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoadmapConfig {
    /// Read an issue-tracker snapshot instead of the built-in roadmap.
    pub use_linear: bool,
    /// Only keep issues carrying the `Public` label.
    pub public_labels_only: bool,
    /// Teams to include, by name, key or id. Empty means all teams.
    pub teams: Vec<String>,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a user
///   `[[social]]` list replaces the stock one.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(root = %root.display(), base_url = %config.base_url, "config resolved");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Magic Docs Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the content root next to the top-level meta.json.
# Unknown keys will cause an error.

# Origin of the published site. Used for canonical URLs, og images and
# structured metadata.
base_url = "https://docs.once-ui.com"

# ---------------------------------------------------------------------------
# Optional routes
# ---------------------------------------------------------------------------
[routes]
changelog = true
roadmap = true

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[style]
theme = "dark"            # dark | light
neutral = "gray"          # sand | gray | slate
# blue | indigo | violet | magenta | pink | red | orange | yellow | moss
# | green | emerald | aqua | cyan
brand = "blue"
accent = "blue"
solid = "contrast"        # color | contrast
solid_style = "flat"      # flat | plastic
border = "playful"        # rounded | playful | conservative
surface = "translucent"   # filled | translucent
transition = "all"        # all | micro | macro

# ---------------------------------------------------------------------------
# Layout (all widths in rem, must be positive)
# ---------------------------------------------------------------------------
[layout]
header_width = 90
body_width = 90
sidebar_width = 16
sidebar_collapsible = false   # accordion instead of a static tree
content_width = 44
side_nav_width = 14           # on-page table of contents
footer_width = 44

# ---------------------------------------------------------------------------
# Social links (a user list replaces this one entirely)
# ---------------------------------------------------------------------------
[[social]]
name = "GitHub"
icon = "github"
link = "https://github.com/once-ui-system"

# ---------------------------------------------------------------------------
# Organization data for structured metadata
# ---------------------------------------------------------------------------
[schema]
logo = ""
type = "Organization"
name = "Magic Docs"
description = "Magic Docs is a simple and beautiful documentation template built with Once UI."
email = ""
locale = "en_US"

# ---------------------------------------------------------------------------
# Home page
# ---------------------------------------------------------------------------
[home]
label = "Home"
title = "Docs"
# Empty uses schema.description.
description = ""

# ---------------------------------------------------------------------------
# Roadmap
# ---------------------------------------------------------------------------
[roadmap]
# Read an exported issue-tracker snapshot (linear.json) instead of the
# built-in roadmap. Falls back to the built-in data when it is missing.
use_linear = false
# Only show issues labelled "Public".
public_labels_only = false
# Restrict to these teams (name, key or id). Empty shows every team.
teams = []
"##
}

//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a `config.toml` in the content root overrides any subset
//! of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "My Site"                 # <title> and meta description fallback
//! description = "Personal website"  # <meta name="description">
//! logo = "MySite"                   # Header logo text, links home
//!
//! [theme]
//! accent = "#e55039"                # Logo and hamburger color
//! link = "#0c2461"                  # Link color (visited too)
//! border = "#eaeaeb"                # Header rule, menu separators
//! base_font_size = "18px"
//! content_width = "650px"
//! header_height = "70px"
//! logo_font = "'Libre Barcode 128 Text', Arial, Helvetica, sans-serif"
//! header_font = "Merriweather, serif"
//! body_font = "'Source Sans Pro', sans-serif"
//! font_stylesheet = "https://fonts.googleapis.com/css?family=..."  # "" disables
//!
//! [breakpoints]
//! pixels_per_unit = 16              # px per em when building media queries
//! upper_bound = "phoneOnly"         # The one max-width breakpoint
//! table = [                         # Ordered label → pixel thresholds
//!     { label = "phoneOnly", pixels = 599 },
//!     { label = "tabletPortraitUp", pixels = 600 },
//!     { label = "tabletLandscapeUp", pixels = 900 },
//!     { label = "desktopUp", pixels = 1200 },
//!     { label = "bigDesktopUp", pixels = 1800 },
//! ]
//!
//! [[social]]                        # Repeatable; none by default
//! name = "GitHub"
//! url = "https://github.com/someone"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [theme]
//! accent = "#38ada9"
//! ```
//!
//! Tables merge key by key; arrays (`breakpoints.table`, `social`) replace
//! the default wholesale. Unknown keys are rejected to catch typos early.

use crate::breakpoints::{
    BreakpointError, BreakpointStyleEngine, BreakpointTable, DEFAULT_PIXELS_PER_UNIT,
    DEFAULT_UPPER_BOUND,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file in the content root.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Breakpoint config error: {0}")]
    Breakpoint(#[from] BreakpointError),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title used in `<title>`.
    pub title: String,
    /// Content of `<meta name="description">`.
    pub description: String,
    /// Text of the header logo.
    pub logo: String,
    /// Colors, fonts and layout sizes.
    pub theme: ThemeConfig,
    /// Responsive breakpoint table.
    pub breakpoints: BreakpointsConfig,
    /// Social profile links shown on the home and about pages.
    pub social: Vec<SocialLink>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Site".to_string(),
            description: "Personal website".to_string(),
            logo: "MySite".to_string(),
            theme: ThemeConfig::default(),
            breakpoints: BreakpointsConfig::default(),
            social: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if self.breakpoints.table.is_empty() {
            return Err(ConfigError::Validation(
                "breakpoints.table must not be empty".into(),
            ));
        }
        for link in &self.social {
            if link.name.trim().is_empty() || link.url.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "social links need both name and url".into(),
                ));
            }
        }
        self.breakpoints.engine()?;
        Ok(())
    }
}

/// Theme settings: colors, fonts, layout sizes. All values are CSS.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Logo and hamburger color.
    pub accent: String,
    /// Link color, visited links included.
    pub link: String,
    /// Header bottom rule and mobile menu separators.
    pub border: String,
    pub base_font_size: String,
    /// Max width of the content column.
    pub content_width: String,
    /// Header height; also the line height of menu links.
    pub header_height: String,
    pub logo_font: String,
    pub header_font: String,
    pub body_font: String,
    /// Stylesheet URL that serves the fonts. Empty string disables it.
    pub font_stylesheet: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: "#e55039".to_string(),
            link: "#0c2461".to_string(),
            border: "#eaeaeb".to_string(),
            base_font_size: "18px".to_string(),
            content_width: "650px".to_string(),
            header_height: "70px".to_string(),
            logo_font: "'Libre Barcode 128 Text', Arial, Helvetica, sans-serif".to_string(),
            header_font: "Merriweather, serif".to_string(),
            body_font: "'Source Sans Pro', sans-serif".to_string(),
            font_stylesheet: DEFAULT_FONT_STYLESHEET.to_string(),
        }
    }
}

const DEFAULT_FONT_STYLESHEET: &str = "https://fonts.googleapis.com/css?family=Libre+Barcode+128+Text|Merriweather:700|Source+Sans+Pro:400,400i,700";

/// Breakpoint table and how it becomes media queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreakpointsConfig {
    /// Pixels per `em`.
    pub pixels_per_unit: u32,
    /// The label that acts as a `max-width` ceiling.
    pub upper_bound: String,
    /// Ordered `label → pixels` rows.
    pub table: BreakpointTable,
}

impl Default for BreakpointsConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
            upper_bound: DEFAULT_UPPER_BOUND.to_string(),
            table: BreakpointTable::default(),
        }
    }
}

impl BreakpointsConfig {
    /// Build the style engine this config describes.
    pub fn engine(&self) -> Result<BreakpointStyleEngine, BreakpointError> {
        BreakpointStyleEngine::new(&self.table, self.pixels_per_unit, &self.upper_bound)
    }
}

/// A social profile link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
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

/// Load a `config.toml` from a directory as a raw TOML value.
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
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    if overlay.is_none() {
        log::debug!("No config.toml in {}, using defaults", root.display());
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Personal Site Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at content/config.toml. Only the keys you want to change
# are needed. Unknown keys will cause an error.

# Site title, used in the <title> of every page.
title = "My Site"

# Content of <meta name="description">.
description = "Personal website"

# Header logo text. The logo links to the home page.
logo = "MySite"

# ---------------------------------------------------------------------------
# Social links
# ---------------------------------------------------------------------------
# Repeat the block for each profile. None by default.
#
# [[social]]
# name = "GitHub"
# url = "https://github.com/someone"

# ---------------------------------------------------------------------------
# Theme (CSS values)
# ---------------------------------------------------------------------------
[theme]
# Logo and hamburger color.
accent = "#e55039"

# Link color, visited links included.
link = "#0c2461"

# Header bottom rule and mobile menu separators.
border = "#eaeaeb"

base_font_size = "18px"

# Max width of the content column.
content_width = "650px"

# Header height; also the line height of menu links.
header_height = "70px"

logo_font = "'Libre Barcode 128 Text', Arial, Helvetica, sans-serif"
header_font = "Merriweather, serif"
body_font = "'Source Sans Pro', sans-serif"

# Stylesheet serving the fonts above. Set to "" to self-host or skip.
font_stylesheet = "https://fonts.googleapis.com/css?family=Libre+Barcode+128+Text|Merriweather:700|Source+Sans+Pro:400,400i,700"

# ---------------------------------------------------------------------------
# Responsive breakpoints
# ---------------------------------------------------------------------------
[breakpoints]
# Pixels per em when converting thresholds to media queries.
pixels_per_unit = 16

# The single breakpoint that is an upper bound (max-width). Every other
# label is a lower bound (min-width).
upper_bound = "phoneOnly"

# Ordered label -> pixel thresholds. Replacing this list replaces all rows.
table = [
    { label = "phoneOnly", pixels = 599 },
    { label = "tabletPortraitUp", pixels = 600 },
    { label = "tabletLandscapeUp", pixels = 900 },
    { label = "desktopUp", pixels = 1200 },
    { label = "bigDesktopUp", pixels = 1800 },
]
"##
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --color-accent: {accent};
    --color-link: {link};
    --color-border: {border};
    --font-size-base: {base_font_size};
    --content-width: {content_width};
    --header-height: {header_height};
    --font-logo: {logo_font};
    --font-header: {header_font};
    --font-body: {body_font};
}}"#,
        accent = theme.accent,
        link = theme.link,
        border = theme.border,
        base_font_size = theme.base_font_size,
        content_width = theme.content_width,
        header_height = theme.header_height,
        logo_font = theme.logo_font,
        header_font = theme.header_font,
        body_font = theme.body_font,
    )
}

//! # Personal Site
//!
//! A static generator for a personal website: a home page with recent
//! writing, a full writing listing, an about page and one page per article.
//! The content directory is the data source; articles are markdown with TOML
//! front matter.
//!
//! # Architecture
//!
//! A build loads content and config, derives views, and renders pages:
//!
//! ```text
//! content/  →  SiteContent        (content::load)
//! config    →  SiteConfig         (config::load_config)
//! items     →  recent / listing   (query)
//! all       →  dist/              (render::generate)
//! ```
//!
//! The core of the crate has no I/O. [`query`] turns the raw collection into
//! filtered, ordered, bounded views; [`breakpoints`] turns one ordered table
//! of screen widths into `@media` conditions; [`menu`] is the two-state
//! toggle behind the mobile navigation. The loaders and the renderer are the
//! driver around that core and the core never depends on them.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`query`] | Published-only, newest-first views: recent (capped at 3) and the full listing |
//! | [`breakpoints`] | Breakpoint table → media conditions; wraps CSS fragments per label |
//! | [`menu`] | Collapsed/expanded state of the mobile menu |
//! | [`types`] | Shared data types (`ContentItem`, `Page`, `NavItem`) |
//! | [`content`] | Walks the content directory, parses front matter, builds excerpts |
//! | [`naming`] | `YYYY-MM-DD-slug` filename convention parser |
//! | [`config`] | `config.toml` loading, validation, merging and theme CSS generation |
//! | [`render`] | Renders the HTML site with Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Publication Is a String
//!
//! An item is public exactly when its `published` field is the text `"true"`.
//! Anything else, including a missing field, keeps it off the site. Front
//! matter written as a TOML boolean is read as its text, so `published = true`
//! still publishes.
//!
//! ## One Breakpoint Table
//!
//! Screen widths live in one ordered table in `config.toml`, converted to
//! `em` at a configurable pixels-per-unit ratio. One label is the phone
//! ceiling (`max-width`); every other label is a floor (`min-width`). Page
//! styles never spell out a width; they ask the engine for a label.
//!
//! ## No JavaScript
//!
//! The menu toggle is rendered as a hidden checkbox and its label, so the
//! generated site works without scripts. The initial state of every page's
//! menu comes from a [`menu::MenuToggle`] owned by that page's render.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Templates are checked at build time and all interpolation is
//! auto-escaped.

pub mod breakpoints;
pub mod config;
pub mod content;
pub mod menu;
pub mod naming;
pub mod output;
pub mod query;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

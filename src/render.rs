//! HTML site generation.
//!
//! Takes the loaded content and the resolved config and writes the static
//! site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): introduction from `index.md`, social links and
//!   the three most recent published articles
//! - **Writing** (`/writing/index.html`): every published article with a post count
//! - **Articles** (`/writing/<slug>/index.html`): one page per published article
//! - **About** (`/about/index.html`): `about.md` rendered, if present
//!
//! Unpublished articles get no page at all.
//!
//! ## Page Shell
//!
//! Every page shares one shell: a header with the logo (links home), the
//! hamburger control and the menu, then the content column. The menu's
//! visibility on phones is a [`MenuToggle`] owned by that page's render. The
//! output has no JavaScript: the state becomes the `checked` attribute of a
//! hidden checkbox, and a phone-only rule shows the menu while it is checked.
//!
//! ## CSS
//!
//! The inline stylesheet is assembled from three parts:
//! - `:root` custom properties generated from `[theme]`
//! - `static/style.css`, embedded at compile time
//! - responsive rules, each wrapped by the [`BreakpointStyleEngine`]
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::breakpoints::{BreakpointError, BreakpointStyleEngine};
use crate::config::{self, SiteConfig, SocialLink};
use crate::content::{SiteContent, WRITING_URL};
use crate::menu::MenuToggle;
use crate::query::{self, Listing};
use crate::types::{ContentItem, NavItem, Page};
use chrono::NaiveDate;
use log::{debug, info};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Breakpoint error: {0}")]
    Breakpoint(#[from] BreakpointError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

const ABOUT_URL: &str = "/about/";

/// A page written by [`generate`].
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenPage {
    pub title: String,
    /// Output path relative to the output directory
    pub output: String,
}

/// What [`generate`] wrote, in write order.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub home: Option<WrittenPage>,
    pub listing: Option<WrittenPage>,
    pub about: Option<WrittenPage>,
    pub articles: Vec<WrittenPage>,
}

/// Everything page renderers share: config, stylesheet, menu entries.
pub struct SiteRenderer<'a> {
    config: &'a SiteConfig,
    css: String,
    nav: Vec<NavItem>,
}

impl<'a> SiteRenderer<'a> {
    pub fn new(config: &'a SiteConfig, has_about: bool) -> Result<Self, RenderError> {
        let engine = config.breakpoints.engine()?;
        let css = build_stylesheet(config, &engine)?;
        let mut nav = Vec::new();
        if has_about {
            nav.push(NavItem {
                title: "About".to_string(),
                path: ABOUT_URL.to_string(),
            });
        }
        nav.push(NavItem {
            title: "Writing".to_string(),
            path: WRITING_URL.to_string(),
        });
        Ok(Self { config, css, nav })
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    // ========================================================================
    // Shell
    // ========================================================================

    /// Renders the full document: head, header with menu, content column.
    fn page_shell(&self, title: &str, current_path: &str, content: Markup) -> Markup {
        let menu = MenuToggle::new();
        let page_title = if title == self.config.title {
            title.to_string()
        } else {
            format!("{} | {}", title, self.config.title)
        };
        let font_stylesheet = Some(self.config.theme.font_stylesheet.as_str())
            .filter(|url| !url.is_empty());

        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (page_title) }
                    meta name="description" content=(self.config.description);
                    @if let Some(url) = font_stylesheet {
                        link rel="stylesheet" href=(url);
                    }
                    style { (PreEscaped(&self.css)) }
                }
                body {
                    header.header {
                        a.logo-link href="/" {
                            div.logo { (self.config.logo) }
                        }
                        (render_menu(&self.nav, current_path, &menu))
                    }
                    main.container {
                        (content)
                    }
                }
            }
        }
    }

    // ========================================================================
    // Page Renderers
    // ========================================================================

    /// Home page: introduction, social links, recent articles.
    pub fn render_home(&self, home: Option<&Page>, recent: &[&ContentItem]) -> Markup {
        let content = html! {
            @if !self.config.social.is_empty() {
                p { (render_social_links(&self.config.social)) }
            }
            @if let Some(page) = home {
                (PreEscaped(markdown_to_html(&page.body)))
            }
            section.recent {
                h3 { "Recent Blog Posts" }
                @for item in recent {
                    div.recent-item {
                        h4.headline {
                            (short_date(item.updated_at)) ": "
                            a href=(item.path) { (item.title) }
                        }
                        p { (item.excerpt) }
                    }
                }
            }
        };
        self.page_shell(&self.config.title, "/", content)
    }

    /// Writing listing: post count, then every published article.
    pub fn render_listing(&self, listing: &Listing<'_>) -> Markup {
        let content = html! {
            h2 { "Writing" }
            div {
                h4 { (post_count(listing.total_count)) }
                @for item in &listing.items {
                    div.preview {
                        a href=(item.path) {
                            h3.headline { (item.title) }
                        }
                        p.date-line { "— " (long_date(item.updated_at)) }
                        p { (item.excerpt) }
                    }
                }
            }
        };
        self.page_shell("Writing", WRITING_URL, content)
    }

    /// A single article.
    pub fn render_article(&self, item: &ContentItem) -> Markup {
        let content = html! {
            article.article {
                h1 { (item.title) }
                p.date-line { (long_date(item.updated_at)) }
                (PreEscaped(markdown_to_html(&item.body)))
            }
        };
        self.page_shell(&item.title, &item.path, content)
    }

    /// About page from markdown, followed by social links.
    pub fn render_about(&self, about: &Page) -> Markup {
        let content = html! {
            div.about {
                (PreEscaped(markdown_to_html(&about.body)))
                @if !self.config.social.is_empty() {
                    p { (render_social_links(&self.config.social)) }
                }
            }
        };
        self.page_shell(&about.title, ABOUT_URL, content)
    }
}

/// Write the whole site into `output_dir`.
pub fn generate(
    content: &SiteContent,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<GenerateReport, RenderError> {
    let renderer = SiteRenderer::new(config, content.about.is_some())?;
    let mut report = GenerateReport::default();

    fs::create_dir_all(output_dir)?;

    let recent = query::recent_view(&content.items);
    let home_html = renderer.render_home(content.home.as_ref(), &recent);
    write_page(output_dir, "/", home_html)?;
    report.home = Some(written(&config.title, "/"));

    let listing = query::full_listing_view(&content.items);
    write_page(output_dir, WRITING_URL, renderer.render_listing(&listing))?;
    report.listing = Some(written(&post_count(listing.total_count), WRITING_URL));

    if let Some(about) = &content.about {
        write_page(output_dir, ABOUT_URL, renderer.render_about(about))?;
        report.about = Some(written(&about.title, ABOUT_URL));
    }

    for item in &listing.items {
        write_page(output_dir, &item.path, renderer.render_article(item))?;
        debug!("Wrote article {}", item.path);
        report.articles.push(written(&item.title, &item.path));
    }

    info!(
        "Generated {} pages at {}",
        report.articles.len() + 2 + usize::from(report.about.is_some()),
        output_dir.display()
    );
    Ok(report)
}

fn written(title: &str, url_path: &str) -> WrittenPage {
    WrittenPage {
        title: title.to_string(),
        output: page_file(url_path).to_string_lossy().replace('\\', "/"),
    }
}

/// Relative output file for a site-absolute URL path: `/writing/x/` → `writing/x/index.html`.
fn page_file(url_path: &str) -> PathBuf {
    let trimmed = url_path.trim_matches('/');
    if trimmed.is_empty() {
        PathBuf::from("index.html")
    } else {
        Path::new(trimmed).join("index.html")
    }
}

fn write_page(output_dir: &Path, url_path: &str, markup: Markup) -> std::io::Result<()> {
    let file = output_dir.join(page_file(url_path));
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file, markup.into_string())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the hamburger control and the menu.
///
/// The checkbox precedes the menu so the phone rule
/// `.menu-toggle:checked ~ .menu` can reveal it.
pub fn render_menu(items: &[NavItem], current_path: &str, menu: &MenuToggle) -> Markup {
    let state = menu.state();
    html! {
        input.menu-toggle type="checkbox" id="menu-toggle" checked[menu.is_expanded()];
        label.hamburger for="menu-toggle" aria-controls="menu" aria-expanded=(state.aria_expanded()) {
            (PreEscaped("&#9776;"))
        }
        nav.menu id="menu" {
            @for item in items {
                @let is_current = current_path.starts_with(&item.path);
                a.menu-link.current[is_current] href=(item.path) { (item.title) }
            }
        }
    }
}

fn render_social_links(links: &[SocialLink]) -> Markup {
    html! {
        @for link in links {
            a.social-link href=(link.url) target="_blank" rel="noopener" { (link.name) }
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Assemble the inline stylesheet.
///
/// Responsive rules target the config's upper-bound breakpoint, the phone
/// ceiling, so renaming labels in config cannot leave a dangling lookup.
pub fn build_stylesheet(
    config: &SiteConfig,
    engine: &BreakpointStyleEngine,
) -> Result<String, BreakpointError> {
    let phone = engine.for_label(&config.breakpoints.upper_bound)?;
    let responsive = [
        phone.wrap(".hamburger {\n    display: inline-block;\n    cursor: pointer;\n}"),
        phone.wrap(
            ".menu {\n    text-align: center;\n    width: 100%;\n    margin: 0;\n    display: none;\n}\n\
             .menu-toggle:checked ~ .menu {\n    display: block;\n}",
        ),
        phone.wrap(
            ".menu-link {\n    display: block;\n    border-top: 1px solid var(--color-border);\n    margin: 0;\n}",
        ),
    ]
    .iter()
    .map(|rule| rule.to_css())
    .collect::<Vec<_>>()
    .join("\n\n");

    Ok(format!(
        "{}\n\n{}\n{}",
        config::generate_theme_css(&config.theme),
        CSS_STATIC,
        responsive
    ))
}

pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

/// `M/D/YYYY`, used on the home page. Empty for undated items.
pub fn short_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_default()
}

/// `MMM D, YYYY`, used on the listing and article pages. Empty for undated items.
pub fn long_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// `1 Post`, `3 Posts`, `0 Posts`.
pub fn post_count(count: usize) -> String {
    if count == 1 {
        "1 Post".to_string()
    } else {
        format!("{count} Posts")
    }
}

// ============================================================================
// Tests
// ============================================================================

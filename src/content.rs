//! Content loading: markdown files → [`ContentItem`]s and site pages.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                          # Site configuration (optional)
//! ├── index.md                             # Home page introduction (optional)
//! ├── about.md                             # About page (optional)
//! └── writing/                             # Articles, searched recursively
//!     ├── 2019-01-15-first-post.md         # Date prefix = fallback date
//!     ├── docker-for-rails.md
//!     └── notes/
//!         └── 2019-05-20-react-hooks.md
//! ```
//!
//! ## Front Matter
//!
//! Articles start with TOML front matter between `+++` fences:
//!
//! ```text
//! +++
//! title = "Docker for Rails Development"
//! published = "true"
//! updated_at = 2019-03-02
//! +++
//!
//! Article body in markdown…
//! ```
//!
//! - `published` is kept as text. Strings are taken verbatim, other TOML
//!   values by their TOML rendering, so `published = true` reads as `"true"`.
//!   Only `"true"` publishes.
//! - `updated_at` may be a TOML date, a `YYYY-MM-DD` string or an RFC 3339
//!   timestamp. Without a readable one, the filename date prefix is used;
//!   without that, the item has no date and sorts last. A bad date is a
//!   warning, never an error: one broken entry must not stop the site build.
//! - `title` defaults to the display title of the filename.
//!
//! Unknown front matter keys are ignored so articles can carry extra
//! metadata for other tools.
//!
//! ## Collection Order
//!
//! Files are read in sorted path order. That order breaks ties between
//! items with the same date.

use crate::naming::{self, ParsedName};
use crate::types::{ContentItem, Page};
use chrono::{DateTime, NaiveDate};
use log::{debug, info, warn};
use pulldown_cmark::{Event, Parser, TagEnd};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid front matter in {path}: {message}")]
    FrontMatter { path: PathBuf, message: String },
    #[error("Duplicate article slug {0} in {1}")]
    DuplicateSlug(String, PathBuf),
    #[error("File name gives no usable slug: {0}")]
    EmptySlug(PathBuf),
}

/// Directory under the content root that holds articles.
pub const WRITING_DIR: &str = "writing";

/// URL prefix of article pages and of the listing.
pub const WRITING_URL: &str = "/writing/";

/// Maximum excerpt length in characters, before the ellipsis.
pub const EXCERPT_LENGTH: usize = 140;

const FENCE: &str = "+++";

/// Everything the build reads from the content directory.
#[derive(Debug, Serialize)]
pub struct SiteContent {
    /// Articles in collection order (sorted source path)
    pub items: Vec<ContentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<Page>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<Page>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FrontMatter {
    title: Option<String>,
    published: Option<toml::Value>,
    updated_at: Option<toml::Value>,
}

pub fn load(root: &Path) -> Result<SiteContent, ContentError> {
    let items = load_articles(root)?;
    let home = load_page(root, "index")?;
    let about = load_page(root, "about")?;

    info!(
        "Loaded {} articles ({} published) from {}",
        items.len(),
        items.iter().filter(|i| i.is_published()).count(),
        root.display()
    );

    Ok(SiteContent { items, home, about })
}

/// Load every `.md` file under `<root>/writing/`, in sorted path order.
///
/// A missing writing directory yields an empty collection.
pub fn load_articles(root: &Path) -> Result<Vec<ContentItem>, ContentError> {
    let dir = root.join(WRITING_DIR);
    if !dir.is_dir() {
        debug!("No {} directory in {}", WRITING_DIR, root.display());
        return Ok(Vec::new());
    }

    let mut items: Vec<ContentItem> = Vec::new();
    let walker = WalkDir::new(&dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.'));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }
        let item = parse_article(root, entry.path())?;
        if items.iter().any(|existing| existing.path == item.path) {
            return Err(ContentError::DuplicateSlug(
                item.path,
                entry.path().to_path_buf(),
            ));
        }
        items.push(item);
    }
    Ok(items)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// Read and parse one article file.
pub fn parse_article(root: &Path, path: &Path) -> Result<ContentItem, ContentError> {
    let source = fs::read_to_string(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let id = path
        .strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let name = naming::parse_article_name(&stem);
    if name.slug.is_empty() {
        return Err(ContentError::EmptySlug(path.to_path_buf()));
    }
    build_item(id, name, &source).map_err(|message| ContentError::FrontMatter {
        path: path.to_path_buf(),
        message,
    })
}

/// Build an item from its id, parsed file name and raw source text.
fn build_item(id: String, name: ParsedName, source: &str) -> Result<ContentItem, String> {
    let (front, body) = split_front_matter(source)?;
    let front: FrontMatter = match front {
        Some(text) => toml::from_str(text).map_err(|e| e.to_string())?,
        None => FrontMatter::default(),
    };

    let published = front.published.as_ref().map(flag_text).unwrap_or_default();

    let updated_at = match front.updated_at.as_ref() {
        Some(value) => match parse_date(value) {
            Some(date) => Some(date),
            None => {
                warn!("{id}: unreadable updated_at {value}, falling back to filename date");
                name.date
            }
        },
        None => name.date,
    };
    if updated_at.is_none() {
        warn!("{id}: no date, listing it last");
    }

    let title = front
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or(name.display_title);

    Ok(ContentItem {
        excerpt: excerpt(body, EXCERPT_LENGTH),
        path: format!("{WRITING_URL}{}/", name.slug),
        id,
        title,
        published,
        updated_at,
        body: body.to_string(),
    })
}

/// Split `+++`-fenced front matter from the body.
///
/// Returns `(None, source)` when the file does not start with a fence.
/// An opening fence without a closing one is an error.
pub fn split_front_matter(source: &str) -> Result<(Option<&str>, &str), String> {
    let trimmed = source.trim_start_matches('\u{feff}');
    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return Ok((None, source));
    };
    let Some(rest) = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
    else {
        return Ok((None, source));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((Some(front), body.trim_start_matches(['\r', '\n'])));
        }
        offset += line.len();
    }
    Err("front matter is not closed with +++".to_string())
}

fn flag_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_date(value: &toml::Value) -> Option<NaiveDate> {
    match value {
        toml::Value::Datetime(dt) => dt.date.and_then(|d| {
            NaiveDate::from_ymd_opt(i32::from(d.year), u32::from(d.month), u32::from(d.day))
        }),
        toml::Value::String(s) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
        }
        _ => None,
    }
}

/// Plain-text preview of a markdown body.
///
/// Markup is dropped, whitespace collapsed, and text longer than `max`
/// characters is cut and ends with `…`.
pub fn excerpt(markdown: &str, max: usize) -> String {
    let mut text = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell,
            ) => text.push(' '),
            _ => {}
        }
    }
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}

/// Load `<root>/<slug>.md` as a site page, if it exists.
pub fn load_page(root: &Path, slug: &str) -> Result<Option<Page>, ContentError> {
    let path = root.join(format!("{slug}.md"));
    if !path.is_file() {
        return Ok(None);
    }
    let body = fs::read_to_string(&path)?;
    let title = body
        .lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
        .unwrap_or_else(|| slug.to_string());
    Ok(Some(Page {
        title,
        slug: slug.to_string(),
        body,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{full_listing_view, recent_view};
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn date(s: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }

    fn write_article(root: &Path, name: &str, source: &str) {
        let dir = root.join(WRITING_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), source).unwrap();
    }

    // =========================================================================
    // Fixture tree
    // =========================================================================

    #[test]
    fn load_finds_all_articles() {
        let tmp = setup_fixtures();
        let site = load(tmp.path()).unwrap();
        assert_eq!(site.items.len(), 6);
    }

    #[test]
    fn collection_order_is_sorted_path() {
        let tmp = setup_fixtures();
        let site = load(tmp.path()).unwrap();
        let ids: Vec<&str> = site.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "writing/2019-01-15-first-post.md",
                "writing/2019-02-10-postgres-tips.md",
                "writing/docker-for-rails.md",
                "writing/draft-thoughts.md",
                "writing/notes/2019-05-20-react-hooks.md",
                "writing/undated.md",
            ]
        );
    }

    #[test]
    fn fixture_views() {
        let tmp = setup_fixtures();
        let site = load(tmp.path()).unwrap();

        let recent = recent_view(&site.items);
        assert_eq!(
            titles(&recent),
            vec![
                "Using React Hooks",
                "Docker for Rails Development",
                "Postgres Tips"
            ]
        );

        let listing = full_listing_view(&site.items);
        assert_eq!(listing.total_count, 5);
        assert_eq!(listing.items.last().unwrap().title, "undated");
    }

    #[test]
    fn front_matter_fields() {
        let tmp = setup_fixtures();
        let site = load(tmp.path()).unwrap();
        let docker = find_item(&site.items, "docker-for-rails");
        assert_eq!(docker.title, "Docker for Rails Development");
        assert_eq!(docker.published, "true");
        assert_eq!(docker.updated_at, date("2019-03-02"));
        assert!(!docker.body.contains("+++"));
    }

    #[test]
    fn boolean_flag_reads_as_text() {
        let tmp = setup_fixtures();
        let site = load(tmp.path()).unwrap();
        let hooks = find_item(&site.items, "react-hooks");
        assert_eq!(hooks.published, "true");
        assert!(hooks.is_published());
    }

    #[test]
    fn filename_date_is_fallback() {
        let tmp = setup_fixtures();
        let site = load(tmp.path()).unwrap();
        let postgres = find_item(&site.items, "postgres-tips");
        assert_eq!(postgres.updated_at, date("2019-02-10"));
    }

    #[test]
    fn missing_date_is_none() {
        let tmp = setup_fixtures();
        let site = load(tmp.path()).unwrap();
        let undated = find_item(&site.items, "undated");
        assert_eq!(undated.updated_at, None);
        assert_eq!(undated.title, "undated");
    }

    #[test]
    fn site_pages_loaded() {
        let tmp = setup_fixtures();
        let site = load(tmp.path()).unwrap();
        assert_eq!(site.about.unwrap().title, "About Me");
        assert!(site.home.is_some());
    }

    // =========================================================================
    // Single files
    // =========================================================================

    #[test]
    fn missing_writing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let site = load(tmp.path()).unwrap();
        assert!(site.items.is_empty());
        assert!(site.home.is_none());
        assert!(site.about.is_none());
    }

    #[test]
    fn unreadable_date_degrades() {
        let tmp = TempDir::new().unwrap();
        write_article(
            tmp.path(),
            "broken-date.md",
            "+++\npublished = \"true\"\nupdated_at = \"sometime in May\"\n+++\nBody",
        );
        let items = load_articles(tmp.path()).unwrap();
        assert_eq!(items[0].updated_at, None);
        assert!(items[0].is_published());
    }

    #[test]
    fn rfc3339_string_date() {
        let tmp = TempDir::new().unwrap();
        write_article(
            tmp.path(),
            "stamped.md",
            "+++\nupdated_at = \"2020-06-01T10:30:00Z\"\n+++\nBody",
        );
        let items = load_articles(tmp.path()).unwrap();
        assert_eq!(items[0].updated_at, date("2020-06-01"));
    }

    #[test]
    fn missing_flag_is_unpublished() {
        let tmp = TempDir::new().unwrap();
        write_article(tmp.path(), "plain.md", "Just a body, no front matter.");
        let items = load_articles(tmp.path()).unwrap();
        assert_eq!(items[0].published, "");
        assert!(!items[0].is_published());
        assert_eq!(items[0].excerpt, "Just a body, no front matter.");
    }

    #[test]
    fn invalid_front_matter_is_error() {
        let tmp = TempDir::new().unwrap();
        write_article(tmp.path(), "bad.md", "+++\ntitle = [unclosed\n+++\nBody");
        let result = load_articles(tmp.path());
        assert!(matches!(result, Err(ContentError::FrontMatter { .. })));
    }

    #[test]
    fn unclosed_front_matter_is_error() {
        let tmp = TempDir::new().unwrap();
        write_article(tmp.path(), "open.md", "+++\ntitle = \"x\"\nBody");
        let err = load_articles(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("not closed"));
    }

    #[test]
    fn duplicate_slug_is_error() {
        let tmp = TempDir::new().unwrap();
        write_article(tmp.path(), "2019-01-01-same.md", "one");
        write_article(tmp.path(), "same.md", "two");
        let result = load_articles(tmp.path());
        assert!(matches!(result, Err(ContentError::DuplicateSlug(_, _))));
    }

    #[test]
    fn url_syntax_is_dropped_from_slugs() {
        let tmp = TempDir::new().unwrap();
        write_article(tmp.path(), "c#-tips.md", "sharp");
        write_article(tmp.path(), "what?.md", "question");
        let items = load_articles(tmp.path()).unwrap();
        let paths: Vec<&str> = items.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["/writing/c-tips/", "/writing/what/"]);
    }

    #[test]
    fn dated_stem_without_name_uses_date_slug() {
        let tmp = TempDir::new().unwrap();
        write_article(tmp.path(), "2019-01-01-real.md", "real");
        write_article(tmp.path(), "2019-02-01---.md", "dashes only");
        let items = load_articles(tmp.path()).unwrap();
        assert_eq!(items[0].path, "/writing/real/");
        assert_eq!(items[1].path, "/writing/2019-02-01/");
        assert_eq!(items[1].updated_at, date("2019-02-01"));
    }

    #[test]
    fn punctuation_only_stem_is_error() {
        let tmp = TempDir::new().unwrap();
        write_article(tmp.path(), "_.md", "nothing to name it by");
        let result = load_articles(tmp.path());
        assert!(matches!(result, Err(ContentError::EmptySlug(_))));
    }

    #[test]
    fn odd_file_names_never_replace_listing() {
        let tmp = TempDir::new().unwrap();
        let published = "+++\npublished = \"true\"\n+++\n\nBody text.\n";
        write_article(tmp.path(), "2019-01-01-real.md", published);
        write_article(tmp.path(), "2019-02-01---.md", published);
        write_article(tmp.path(), "c#-tips.md", published);
        let items = load_articles(tmp.path()).unwrap();
        assert!(items.iter().all(|i| i.path != WRITING_URL && !i.path.contains("//")));

        let site = SiteContent {
            items,
            home: None,
            about: None,
        };
        let out = tmp.path().join("dist");
        crate::render::generate(&site, &crate::config::SiteConfig::default(), &out).unwrap();
        let listing = fs::read_to_string(out.join("writing/index.html")).unwrap();
        assert!(listing.contains("3 Posts"));
        assert!(out.join("writing/2019-02-01/index.html").exists());
        assert!(out.join("writing/c-tips/index.html").exists());
    }

    #[test]
    fn non_markdown_files_skipped() {
        let tmp = TempDir::new().unwrap();
        write_article(tmp.path(), "notes.txt", "not an article");
        write_article(tmp.path(), ".hidden.md", "hidden");
        write_article(tmp.path(), "real.md", "real");
        let items = load_articles(tmp.path()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path, "/writing/real/");
    }

    // =========================================================================
    // split_front_matter / excerpt
    // =========================================================================

    #[test]
    fn split_without_front_matter() {
        let (front, body) = split_front_matter("# Hello\n\nWorld").unwrap();
        assert!(front.is_none());
        assert_eq!(body, "# Hello\n\nWorld");
    }

    #[test]
    fn split_with_front_matter() {
        let (front, body) = split_front_matter("+++\ntitle = \"A\"\n+++\n\nBody\n").unwrap();
        assert_eq!(front, Some("title = \"A\"\n"));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn split_handles_crlf() {
        let (front, body) = split_front_matter("+++\r\ntitle = \"A\"\r\n+++\r\nBody").unwrap();
        assert_eq!(front, Some("title = \"A\"\r\n"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn excerpt_strips_markup() {
        let text = excerpt("# Heading\n\nSome **bold** and `code`.\n\n- a\n- b", 140);
        assert_eq!(text, "Heading Some bold and code. a b");
    }

    #[test]
    fn excerpt_truncates_with_ellipsis() {
        let body = "word ".repeat(100);
        let text = excerpt(&body, 20);
        assert_eq!(text, "word word word word…");
        assert!(text.chars().count() <= 21);
    }

    #[test]
    fn excerpt_truncates_on_char_boundary() {
        let text = excerpt("ääääää", 3);
        assert_eq!(text, "äää…");
    }
}

//! Shared test utilities for the personal-site test suite.
//!
//! Provides item builders for query tests, the fixture content tree, and
//! lookup helpers that panic with the available choices on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let collection = vec![item("may", "2019-05-10", "true")];
//! assert_eq!(ids(&recent_view(&collection)), vec!["may"]);
//!
//! let tmp = setup_fixtures();
//! let site = content::load(tmp.path()).unwrap();
//! let hooks = find_item(&site.items, "react-hooks");
//! ```

use chrono::NaiveDate;
use std::path::Path;
use tempfile::TempDir;

use crate::types::ContentItem;

// =========================================================================
// Item builders
// =========================================================================

/// Build an item with the given id, `YYYY-MM-DD` date and published flag.
pub fn item(id: &str, date: &str, published: &str) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        title: format!("Title of {id}"),
        excerpt: format!("Excerpt of {id}"),
        published: published.to_string(),
        updated_at: Some(
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .unwrap_or_else(|e| panic!("bad test date {date:?}: {e}")),
        ),
        path: format!("/writing/{id}/"),
        body: String::new(),
    }
}

/// Ids of a view, in order.
pub fn ids<'a>(items: &[&'a ContentItem]) -> Vec<&'a str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

/// Titles of a view, in order.
pub fn titles<'a>(items: &[&'a ContentItem]) -> Vec<&'a str> {
    items.iter().map(|i| i.title.as_str()).collect()
}

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
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Lookups (panic with a clear message on miss)
// =========================================================================

/// Find a loaded item by the slug in its path. Panics if not found.
pub fn find_item<'a>(items: &'a [ContentItem], slug: &str) -> &'a ContentItem {
    let path = format!("/writing/{slug}/");
    items.iter().find(|i| i.path == path).unwrap_or_else(|| {
        let paths: Vec<&str> = items.iter().map(|i| i.path.as_str()).collect();
        panic!("item '{slug}' not found. Available: {paths:?}")
    })
}

//! Shared types passed from content loading to queries and rendering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The flag value that marks an item as published.
///
/// Comparison is on the literal text: `"True"`, `"yes"` or an empty flag
/// all leave the item unpublished.
pub const PUBLISHED: &str = "true";

/// One authored document from `content/writing/`.
///
/// Items are read-only once loaded; queries only filter, sort and slice
/// borrowed references to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Source path relative to the content root (unique per item)
    pub id: String,
    pub title: String,
    /// Plain-text preview, already truncated
    pub excerpt: String,
    /// Raw `published` front matter value
    pub published: String,
    /// `None` when the source had no readable date; such items sort last
    pub updated_at: Option<NaiveDate>,
    /// Site-absolute URL path, e.g. `/writing/hello-world/`
    pub path: String,
    /// Markdown body without front matter
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
}

impl ContentItem {
    pub fn is_published(&self) -> bool {
        self.published == PUBLISHED
    }
}

/// A site page built from a markdown file in the content root
/// (`index.md`, `about.md`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Title from first `# heading` in markdown, or the slug as fallback
    pub title: String,
    /// File stem, e.g. `about`
    pub slug: String,
    /// Raw markdown content
    pub body: String,
}

/// A link in the header menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub title: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::item;

    #[test]
    fn only_literal_true_is_published() {
        let mut it = item("a", "2019-01-01", "true");
        assert!(it.is_published());
        for flag in ["True", "TRUE", "yes", "1", "", "false", " true"] {
            it.published = flag.to_string();
            assert!(!it.is_published(), "{flag:?} must not publish");
        }
    }
}

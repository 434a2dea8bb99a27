//! CLI output formatting for the scan, check and build commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every article is
//! shown by its positional index and title, with its URL, date and
//! publication status as indented context lines. That reads as a content
//! inventory while still letting users trace an entry back to its page.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Articles
//! 001 First Post
//!     Path: /writing/first-post/
//!     Date: 2019-01-15
//! 002 Draft Thoughts
//!     Path: /writing/draft-thoughts/
//!     Date: (none)
//!     Status: draft
//!
//! Pages
//!     Home: index.md
//!     About: about.md
//!
//! Found 2 articles (1 published)
//! ```
//!
//! ## Generate
//!
//! ```text
//! My Site → index.html
//! 1 Post → writing/index.html
//! About Me → about/index.html
//!     001 First Post → writing/first-post/index.html
//!
//! Generated 1 article page, 3 site pages
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::content::SiteContent;
use crate::render::{GenerateReport, WrittenPage};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn page_line(depth: usize, index: Option<usize>, page: &WrittenPage) -> String {
    match index {
        Some(i) => format!(
            "{}{} {} \u{2192} {}",
            indent(depth),
            format_index(i),
            page.title,
            page.output
        ),
        None => format!("{}{} \u{2192} {}", indent(depth), page.title, page.output),
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the loaded content as an inventory.
///
/// Drafts get an explicit `Status:` line; published items do not.
/// `has_config` adds the `Config` section for a `config.toml` in the source.
pub fn format_content_output(content: &SiteContent, has_config: bool) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Articles".to_string());
    for (i, item) in content.items.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), item.title));
        lines.push(format!("{}Path: {}", indent(1), item.path));
        let date = item
            .updated_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "(none)".to_string());
        lines.push(format!("{}Date: {}", indent(1), date));
        if !item.is_published() {
            lines.push(format!("{}Status: draft", indent(1)));
        }
    }

    if content.home.is_some() || content.about.is_some() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        if content.home.is_some() {
            lines.push(format!("{}Home: index.md", indent(1)));
        }
        if content.about.is_some() {
            lines.push(format!("{}About: about.md", indent(1)));
        }
    }

    if has_config {
        lines.push(String::new());
        lines.push("Config".to_string());
        lines.push(format!("{}config.toml", indent(1)));
    }

    lines.push(String::new());
    lines.push(format!(
        "Found {} ({} published)",
        plural(content.items.len(), "article"),
        content.items.iter().filter(|i| i.is_published()).count()
    ));

    lines
}

/// Print scan output to stdout.
pub fn print_content_output(content: &SiteContent, has_config: bool) {
    for line in format_content_output(content, has_config) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format the pages written by a build, site pages first, then articles.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    let site_pages: Vec<&WrittenPage> = [&report.home, &report.listing, &report.about]
        .into_iter()
        .flatten()
        .collect();
    for page in &site_pages {
        lines.push(page_line(0, None, page));
    }
    for (i, page) in report.articles.iter().enumerate() {
        lines.push(page_line(1, Some(i + 1), page));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(report.articles.len(), "article page"),
        plural(site_pages.len(), "site page")
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::item;
    use crate::types::Page;

    fn page(title: &str, output: &str) -> WrittenPage {
        WrittenPage {
            title: title.to_string(),
            output: output.to_string(),
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "article"), "1 article");
        assert_eq!(plural(0, "article"), "0 articles");
        assert_eq!(plural(2, "site page"), "2 site pages");
    }

    // =========================================================================
    // Scan output
    // =========================================================================

    #[test]
    fn content_output_lists_items_with_context() {
        let mut undated = item("later", "2020-01-01", "false");
        undated.updated_at = None;
        let content = SiteContent {
            items: vec![item("first", "2019-01-15", "true"), undated],
            home: None,
            about: Some(Page {
                title: "About Me".to_string(),
                slug: "about".to_string(),
                body: String::new(),
            }),
        };

        let lines = format_content_output(&content, false);
        assert_eq!(
            lines,
            vec![
                "Articles",
                "001 Title of first",
                "    Path: /writing/first/",
                "    Date: 2019-01-15",
                "002 Title of later",
                "    Path: /writing/later/",
                "    Date: (none)",
                "    Status: draft",
                "",
                "Pages",
                "    About: about.md",
                "",
                "Found 2 articles (1 published)",
            ]
        );
    }

    #[test]
    fn content_output_mentions_config_when_present() {
        let content = SiteContent {
            items: vec![],
            home: None,
            about: None,
        };
        let lines = format_content_output(&content, true);
        assert!(lines.contains(&"Config".to_string()));
        assert!(lines.contains(&"    config.toml".to_string()));
        assert_eq!(lines.last().unwrap(), "Found 0 articles (0 published)");

        let without = format_content_output(&content, false);
        assert!(!without.contains(&"Config".to_string()));
    }

    // =========================================================================
    // Generate output
    // =========================================================================

    #[test]
    fn generate_output_lists_pages() {
        let report = GenerateReport {
            home: Some(page("My Site", "index.html")),
            listing: Some(page("1 Post", "writing/index.html")),
            about: None,
            articles: vec![page("First Post", "writing/first-post/index.html")],
        };
        let lines = format_generate_output(&report);
        assert_eq!(
            lines,
            vec![
                "My Site \u{2192} index.html",
                "1 Post \u{2192} writing/index.html",
                "    001 First Post \u{2192} writing/first-post/index.html",
                "",
                "Generated 1 article page, 2 site pages",
            ]
        );
    }
}

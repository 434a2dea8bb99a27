//! Filename parsing for articles.
//!
//! Article files may carry an optional `YYYY-MM-DD-` date prefix ahead of
//! the slug:
//!
//! - `2019-03-02-docker-for-rails.md` → date 2019-03-02, slug `docker-for-rails`
//! - `docker-for-rails.md` → no date, slug `docker-for-rails`
//!
//! The slug becomes the URL segment (`/writing/<slug>/`), so it holds only
//! lowercase alphanumerics and single dashes. A stem whose name part has no
//! alphanumerics (`2019-02-01---`) takes the date as its slug; one with
//! neither yields an empty slug, which the loader rejects. Dashes in the
//! name become spaces in the display title, used when front matter has no
//! title. A filename date is only a fallback; `updated_at` in front matter
//! wins.

use chrono::NaiveDate;

/// Result of parsing an article file stem.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Date prefix if present and valid
    pub date: Option<NaiveDate>,
    /// URL-safe slug: lowercase alphanumerics joined by single dashes. May be empty.
    pub slug: String,
    /// Slug with dashes converted to spaces, original case kept
    pub display_title: String,
}

const DATE_PREFIX_LEN: usize = "YYYY-MM-DD-".len();

/// Parse an article file stem.
///
/// - `"2019-03-02-Docker-For-Rails"` → date=Some(2019-03-02), slug="docker-for-rails", display_title="Docker For Rails"
/// - `"hello-world"` → date=None, slug="hello-world", display_title="hello world"
/// - `"2019-13-40-typo"` → date=None, slug="2019-13-40-typo" (invalid date is not a prefix)
/// - `"2019-03-02"` → date=Some(2019-03-02), slug="2019-03-02" (date-only stems keep the date as slug)
/// - `"2019-03-02---"` → date=Some(2019-03-02), slug="2019-03-02"
pub fn parse_article_name(stem: &str) -> ParsedName {
    if let Some(prefix) = stem.get(..DATE_PREFIX_LEN - 1)
        && let Some(raw) = stem.get(DATE_PREFIX_LEN..)
        && !raw.is_empty()
        && stem.as_bytes()[DATE_PREFIX_LEN - 1] == b'-'
        && let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
    {
        let slug = slugify(raw);
        if slug.is_empty() {
            return ParsedName {
                date: Some(date),
                slug: prefix.to_string(),
                display_title: prefix.to_string(),
            };
        }
        return ParsedName {
            date: Some(date),
            slug,
            display_title: raw.replace('-', " "),
        };
    }
    if let Ok(date) = NaiveDate::parse_from_str(stem, "%Y-%m-%d") {
        return ParsedName {
            date: Some(date),
            slug: stem.to_string(),
            display_title: stem.to_string(),
        };
    }
    ParsedName {
        date: None,
        slug: slugify(stem),
        display_title: stem.replace('-', " "),
    }
}

/// Lowercase alphanumerics; every other run of characters becomes one dash.
///
/// `"C# Tips"` → `"c-tips"`, `"node.js_notes"` → `"node-js-notes"`, `"---"` → `""`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }

    #[test]
    fn date_prefixed_name() {
        let p = parse_article_name("2019-03-02-Docker-For-Rails");
        assert_eq!(p.date, date("2019-03-02"));
        assert_eq!(p.slug, "docker-for-rails");
        assert_eq!(p.display_title, "Docker For Rails");
    }

    #[test]
    fn plain_name() {
        let p = parse_article_name("hello-world");
        assert_eq!(p.date, None);
        assert_eq!(p.slug, "hello-world");
        assert_eq!(p.display_title, "hello world");
    }

    #[test]
    fn invalid_date_is_part_of_slug() {
        let p = parse_article_name("2019-13-40-typo");
        assert_eq!(p.date, None);
        assert_eq!(p.slug, "2019-13-40-typo");
    }

    #[test]
    fn date_only_stem() {
        let p = parse_article_name("2019-03-02");
        assert_eq!(p.date, date("2019-03-02"));
        assert_eq!(p.slug, "2019-03-02");
    }

    #[test]
    fn short_numeric_prefix_is_not_a_date() {
        let p = parse_article_name("010-notes");
        assert_eq!(p.date, None);
        assert_eq!(p.slug, "010-notes");
        assert_eq!(p.display_title, "010 notes");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("My  Great_Post"), "my-great-post");
        assert_eq!(slugify("--edge--"), "edge");
        assert_eq!(slugify("Ünïcode Title"), "ünïcode-title");
    }

    #[test]
    fn slugify_drops_url_syntax() {
        assert_eq!(slugify("c#-tips"), "c-tips");
        assert_eq!(slugify("what?now%20"), "what-now-20");
        assert_eq!(slugify("node.js/notes"), "node-js-notes");
    }

    #[test]
    fn slugify_punctuation_only_is_empty() {
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("_"), "");
        assert_eq!(slugify("#?%"), "");
    }

    #[test]
    fn empty_name_after_date_uses_date_as_slug() {
        let p = parse_article_name("2019-02-01---");
        assert_eq!(p.date, date("2019-02-01"));
        assert_eq!(p.slug, "2019-02-01");
        assert_eq!(p.display_title, "2019-02-01");
    }

    #[test]
    fn punctuation_only_stem_has_empty_slug() {
        let p = parse_article_name("_");
        assert_eq!(p.date, None);
        assert_eq!(p.slug, "");
    }

    #[test]
    fn non_ascii_stem_does_not_panic() {
        let p = parse_article_name("日本語のタイトル");
        assert_eq!(p.date, None);
        assert_eq!(p.slug, "日本語のタイトル");
    }
}

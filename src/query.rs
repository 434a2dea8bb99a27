//! Content views: which items a page shows, and in what order.
//!
//! Both views share one filter-and-sort step:
//!
//! 1. keep items whose `published` flag is exactly `"true"`
//! 2. stable sort by `updated_at`, newest first
//!
//! The home page takes the first [`RECENT_LIMIT`] of that sequence; the
//! writing page shows all of it together with its count.
//!
//! Items with no date sort after every dated item. Items with equal dates
//! keep their collection order, so the same input always yields the same
//! output.

use crate::types::ContentItem;

/// Number of items in the home page preview.
pub const RECENT_LIMIT: usize = 3;

/// The full writing listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<'a> {
    pub items: Vec<&'a ContentItem>,
    /// Number of items shown, not the size of the raw collection
    pub total_count: usize,
}

/// Published items, newest first.
pub fn published_by_date(collection: &[ContentItem]) -> Vec<&ContentItem> {
    let mut items: Vec<&ContentItem> = collection.iter().filter(|i| i.is_published()).collect();
    // `None < Some(_)`, so comparing b to a puts undated items last
    items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    items
}

/// Up to [`RECENT_LIMIT`] most recent published items.
pub fn recent_view(collection: &[ContentItem]) -> Vec<&ContentItem> {
    let mut items = published_by_date(collection);
    items.truncate(RECENT_LIMIT);
    items
}

/// Every published item, newest first, with its count.
pub fn full_listing_view(collection: &[ContentItem]) -> Listing<'_> {
    let items = published_by_date(collection);
    let total_count = items.len();
    Listing { items, total_count }
}

//! Filter, pagination and statistics derivation
//!
//! Pure functions over a record snapshot: nothing here is authoritative or
//! incrementally maintained. Statistics are recomputed from the filtered set
//! on every derivation so the dashboard always reflects exactly what the
//! user currently sees.

use crate::model::NewsRecord;
use std::collections::HashMap;

/// Fixed page size for the news grid
pub const PAGE_SIZE: usize = 6;

/// Records with a public score above this count as trending
pub const TRENDING_THRESHOLD: u64 = 5;

/// Search and page selection for a feed derivation
#[derive(Debug, Clone)]
pub struct FeedQuery {
    /// Case-insensitive substring matched against title, category label
    /// and source; empty passes everything
    pub search: String,
    /// 1-based page number
    pub page: usize,
}

impl FeedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
        }
    }
}

/// Aggregate statistics over the filtered set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedStats {
    /// Size of the filtered set (not the full set)
    pub total_news: usize,
    /// Verified records in the filtered set
    pub verified_news: usize,
    /// Mean public score over the filtered set; zero when empty
    pub avg_engagement: f64,
    /// Records with a public score above [`TRENDING_THRESHOLD`]
    pub trending_count: usize,
    /// Per-category-label counts
    pub categories: HashMap<String, usize>,
}

/// One derived page of the feed
#[derive(Debug, Clone)]
pub struct FeedPage {
    /// The current page window
    pub items: Vec<NewsRecord>,
    /// Size of the filtered set the window was cut from
    pub filtered_len: usize,
    /// Total pages in the filtered set
    pub total_pages: usize,
    /// Statistics over the filtered set
    pub stats: FeedStats,
}

/// Apply the search filter to a record snapshot.
///
/// Empty query returns the full set.
pub fn filter_records(records: &[NewsRecord], search: &str) -> Vec<NewsRecord> {
    if search.is_empty() {
        return records.to_vec();
    }
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.title.to_lowercase().contains(&needle)
                || r.category.label().to_lowercase().contains(&needle)
                || r.source.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Cut the window for a 1-based page out of the filtered set.
///
/// An out-of-range page yields an empty window, never an error.
pub fn page_window(filtered: &[NewsRecord], page: usize) -> &[NewsRecord] {
    let page = page.max(1);
    let start = (page - 1) * PAGE_SIZE;
    if start >= filtered.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(filtered.len());
    &filtered[start..end]
}

/// Compute aggregate statistics over the filtered set
pub fn compute_stats(filtered: &[NewsRecord]) -> FeedStats {
    let mut categories: HashMap<String, usize> = HashMap::new();
    for record in filtered {
        *categories.entry(record.category.label().to_string()).or_default() += 1;
    }

    let total_score: u64 = filtered.iter().map(|r| r.public_score).sum();

    FeedStats {
        total_news: filtered.len(),
        verified_news: filtered.iter().filter(|r| r.is_verified).count(),
        avg_engagement: if filtered.is_empty() {
            0.0
        } else {
            total_score as f64 / filtered.len() as f64
        },
        trending_count: filtered
            .iter()
            .filter(|r| r.public_score > TRENDING_THRESHOLD)
            .count(),
        categories,
    }
}

/// Derive the visible page and its statistics from a record snapshot
pub fn derive_feed(records: &[NewsRecord], query: &FeedQuery) -> FeedPage {
    let filtered = filter_records(records, &query.search);
    let stats = compute_stats(&filtered);
    let items = page_window(&filtered, query.page).to_vec();

    FeedPage {
        filtered_len: filtered.len(),
        total_pages: filtered.len().div_ceil(PAGE_SIZE),
        items,
        stats,
    }
}

//! Counters collected while a crawl runs
//!
//! Reported in the response and logged when the crawl ends.

use serde::{Deserialize, Serialize};

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlStats {
    /// Category links found on the homepage and "more puzzles" page
    pub categories_discovered: u64,

    /// Categories matching the configured target
    pub categories_selected: u64,

    /// Listing pages reached through pagination
    pub listing_pages: u64,

    /// Listing pages that could not be read
    pub listing_failures: u64,

    /// Clue pages visited
    pub clue_pages: u64,

    /// Clue pages skipped after failing
    pub clue_failures: u64,

    /// Sub-clue pages visited
    pub sub_clue_pages: u64,

    /// Sub-clue pages skipped after failing
    pub sub_clue_failures: u64,

    /// Records harvested
    pub records: u64,

    /// "Show more" clicks across all sub-clue pages
    pub reveal_expansions: u64,

    /// Sub-clue pages where expansion stopped at the iteration cap
    pub reveal_caps_hit: u64,

    /// Extra attempts spent on failed nodes
    pub retries: u64,
}

impl CrawlStats {
    /// Total isolated node failures
    pub fn total_failures(&self) -> u64 {
        self.listing_failures + self.clue_failures + self.sub_clue_failures
    }

    /// Share of visited sub-clue pages that produced a record (0-100)
    pub fn success_rate(&self) -> f64 {
        if self.sub_clue_pages == 0 {
            0.0
        } else {
            (self.records as f64 / self.sub_clue_pages as f64) * 100.0
        }
    }

    /// Logs the counters at info level
    pub fn log_summary(&self) {
        tracing::info!(
            "Categories: {} discovered, {} selected",
            self.categories_discovered,
            self.categories_selected
        );
        tracing::info!(
            "Pages: {} listing, {} clue, {} sub-clue",
            self.listing_pages,
            self.clue_pages,
            self.sub_clue_pages
        );
        tracing::info!(
            "Records: {} ({:.2}% of sub-clue pages), {} failures, {} retries",
            self.records,
            self.success_rate(),
            self.total_failures(),
            self.retries
        );
        if self.reveal_caps_hit > 0 {
            tracing::warn!(
                "Answer expansion hit the iteration cap on {} page(s)",
                self.reveal_caps_hit
            );
        }
    }
}

//! The single response handed back to the caller of a crawl

use crate::output::aggregate::AggregatedResult;
use crate::output::stats::CrawlStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a crawl as seen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlStatus {
    Success,
    Failure,
}

/// Response of one "run crawl" call
///
/// A failure response never carries results; a success response carries
/// the complete result or, when the crawl was timeboxed, whatever was
/// harvested before the deadline (`complete == false`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResponse {
    pub status: CrawlStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub complete: bool,

    pub results: AggregatedResult,

    pub stats: CrawlStats,

    pub started_at: DateTime<Utc>,

    pub finished_at: DateTime<Utc>,
}

impl CrawlResponse {
    /// Builds a success response
    pub fn success(
        results: AggregatedResult,
        stats: CrawlStats,
        complete: bool,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            status: CrawlStatus::Success,
            error: None,
            complete,
            results,
            stats,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Builds a failure response with no results
    pub fn failure(error: impl Into<String>, stats: CrawlStats, started_at: DateTime<Utc>) -> Self {
        Self {
            status: CrawlStatus::Failure,
            error: Some(error.into()),
            complete: false,
            results: AggregatedResult::default(),
            stats,
            started_at,
            finished_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CrawlStatus::Success
    }

    /// Wall-clock duration of the crawl in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

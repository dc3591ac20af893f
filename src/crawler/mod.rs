//! Crawler module for category traversal and answer extraction
//!
//! This module contains the core crawling logic, including:
//! - Category discovery on the site root
//! - Pagination walking for the target category
//! - Clue, sub-clue and answer extraction
//! - Overall crawl coordination

mod coordinator;
pub mod detail;
pub mod discovery;
pub mod listing;
pub mod pagination;
pub mod reveal;

pub use coordinator::{select_targets, Coordinator};
pub use detail::extract_sub_clue_links;
pub use discovery::discover_categories;
pub use listing::extract_clue_links;
pub use pagination::PaginationWalker;
pub use reveal::{reveal_answer, Expansion, RevealedClue};

use crate::config::Config;
use crate::output::{CrawlResponse, CrawlStats};
use crate::session::{BrowserSession, PageSession};
use chrono::Utc;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Launch a headless browser session
/// 2. Discover categories and select the target
/// 3. Walk the target's listing pages
/// 4. Reveal and extract every sub-clue page
/// 5. Group the records by category
///
/// Never panics and never returns an error: every outcome, including a
/// browser that fails to start, is reported through the response status.
pub async fn crawl(config: Config) -> CrawlResponse {
    let started_at = Utc::now();

    let mut session =
        match BrowserSession::launch(&config.browser, config.timing.navigation()).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("Could not start browser: {}", e);
                return CrawlResponse::failure(e.to_string(), CrawlStats::default(), started_at);
            }
        };

    run_with_session(&mut session, &config).await
}

/// Runs a crawl on an already opened session
///
/// Applies the configured crawl timeout, then closes the session exactly
/// once whatever the outcome.
pub async fn run_with_session<S>(session: &mut S, config: &Config) -> CrawlResponse
where
    S: PageSession + ?Sized,
{
    let response = {
        let mut coordinator = Coordinator::new(&mut *session, config);

        let outcome = match config.timing.crawl_limit() {
            Some(limit) => match tokio::time::timeout(limit, coordinator.run()).await {
                Ok(outcome) => Some(outcome),
                Err(_) => {
                    tracing::warn!(
                        "Crawl timed out after {:?} during phase {}",
                        limit,
                        coordinator.phase()
                    );
                    None
                }
            },
            None => Some(coordinator.run().await),
        };

        coordinator.into_response(outcome)
    };

    if let Err(e) = session.close().await {
        tracing::warn!("Error closing browser session: {}", e);
    }

    response
}

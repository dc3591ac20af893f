//! Crawler coordinator - main crawl orchestration logic
//!
//! This module sequences one crawl through its phases:
//! - Discovering categories (the only step allowed to fail the crawl)
//! - Selecting the configured target category
//! - Walking its pagination chain
//! - Extracting clue links, sub-clue links and revealed answers
//! - Grouping the harvested records by category
//!
//! Every per-page step below discovery is isolated: a failing page is
//! logged with its URL, counted, and skipped.

use crate::config::{Config, SiteConfig};
use crate::crawler::detail::extract_sub_clue_links;
use crate::crawler::discovery::discover_categories;
use crate::crawler::listing::extract_clue_links;
use crate::crawler::pagination::PaginationWalker;
use crate::crawler::reveal::{reveal_answer, RevealedClue};
use crate::links::same_page;
use crate::model::{CategorizedRecord, CategoryLink, ClueLink, SubClueLink};
use crate::output::{AggregatedResult, CrawlResponse, CrawlStats};
use crate::session::PageSession;
use crate::state::CrawlPhase;
use crate::{HarvestError, NodeResult};
use chrono::{DateTime, Utc};
use url::Url;

/// Main crawler coordinator structure
///
/// Borrows the browsing session exclusively for the whole crawl; closing it
/// is left to the owner (see [`crate::crawler::run_with_session`]).
pub struct Coordinator<'a, S: PageSession + ?Sized> {
    session: &'a mut S,
    config: &'a Config,
    phase: CrawlPhase,
    records: Vec<CategorizedRecord>,
    stats: CrawlStats,
    started_at: DateTime<Utc>,
}

impl<'a, S> Coordinator<'a, S>
where
    S: PageSession + ?Sized,
{
    /// Creates a coordinator in the `Init` phase
    pub fn new(session: &'a mut S, config: &'a Config) -> Self {
        Self {
            session,
            config,
            phase: CrawlPhase::Init,
            records: Vec::new(),
            stats: CrawlStats::default(),
            started_at: Utc::now(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Counters collected so far
    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    fn transition(&mut self, to: CrawlPhase) -> Result<(), HarvestError> {
        if !self.phase.can_transition_to(to) {
            return Err(HarvestError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        tracing::debug!("Crawl phase {} -> {}", self.phase, to);
        self.phase = to;
        Ok(())
    }

    /// Runs the crawl to completion
    ///
    /// # Returns
    ///
    /// * `Ok(AggregatedResult)` - Records grouped by category (possibly empty)
    /// * `Err(HarvestError)` - Category discovery failed; nothing was harvested
    pub async fn run(&mut self) -> Result<AggregatedResult, HarvestError> {
        let config = self.config;
        let timing = &config.timing;

        let (base_url, target_url) = match parse_site_urls(&config.site) {
            Ok(urls) => urls,
            Err(e) => {
                self.transition(CrawlPhase::Failed)?;
                return Err(e);
            }
        };

        // Discovery
        self.transition(CrawlPhase::DiscoverCategories)?;
        let categories = match discover_categories(&mut *self.session, &base_url, timing).await {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!("Error accessing base URL: {}", e);
                self.transition(CrawlPhase::Failed)?;
                return Err(e);
            }
        };
        self.stats.categories_discovered = categories.len() as u64;
        tracing::info!("Discovered {} categories", categories.len());

        // Target selection
        self.transition(CrawlPhase::SelectTarget)?;
        let targets = select_targets(categories, &target_url);
        self.stats.categories_selected = targets.len() as u64;
        if targets.is_empty() {
            tracing::warn!("Target category {} was not among the discovered categories", target_url);
        }

        // Pagination
        self.transition(CrawlPhase::WalkPagination)?;
        let mut listing_pages = Vec::new();
        for target in &targets {
            tracing::info!("Processing category URL: {} ({})", target.url, target.label);
            let walker = PaginationWalker::new(target.url.clone());
            listing_pages.extend(walker.collect_all(&mut *self.session, timing).await);
        }
        self.stats.listing_pages = listing_pages.len() as u64;

        // Listing pages
        self.transition(CrawlPhase::ExtractListings)?;
        let mut clue_links: Vec<ClueLink> = Vec::new();
        for page in &listing_pages {
            match extract_clue_links(&mut *self.session, page, timing).await {
                Ok(links) => clue_links.extend(links),
                Err(e) => {
                    self.stats.listing_failures += 1;
                    tracing::warn!("Skipping listing page {}: {}", e.url(), e);
                }
            }
        }

        // Clue pages
        self.transition(CrawlPhase::ExtractClueDetails)?;
        let mut sub_clue_links: Vec<SubClueLink> = Vec::new();
        for clue in &clue_links {
            self.stats.clue_pages += 1;
            match self.clue_details(clue).await {
                Ok(links) => {
                    tracing::info!("Found {} sub-clue links on {}", links.len(), clue.url);
                    sub_clue_links.extend(links);
                }
                Err(e) => {
                    self.stats.clue_failures += 1;
                    tracing::warn!("Error accessing clue URL {}: {}", e.url(), e);
                }
            }
        }

        // Sub-clue pages
        self.transition(CrawlPhase::ExtractAnswers)?;
        for link in &sub_clue_links {
            self.stats.sub_clue_pages += 1;
            match self.sub_clue_answer(link).await {
                Ok(revealed) => {
                    self.stats.reveal_expansions += revealed.expansion.clicks as u64;
                    if revealed.expansion.capped {
                        self.stats.reveal_caps_hit += 1;
                    }
                    self.stats.records += 1;
                    self.records.push(revealed.record);
                }
                Err(e) => {
                    self.stats.sub_clue_failures += 1;
                    tracing::warn!("Error accessing individual clue URL {}: {}", e.url(), e);
                }
            }
        }

        // Grouping
        self.transition(CrawlPhase::Aggregate)?;
        let results = AggregatedResult::from_records(std::mem::take(&mut self.records));
        self.transition(CrawlPhase::Done)?;

        tracing::info!(
            "Harvested {} records in {} categories",
            results.record_count(),
            results.category_count()
        );
        Ok(results)
    }

    /// Sub-clue links of one clue page, with bounded retries
    async fn clue_details(&mut self, clue: &ClueLink) -> NodeResult<Vec<SubClueLink>> {
        let config = self.config;
        let retries = config.timing.node_retries;
        let mut attempt = 0;

        loop {
            match extract_sub_clue_links(&mut *self.session, clue, &config.timing).await {
                Ok(links) => return Ok(links),
                Err(e) if attempt < retries => {
                    attempt += 1;
                    self.stats.retries += 1;
                    tracing::warn!("Retrying {} ({}/{}): {}", e.url(), attempt, retries, e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Revealed record of one sub-clue page, with bounded retries
    async fn sub_clue_answer(&mut self, link: &SubClueLink) -> NodeResult<RevealedClue> {
        let config = self.config;
        let retries = config.timing.node_retries;
        let mut attempt = 0;

        loop {
            match reveal_answer(&mut *self.session, link, &config.timing).await {
                Ok(revealed) => return Ok(revealed),
                Err(e) if attempt < retries => {
                    attempt += 1;
                    self.stats.retries += 1;
                    tracing::warn!("Retrying {} ({}/{}): {}", e.url(), attempt, retries, e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Turns the crawl outcome into the caller-facing response
    ///
    /// `outcome` is None when the crawl was cut short by its timebox: records
    /// harvested so far are returned as an incomplete success, unless
    /// discovery had not finished yet.
    pub fn into_response(
        self,
        outcome: Option<Result<AggregatedResult, HarvestError>>,
    ) -> CrawlResponse {
        self.stats.log_summary();

        match outcome {
            Some(Ok(results)) => CrawlResponse::success(results, self.stats, true, self.started_at),
            Some(Err(e)) => CrawlResponse::failure(e.to_string(), self.stats, self.started_at),
            None if self.phase.past_discovery() => {
                tracing::warn!(
                    "Returning {} records harvested before the timeout",
                    self.records.len()
                );
                let results = AggregatedResult::from_records(self.records);
                CrawlResponse::success(results, self.stats, false, self.started_at)
            }
            None => CrawlResponse::failure(
                "crawl timed out before categories were discovered",
                self.stats,
                self.started_at,
            ),
        }
    }
}

/// Parses the configured base and target URLs
fn parse_site_urls(site: &SiteConfig) -> Result<(Url, Url), HarvestError> {
    let base_url = Url::parse(&site.base_url)?;
    let target_url = Url::parse(&site.target_category_url)?;
    Ok((base_url, target_url))
}

/// Keeps only the categories pointing at the target page
pub fn select_targets(categories: Vec<CategoryLink>, target_url: &Url) -> Vec<CategoryLink> {
    categories
        .into_iter()
        .filter(|c| same_page(&c.url, target_url))
        .collect()
}

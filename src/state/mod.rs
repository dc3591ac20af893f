//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the orchestrator's position in the traversal
//!   (discovery, pagination, listings, clue details, answers, aggregation)

mod crawl_phase;

pub use crawl_phase::CrawlPhase;

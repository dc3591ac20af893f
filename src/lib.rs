//! Clue-Harvest: a crossword answer harvester
//!
//! This crate walks a crossword-answer site category by category, reveals each
//! clue's canonical answer through a browser session, and groups the harvested
//! clues by the category printed on each clue page.

pub mod config;
pub mod crawler;
pub mod links;
pub mod markup;
pub mod model;
pub mod output;
pub mod session;
pub mod state;

use thiserror::Error;

/// Main error type for Clue-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Category discovery failed at {url}: {reason}")]
    Discovery { url: String, reason: String },

    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Failure of a single traversal node (one clue or sub-clue page).
///
/// These never abort the crawl: the coordinator logs them with the node URL
/// and moves on to the next sibling.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        source: session::SessionError,
    },

    #[error("`{selector}` never appeared on {url}")]
    Missing { url: String, selector: String },

    #[error("interaction failed on {url}: {source}")]
    Interaction {
        url: String,
        source: session::SessionError,
    },

    #[error("no revealed answer on {url}")]
    NoAnswer { url: String },
}

impl NodeError {
    /// URL of the node that failed
    pub fn url(&self) -> &str {
        match self {
            Self::Navigation { url, .. }
            | Self::Missing { url, .. }
            | Self::Interaction { url, .. }
            | Self::NoAnswer { url } => url,
        }
    }
}

/// Result type alias for Clue-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for per-node extraction
pub type NodeResult<T> = std::result::Result<T, NodeError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, run_with_session};
pub use model::{CategorizedRecord, ClueRecord, PotentialAnswer};
pub use output::{AggregatedResult, CrawlResponse, CrawlStatus};
pub use session::{BrowserSession, PageSession};
pub use state::CrawlPhase;

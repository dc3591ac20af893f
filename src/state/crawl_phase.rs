/// Phase definitions for the crawl state machine
///
/// A crawl moves forward through these phases exactly once. `Failed` is
/// only reachable before category discovery has succeeded; from then on the
/// crawl always reaches `Done`.
use std::fmt;

/// Current phase of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    // ===== Setup =====
    /// Session acquired, nothing fetched yet
    Init,

    /// Reading category links from the homepage and "more puzzles" page
    DiscoverCategories,

    // ===== Traversal =====
    /// Keeping only the configured target category
    SelectTarget,

    /// Following "next" links through the category's listing pages
    WalkPagination,

    /// Collecting clue links from every listing page
    ExtractListings,

    /// Collecting sub-clue links from every clue page
    ExtractClueDetails,

    /// Revealing answers on every sub-clue page
    ExtractAnswers,

    /// Grouping harvested records by category
    Aggregate,

    // ===== Terminal =====
    /// Crawl finished, results available
    Done,

    /// Root page unusable; no results
    Failed,
}

impl CrawlPhase {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true once category discovery has succeeded
    ///
    /// From these phases onward a result (possibly empty) is always produced.
    pub fn past_discovery(&self) -> bool {
        !matches!(self, Self::Init | Self::DiscoverCategories | Self::Failed)
    }

    /// The phase that normally follows this one
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Init => Some(Self::DiscoverCategories),
            Self::DiscoverCategories => Some(Self::SelectTarget),
            Self::SelectTarget => Some(Self::WalkPagination),
            Self::WalkPagination => Some(Self::ExtractListings),
            Self::ExtractListings => Some(Self::ExtractClueDetails),
            Self::ExtractClueDetails => Some(Self::ExtractAnswers),
            Self::ExtractAnswers => Some(Self::Aggregate),
            Self::Aggregate => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    /// Checks whether moving from this phase to `to` is allowed
    pub fn can_transition_to(&self, to: Self) -> bool {
        if to == Self::Failed {
            return matches!(self, Self::Init | Self::DiscoverCategories);
        }
        self.next() == Some(to)
    }

    /// Stable lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::DiscoverCategories => "discover_categories",
            Self::SelectTarget => "select_target",
            Self::WalkPagination => "walk_pagination",
            Self::ExtractListings => "extract_listings",
            Self::ExtractClueDetails => "extract_clue_details",
            Self::ExtractAnswers => "extract_answers",
            Self::Aggregate => "aggregate",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Returns all phases in traversal order, `Failed` last
    pub fn all_phases() -> Vec<Self> {
        vec![
            Self::Init,
            Self::DiscoverCategories,
            Self::SelectTarget,
            Self::WalkPagination,
            Self::ExtractListings,
            Self::ExtractClueDetails,
            Self::ExtractAnswers,
            Self::Aggregate,
            Self::Done,
            Self::Failed,
        ]
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

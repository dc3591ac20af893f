//! Data types flowing through the harvest pipeline
//!
//! Link types are produced by one traversal level and consumed by the next;
//! [`ClueRecord`] is the terminal unit that ends up in the response.

use serde::{Deserialize, Serialize};
use url::Url;

/// A category entry point found on the homepage or the "more puzzles" page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLink {
    pub url: Url,
    pub label: String,
}

/// One page of a category's paginated clue listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub url: Url,
}

/// Link to a clue page, taken from a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueLink {
    pub url: Url,
}

/// Link to an individual sub-clue page, taken from a clue page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubClueLink {
    pub url: Url,
}

/// A ranked alternative answer from the potential-answers table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotentialAnswer {
    pub answer: String,
    /// Percentage text as printed on the page; empty when absent
    pub confidence: String,
    /// Clue text the answer was matched against; empty when absent
    pub clue_text: String,
}

/// Everything harvested from one sub-clue page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClueRecord {
    pub title: String,
    pub date: String,
    pub answer: String,
    pub potential_answers: Vec<PotentialAnswer>,
}

/// A clue record tagged with the category printed on the clue's own page
///
/// The grouping key comes from the clue page, not from the category link
/// used to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizedRecord {
    pub category: String,
    pub record: ClueRecord,
}

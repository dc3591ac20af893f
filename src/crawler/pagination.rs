//! Pagination walker for a category's listing pages
//!
//! The walker is a small state machine pulled one page at a time. It yields
//! the start page first, then follows the `rel="next"` link of each yielded
//! page until a page has none.

use crate::config::TimingConfig;
use crate::links::{canonical_url, resolve_href};
use crate::markup::{attr_of, find_within, selectors, Document};
use crate::model::ListingPage;
use crate::session::PageSession;
use std::collections::HashSet;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
enum WalkState {
    /// `url` is next to be handed out
    Yield(Url),
    /// `url` was handed out; its successor still has to be looked up
    Advance(Url),
    /// Chain exhausted
    Done,
}

/// Lazy, finite, non-restartable walk over one category's listing pages
///
/// The session is borrowed per step, so callers may use it between steps.
#[derive(Debug)]
pub struct PaginationWalker {
    state: WalkState,
    visited: HashSet<Url>,
}

impl PaginationWalker {
    /// Creates a walker starting at `start`
    pub fn new(start: Url) -> Self {
        Self {
            state: WalkState::Yield(start),
            visited: HashSet::new(),
        }
    }

    /// Returns true once the chain is exhausted
    pub fn is_done(&self) -> bool {
        self.state == WalkState::Done
    }

    /// Produces the next listing page, or None when the chain ends
    ///
    /// The chain ends when the pagination control is missing, when it has no
    /// next-marked link, when fetching a page fails, or when the next link
    /// points back to a page already yielded.
    pub async fn next<S>(&mut self, session: &mut S, timing: &TimingConfig) -> Option<ListingPage>
    where
        S: PageSession + ?Sized,
    {
        loop {
            match std::mem::replace(&mut self.state, WalkState::Done) {
                WalkState::Yield(url) => {
                    self.visited.insert(canonical_url(&url));
                    self.state = WalkState::Advance(url.clone());
                    return Some(ListingPage { url });
                }
                WalkState::Advance(current) => {
                    let Some(next) = find_next_page(session, &current, timing).await else {
                        return None;
                    };
                    if self.visited.contains(&canonical_url(&next)) {
                        tracing::warn!(
                            "Pagination on {} points back to visited page {}, stopping",
                            current,
                            next
                        );
                        return None;
                    }
                    tracing::info!("Found pagination URL: {}", next);
                    self.state = WalkState::Yield(next);
                }
                WalkState::Done => return None,
            }
        }
    }

    /// Walks the whole chain and returns every page in order
    pub async fn collect_all<S>(mut self, session: &mut S, timing: &TimingConfig) -> Vec<ListingPage>
    where
        S: PageSession + ?Sized,
    {
        let mut pages = Vec::new();
        while let Some(page) = self.next(session, timing).await {
            pages.push(page);
        }
        pages
    }
}

/// Loads `current` and returns the URL its "next" link points to
async fn find_next_page<S>(session: &mut S, current: &Url, timing: &TimingConfig) -> Option<Url>
where
    S: PageSession + ?Sized,
{
    if let Err(e) = session.navigate(current.as_str()).await {
        tracing::warn!("Stopping pagination, could not load {}: {}", current, e);
        return None;
    }

    if session
        .wait_for_selector(selectors::PAGINATION, timing.element_wait())
        .await
        .is_err()
    {
        tracing::debug!("No pagination control on {}", current);
        return None;
    }

    match session.content().await {
        Ok(html) => parse_next_page_link(&html, current),
        Err(e) => {
            tracing::warn!("Stopping pagination, could not read {}: {}", current, e);
            None
        }
    }
}

/// Absolute URL of the next-marked link inside the pagination control
pub fn parse_next_page_link(html: &str, page_url: &Url) -> Option<Url> {
    let document = Document::parse(html);
    let pagination = document.select_one(selectors::PAGINATION)?;
    let link = find_within(pagination, selectors::NEXT_PAGE_LINK)?;
    resolve_href(attr_of(link, "href")?, page_url)
}

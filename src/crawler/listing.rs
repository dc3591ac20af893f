//! Clue links on a listing page

use crate::config::TimingConfig;
use crate::links::resolve_href;
use crate::markup::{attr_of, find_all_within, find_within, selectors, Document};
use crate::model::{ClueLink, ListingPage};
use crate::session::PageSession;
use crate::{NodeError, NodeResult};
use url::Url;

/// Loads a listing page and returns its clue links in document order
///
/// A page without a clue list yields no links; only failing to load or
/// read the page is an error.
pub async fn extract_clue_links<S>(
    session: &mut S,
    page: &ListingPage,
    timing: &TimingConfig,
) -> NodeResult<Vec<ClueLink>>
where
    S: PageSession + ?Sized,
{
    let url = page.url.to_string();

    session
        .navigate(page.url.as_str())
        .await
        .map_err(|source| NodeError::Navigation {
            url: url.clone(),
            source,
        })?;

    if session
        .wait_for_selector(selectors::CLUE_LIST, timing.element_wait())
        .await
        .is_err()
    {
        tracing::debug!("No clue list on {}", url);
        return Ok(Vec::new());
    }

    let html = session
        .content()
        .await
        .map_err(|source| NodeError::Interaction { url, source })?;

    let links = parse_clue_links(&html, &page.url);
    tracing::info!("Found {} clue links on {}", links.len(), page.url);
    Ok(links)
}

/// Clue links inside the listing's clue list
pub fn parse_clue_links(html: &str, page_url: &Url) -> Vec<ClueLink> {
    let document = Document::parse(html);
    let Some(list) = document.select_one(selectors::CLUE_LIST) else {
        return Vec::new();
    };

    find_all_within(list, selectors::CLUE_ITEM)
        .into_iter()
        .filter_map(|item| find_within(item, selectors::LINK))
        .filter_map(|anchor| resolve_href(attr_of(anchor, "href")?, page_url))
        .map(|url| ClueLink { url })
        .collect()
}

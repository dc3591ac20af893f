//! Sub-clue links on a clue page

use crate::config::TimingConfig;
use crate::links::resolve_href;
use crate::markup::{attr_of, find_all_within, find_within, selectors, Document};
use crate::model::{ClueLink, SubClueLink};
use crate::session::PageSession;
use crate::{NodeError, NodeResult};
use url::Url;

/// Loads a clue page and returns its sub-clue links in document order
///
/// Unlike a listing page, a clue page without its card list is a failed
/// node: the page is expected to always carry one.
pub async fn extract_sub_clue_links<S>(
    session: &mut S,
    clue: &ClueLink,
    timing: &TimingConfig,
) -> NodeResult<Vec<SubClueLink>>
where
    S: PageSession + ?Sized,
{
    let url = clue.url.to_string();
    tracing::info!("Navigating to clue URL: {}", url);

    session
        .navigate(clue.url.as_str())
        .await
        .map_err(|source| NodeError::Navigation {
            url: url.clone(),
            source,
        })?;

    session
        .wait_for_selector(selectors::SUB_CLUE_LIST, timing.element_wait())
        .await
        .map_err(|_| NodeError::Missing {
            url: url.clone(),
            selector: selectors::SUB_CLUE_LIST.to_string(),
        })?;

    let html = session
        .content()
        .await
        .map_err(|source| NodeError::Interaction {
            url: url.clone(),
            source,
        })?;

    parse_sub_clue_links(&html, &clue.url).ok_or(NodeError::Missing {
        url,
        selector: selectors::SUB_CLUE_LIST.to_string(),
    })
}

/// Sub-clue links inside the card list; None when the list is absent
pub fn parse_sub_clue_links(html: &str, page_url: &Url) -> Option<Vec<SubClueLink>> {
    let document = Document::parse(html);
    let list = document.select_one(selectors::SUB_CLUE_LIST)?;

    let links = find_all_within(list, selectors::SUB_CLUE_ITEM)
        .into_iter()
        .filter_map(|item| find_within(item, selectors::LINK))
        .filter_map(|anchor| resolve_href(attr_of(anchor, "href")?, page_url))
        .map(|url| SubClueLink { url })
        .collect();

    Some(links)
}

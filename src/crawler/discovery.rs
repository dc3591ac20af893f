//! Category discovery
//!
//! Reads category entry links from the homepage's featured-puzzles section,
//! then from the secondary page behind the "more puzzles" button.

use crate::config::TimingConfig;
use crate::links::resolve_href;
use crate::markup::{attr_of, find_all_within, find_within, selectors, text_of, Document};
use crate::model::CategoryLink;
use crate::session::PageSession;
use crate::{HarvestError, NodeError};
use std::collections::HashSet;
use url::Url;

/// Discovers category links starting from the site root
///
/// # Returns
///
/// * `Ok(Vec<CategoryLink>)` - Categories in page order, duplicates removed
/// * `Err(HarvestError::Discovery)` - Root page unreachable, or the featured
///   section never rendered and no categories could be recovered elsewhere
pub async fn discover_categories<S>(
    session: &mut S,
    base_url: &Url,
    timing: &TimingConfig,
) -> Result<Vec<CategoryLink>, HarvestError>
where
    S: PageSession + ?Sized,
{
    let fatal = |reason: String| HarvestError::Discovery {
        url: base_url.to_string(),
        reason,
    };

    session
        .navigate(base_url.as_str())
        .await
        .map_err(|e| fatal(e.to_string()))?;

    let featured_rendered = match session
        .wait_for_selector(selectors::FEATURED_SECTION, timing.element_wait())
        .await
    {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Featured puzzles section missing on {}: {}", base_url, e);
            false
        }
    };

    let html = session.content().await.map_err(|e| fatal(e.to_string()))?;
    let mut categories =
        parse_category_links(&html, base_url, selectors::FEATURED_SECTION);
    tracing::info!("Found {} featured categories", categories.len());

    match parse_more_puzzles_link(&html, base_url) {
        Some(more_url) => {
            tracing::info!("Following more puzzles link: {}", more_url);
            match discover_more(session, &more_url, base_url, timing).await {
                Ok(extra) => {
                    tracing::info!("Found {} more categories", extra.len());
                    categories.extend(extra);
                }
                Err(e) => tracing::error!("Error processing more puzzles page: {}", e),
            }
        }
        None => tracing::debug!("No more puzzles link on {}", base_url),
    }

    if !featured_rendered && categories.is_empty() {
        return Err(fatal(
            "featured puzzles section never rendered and no other categories were found"
                .to_string(),
        ));
    }

    Ok(dedup_categories(categories))
}

/// Reads categories from the secondary "more puzzles" page
async fn discover_more<S>(
    session: &mut S,
    more_url: &Url,
    base_url: &Url,
    timing: &TimingConfig,
) -> Result<Vec<CategoryLink>, NodeError>
where
    S: PageSession + ?Sized,
{
    let url = more_url.to_string();

    session
        .navigate(more_url.as_str())
        .await
        .map_err(|source| NodeError::Navigation {
            url: url.clone(),
            source,
        })?;

    session
        .wait_for_selector(selectors::DISCOVER_SECTION, timing.element_wait())
        .await
        .map_err(|_| NodeError::Missing {
            url: url.clone(),
            selector: selectors::DISCOVER_SECTION.to_string(),
        })?;

    let html = session
        .content()
        .await
        .map_err(|source| NodeError::Interaction { url, source })?;

    Ok(parse_category_links(&html, base_url, selectors::DISCOVER_SECTION))
}

/// Extracts category links from the rows of `section_selector`
///
/// Hrefs are resolved against the site root; rows without a usable anchor
/// are skipped. A missing section yields no categories.
pub fn parse_category_links(html: &str, base_url: &Url, section_selector: &str) -> Vec<CategoryLink> {
    let document = Document::parse(html);
    let Some(section) = document.select_one(section_selector) else {
        return Vec::new();
    };

    find_all_within(section, selectors::CATEGORY_ROW)
        .into_iter()
        .filter_map(|row| find_within(row, selectors::CATEGORY_ANCHOR))
        .filter_map(|anchor| {
            let url = resolve_href(attr_of(anchor, "href")?, base_url)?;
            tracing::debug!("Found category URL: {}", url);
            Some(CategoryLink {
                url,
                label: text_of(anchor),
            })
        })
        .collect()
}

/// Absolute URL of the "more puzzles" button, if the page has one
pub fn parse_more_puzzles_link(html: &str, base_url: &Url) -> Option<Url> {
    let document = Document::parse(html);
    let anchor = document.select_one(selectors::MORE_PUZZLES_LINK)?;
    resolve_href(attr_of(anchor, "href")?, base_url)
}

/// Keeps the first occurrence of each category URL
fn dedup_categories(categories: Vec<CategoryLink>) -> Vec<CategoryLink> {
    let mut seen = HashSet::new();
    categories
        .into_iter()
        .filter(|c| seen.insert(c.url.clone()))
        .collect()
}

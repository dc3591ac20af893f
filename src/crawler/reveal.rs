//! Answer reveal on a sub-clue page
//!
//! Each sub-clue page hides its answer behind a reveal button and pages its
//! potential-answers table behind a "show more" button. Extraction runs in
//! order:
//!
//! 1. Load the page, wait for the reveal control, click it, wait for the
//!    revealed answer
//! 2. Read title, category and date from the heading and byline
//! 3. Spell the answer from the letter tiles
//! 4. Expand the potential-answers table, at most `max-reveal-iterations`
//!    clicks
//! 5. Re-read the page and parse the table

use crate::config::TimingConfig;
use crate::markup::{attr_of, find_all_within, find_within, selectors, text_of, Document};
use crate::model::{CategorizedRecord, ClueRecord, PotentialAnswer, SubClueLink};
use crate::session::PageSession;
use crate::{NodeError, NodeResult};

/// Title used when the heading exists but carries no clue text
pub const NO_TITLE: &str = "No title found";

/// Heading and byline data of a sub-clue page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClueHeader {
    pub title: String,
    pub category: String,
    pub date: String,
}

/// How the "show more" loop ended
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expansion {
    /// Click/settle cycles performed
    pub clicks: u32,
    /// Stopped at the iteration cap while more content was still offered
    pub capped: bool,
}

/// A harvested sub-clue page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealedClue {
    pub record: CategorizedRecord,
    pub expansion: Expansion,
}

/// Reveals and extracts one sub-clue page
///
/// # Errors
///
/// * `NodeError::Navigation` - the page could not be loaded
/// * `NodeError::Missing` - the reveal control or revealed answer never appeared
/// * `NodeError::Interaction` - clicking or reading the page failed
/// * `NodeError::NoAnswer` - the revealed block held no letters
pub async fn reveal_answer<S>(
    session: &mut S,
    link: &SubClueLink,
    timing: &TimingConfig,
) -> NodeResult<RevealedClue>
where
    S: PageSession + ?Sized,
{
    let url = link.url.to_string();
    tracing::info!("Navigating to individual clue URL: {}", url);

    session
        .navigate(link.url.as_str())
        .await
        .map_err(|source| NodeError::Navigation {
            url: url.clone(),
            source,
        })?;

    wait_for(session, &url, selectors::REVEAL_CONTROL, timing).await?;
    session
        .click(selectors::REVEAL_BUTTON)
        .await
        .map_err(|source| NodeError::Interaction {
            url: url.clone(),
            source,
        })?;
    wait_for(session, &url, selectors::REVEALED_ANSWER, timing).await?;

    let html = read_content(session, &url).await?;
    let header = parse_clue_header(&html);
    let answer = parse_revealed_answer(&html).ok_or_else(|| NodeError::NoAnswer { url: url.clone() })?;

    let expansion = expand_answers(session, &url, timing).await;

    let html = read_content(session, &url).await?;
    let potential_answers = parse_potential_answers(&html);

    tracing::info!(
        "Found individual clue: {}, title: {}, category: {}, date: {}, answer: {}, {} potential answers",
        url,
        header.title,
        header.category,
        header.date,
        answer,
        potential_answers.len()
    );

    Ok(RevealedClue {
        record: CategorizedRecord {
            category: header.category,
            record: ClueRecord {
                title: header.title,
                date: header.date,
                answer,
                potential_answers,
            },
        },
        expansion,
    })
}

/// Clicks "show more" while the "show less" indicator is present
///
/// Never fails: a failed probe or click just ends the expansion and the
/// table is parsed with whatever is already shown.
pub async fn expand_answers<S>(session: &mut S, url: &str, timing: &TimingConfig) -> Expansion
where
    S: PageSession + ?Sized,
{
    let mut expansion = Expansion::default();

    while expansion.clicks < timing.max_reveal_iterations {
        if !more_answers_offered(session, url).await {
            return expansion;
        }

        tracing::info!("Clicking 'Show More Answers' button at {}", url);
        if let Err(e) = session.click(selectors::SHOW_MORE_ANSWERS).await {
            tracing::warn!("Could not expand answers on {}: {}", url, e);
            return expansion;
        }
        session.settle(timing.settle_delay()).await;
        expansion.clicks += 1;
    }

    expansion.capped = more_answers_offered(session, url).await;
    if expansion.capped {
        tracing::warn!(
            "Stopped expanding answers on {} after {} clicks",
            url,
            expansion.clicks
        );
    }
    expansion
}

async fn more_answers_offered<S>(session: &mut S, url: &str) -> bool
where
    S: PageSession + ?Sized,
{
    match session.query_selector(selectors::SHOW_LESS_ANSWERS).await {
        Ok(present) => present,
        Err(e) => {
            tracing::warn!("Could not probe answer expansion on {}: {}", url, e);
            false
        }
    }
}

async fn wait_for<S>(session: &mut S, url: &str, selector: &str, timing: &TimingConfig) -> NodeResult<()>
where
    S: PageSession + ?Sized,
{
    session
        .wait_for_selector(selector, timing.element_wait())
        .await
        .map_err(|_| NodeError::Missing {
            url: url.to_string(),
            selector: selector.to_string(),
        })
}

async fn read_content<S>(session: &mut S, url: &str) -> NodeResult<String>
where
    S: PageSession + ?Sized,
{
    session
        .content()
        .await
        .map_err(|source| NodeError::Interaction {
            url: url.to_string(),
            source,
        })
}

/// Title, category and date of a sub-clue page
///
/// The title is the bold text of the page heading, [`NO_TITLE`] when the
/// heading has no bold part, and empty when there is no heading. The
/// byline's first link is the category, its second the date.
pub fn parse_clue_header(html: &str) -> ClueHeader {
    let document = Document::parse(html);

    let title = match document.select_one(selectors::TITLE_HEADING) {
        Some(heading) => find_within(heading, selectors::TITLE_TEXT)
            .map(text_of)
            .unwrap_or_else(|| NO_TITLE.to_string()),
        None => String::new(),
    };

    let byline_links = document
        .select_one(selectors::BYLINE)
        .map(|byline| find_all_within(byline, selectors::BYLINE_LINK))
        .unwrap_or_default();

    ClueHeader {
        title,
        category: byline_links.first().map(|a| text_of(*a)).unwrap_or_default(),
        date: byline_links.get(1).map(|a| text_of(*a)).unwrap_or_default(),
    }
}

/// The answer spelled by the revealed letter tiles, None if nothing is revealed
pub fn parse_revealed_answer(html: &str) -> Option<String> {
    let document = Document::parse(html);
    let block = document.select_one(selectors::REVEALED_ANSWER)?;

    let answer: String = find_all_within(block, selectors::ANSWER_LETTER)
        .into_iter()
        .filter_map(|tile| attr_of(tile, "data-letter"))
        .collect();

    if answer.is_empty() {
        None
    } else {
        Some(answer)
    }
}

/// Rows of the potential-answers table, in table order
///
/// Rows without an answer link are skipped; rank and clue text default to
/// empty strings.
pub fn parse_potential_answers(html: &str) -> Vec<PotentialAnswer> {
    let document = Document::parse(html);
    let Some(section) = document.select_one(selectors::ANSWERS_SECTION) else {
        return Vec::new();
    };

    find_all_within(section, selectors::ANSWER_ROW)
        .into_iter()
        .filter_map(|row| {
            let answer = find_within(row, selectors::ANSWER_TEXT).map(text_of)?;
            let confidence = find_within(row, selectors::ANSWER_RANK)
                .map(text_of)
                .unwrap_or_default();
            let clue_text = find_within(row, selectors::ANSWER_CLUE_TEXT)
                .map(text_of)
                .unwrap_or_default();
            Some(PotentialAnswer {
                answer,
                confidence,
                clue_text,
            })
        })
        .collect()
}

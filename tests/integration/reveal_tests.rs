//! Answer reveal and the bounded "show more" loop

use crate::fixture::*;
use clue_harvest::crawler::reveal::expand_answers;
use clue_harvest::crawler::{reveal_answer, Expansion};
use clue_harvest::markup::selectors;
use clue_harvest::model::SubClueLink;
use clue_harvest::session::PageSession;
use clue_harvest::NodeError;
use url::Url;

const CLUE_PATH: &str = "/clue/feline-pet/3/";

fn link() -> SubClueLink {
    SubClueLink {
        url: Url::parse(&site(CLUE_PATH)).unwrap(),
    }
}

fn cat_page() -> String {
    answer_page("Feline pet", "Animals", "May 1 2024", "CAT", &[("CAT", "80%", "feline")])
}

async fn expand(session: &mut FixtureSession, max_iterations: u32) -> Expansion {
    let mut config = test_config();
    config.timing.max_reveal_iterations = max_iterations;
    session.navigate(&site(CLUE_PATH)).await.unwrap();
    expand_answers(session, &site(CLUE_PATH), &config.timing).await
}

#[tokio::test]
async fn test_expansion_stops_when_indicator_disappears() {
    for m in [0, 1, 3] {
        let mut session = FixtureSession::new()
            .page(&site(CLUE_PATH), cat_page())
            .expansions(&site(CLUE_PATH), Some(m));

        let expansion = expand(&mut session, 50).await;

        assert_eq!(expansion, Expansion { clicks: m, capped: false }, "{m} expansions");
        assert_eq!(session.settles, m);
    }
}

#[tokio::test]
async fn test_expansion_capped_when_more_is_always_offered() {
    let mut session = FixtureSession::new()
        .page(&site(CLUE_PATH), cat_page())
        .expansions(&site(CLUE_PATH), None);

    let expansion = expand(&mut session, 4).await;

    assert_eq!(expansion, Expansion { clicks: 4, capped: true });
    assert_eq!(session.settles, 4);
    assert_eq!(
        session
            .clicks
            .iter()
            .filter(|s| s.as_str() == selectors::SHOW_MORE_ANSWERS)
            .count(),
        4
    );
}

#[tokio::test]
async fn test_expansion_exactly_at_cap_is_not_capped() {
    let mut session = FixtureSession::new()
        .page(&site(CLUE_PATH), cat_page())
        .expansions(&site(CLUE_PATH), Some(4));

    let expansion = expand(&mut session, 4).await;

    assert_eq!(expansion, Expansion { clicks: 4, capped: false });
}

#[tokio::test]
async fn test_reveal_extracts_record() {
    let mut session = FixtureSession::new().page(&site(CLUE_PATH), cat_page());

    let revealed = reveal_answer(&mut session, &link(), &test_config().timing)
        .await
        .unwrap();

    assert_eq!(revealed.record.category, "Animals");
    assert_eq!(revealed.record.record.title, "Feline pet");
    assert_eq!(revealed.record.record.date, "May 1 2024");
    assert_eq!(revealed.record.record.answer, "CAT");
    assert_eq!(revealed.record.record.potential_answers.len(), 1);
    assert_eq!(revealed.expansion, Expansion::default());
    assert_eq!(session.clicks.first().map(String::as_str), Some(selectors::REVEAL_BUTTON));
}

#[tokio::test]
async fn test_reveal_reads_table_after_expansion() {
    let expanded = answer_page(
        "Feline pet",
        "Animals",
        "May 1 2024",
        "CAT",
        &[("CAT", "80%", "feline"), ("TOM", "30%", "tomcat"), ("PUSS", "10%", "")],
    );
    let mut session = FixtureSession::new()
        .page(&site(CLUE_PATH), cat_page())
        .expanded(&site(CLUE_PATH), expanded)
        .expansions(&site(CLUE_PATH), Some(2));

    let revealed = reveal_answer(&mut session, &link(), &test_config().timing)
        .await
        .unwrap();

    let answers: Vec<&str> = revealed
        .record
        .record
        .potential_answers
        .iter()
        .map(|p| p.answer.as_str())
        .collect();
    assert_eq!(answers, vec!["CAT", "TOM", "PUSS"]);
    assert_eq!(revealed.expansion.clicks, 2);
}

#[tokio::test]
async fn test_missing_reveal_control_fails_node() {
    let mut session =
        FixtureSession::new().page(&site(CLUE_PATH), "<html><body><h1>Gone</h1></body></html>");

    let err = reveal_answer(&mut session, &link(), &test_config().timing)
        .await
        .unwrap_err();

    match err {
        NodeError::Missing { url, selector } => {
            assert_eq!(url, site(CLUE_PATH));
            assert_eq!(selector, selectors::REVEAL_CONTROL);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_empty_revealed_answer_fails_node() {
    let mut session = FixtureSession::new().page(
        &site(CLUE_PATH),
        answer_page("Blank", "Animals", "", "", &[]),
    );

    let err = reveal_answer(&mut session, &link(), &test_config().timing)
        .await
        .unwrap_err();

    assert!(matches!(err, NodeError::NoAnswer { .. }));
    assert_eq!(err.url(), site(CLUE_PATH));
}

#[tokio::test]
async fn test_unreachable_page_fails_node() {
    let mut session = FixtureSession::new();

    let err = reveal_answer(&mut session, &link(), &test_config().timing)
        .await
        .unwrap_err();

    assert!(matches!(err, NodeError::Navigation { .. }));
}

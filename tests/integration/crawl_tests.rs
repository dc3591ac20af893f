//! End-to-end crawls through the coordinator

use crate::fixture::*;
use clue_harvest::crawler::Coordinator;
use clue_harvest::{run_with_session, CrawlPhase, CrawlStatus};
use std::time::Duration;

const TARGET_PATH: &str = "/crossword-answers/times-specialist/";

/// Site with one target category, one clue and one sub-clue
fn single_clue_site() -> FixtureSession {
    FixtureSession::new()
        .page(
            BASE_URL,
            homepage(&[("/crossword-answers/nyt/", "NYT"), (TARGET_PATH, "Times Specialist")], None),
        )
        .page(TARGET_URL, listing_page(&["/clue/feline-pet/"], None))
        .page(&site("/clue/feline-pet/"), clue_page(&["/clue/feline-pet/3/"]))
        .page(
            &site("/clue/feline-pet/3/"),
            answer_page(
                "Feline pet",
                "Animals",
                "May 1 2024",
                "CAT",
                &[("CAT", "80%", "feline"), ("TOM", "20%", "male cat")],
            ),
        )
}

#[tokio::test]
async fn test_end_to_end_single_clue() {
    let mut session = single_clue_site();
    let config = test_config();

    let response = run_with_session(&mut session, &config).await;

    assert_eq!(response.status, CrawlStatus::Success);
    assert!(response.complete);
    assert_eq!(response.results.category_count(), 1);

    let records = response.results.category("Animals").expect("Animals group");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Feline pet");
    assert_eq!(records[0].date, "May 1 2024");
    assert_eq!(records[0].answer, "CAT");
    assert_eq!(records[0].potential_answers.len(), 2);
    assert_eq!(records[0].potential_answers[0].confidence, "80%");
    assert_eq!(records[0].potential_answers[1].clue_text, "male cat");

    assert_eq!(response.stats.categories_discovered, 2);
    assert_eq!(response.stats.categories_selected, 1);
    assert_eq!(response.stats.records, 1);
    assert_eq!(session.closes, 1);

    // The NYT category is never visited
    assert!(!session
        .navigations
        .iter()
        .any(|url| url.contains("/crossword-answers/nyt/")));
}

#[tokio::test]
async fn test_response_json_shape() {
    let mut session = single_clue_site();
    let response = run_with_session(&mut session, &test_config()).await;

    let json = serde_json::to_value(&response).expect("serializable");
    assert_eq!(json["status"], "success");
    assert_eq!(json["complete"], true);
    assert!(json.get("error").is_none());
    assert_eq!(json["results"][0]["category"], "Animals");
    assert_eq!(json["results"][0]["content"][0]["answer"], "CAT");
    assert_eq!(
        json["results"][0]["content"][0]["potentialAnswers"][0]["clueText"],
        "feline"
    );
}

#[tokio::test]
async fn test_root_unreachable_is_failure() {
    let mut session = FixtureSession::new();
    let response = run_with_session(&mut session, &test_config()).await;

    assert_eq!(response.status, CrawlStatus::Failure);
    assert!(response.results.is_empty());
    assert!(response
        .error
        .as_deref()
        .is_some_and(|e| e.contains("crossword-solver.io")));
    assert_eq!(session.closes, 1);
}

#[tokio::test]
async fn test_coordinator_ends_in_failed_phase() {
    let mut session = FixtureSession::new();
    let config = test_config();
    let mut coordinator = Coordinator::new(&mut session, &config);

    assert!(coordinator.run().await.is_err());
    assert_eq!(coordinator.phase(), CrawlPhase::Failed);
}

#[tokio::test]
async fn test_secondary_page_only_discovery() {
    let mut session = FixtureSession::new()
        .page(BASE_URL, bare_homepage(Some("/todays-puzzles/")))
        .page(
            &site("/todays-puzzles/"),
            discover_page(&[(TARGET_PATH, "Times Specialist")]),
        )
        .page(TARGET_URL, listing_page(&["/clue/a/"], None))
        .page(&site("/clue/a/"), clue_page(&["/clue/a/5/"]))
        .page(
            &site("/clue/a/5/"),
            answer_page("Apple", "Food", "Jun 2 2024", "APPLE", &[]),
        );

    let response = run_with_session(&mut session, &test_config()).await;

    assert_eq!(response.status, CrawlStatus::Success);
    assert_eq!(response.stats.categories_discovered, 1);
    assert_eq!(response.results.record_count(), 1);
    assert_eq!(response.results.category("Food").unwrap()[0].answer, "APPLE");
}

#[tokio::test]
async fn test_no_categories_anywhere_is_failure() {
    let mut session = FixtureSession::new().page(BASE_URL, bare_homepage(None));

    let response = run_with_session(&mut session, &test_config()).await;

    assert_eq!(response.status, CrawlStatus::Failure);
    assert_eq!(session.closes, 1);
}

#[tokio::test]
async fn test_target_not_discovered_is_empty_success() {
    let mut session = FixtureSession::new().page(
        BASE_URL,
        homepage(&[("/crossword-answers/nyt/", "NYT")], None),
    );

    let response = run_with_session(&mut session, &test_config()).await;

    assert_eq!(response.status, CrawlStatus::Success);
    assert!(response.complete);
    assert!(response.results.is_empty());
    assert_eq!(response.stats.categories_selected, 0);
}

#[tokio::test]
async fn test_failing_nodes_are_skipped() {
    let mut session = FixtureSession::new()
        .page(BASE_URL, homepage(&[(TARGET_PATH, "Times Specialist")], None))
        .page(
            TARGET_URL,
            listing_page(&["/clue/one/", "/clue/broken/", "/clue/two/"], None),
        )
        .page(&site("/clue/one/"), clue_page(&["/clue/one/3/", "/clue/one/4/"]))
        .page(&site("/clue/two/"), clue_page(&["/clue/two/3/"]))
        .page(
            &site("/clue/one/3/"),
            answer_page("One", "Animals", "d1", "ONE", &[]),
        )
        // Sub-clue page that never shows a reveal control
        .page(&site("/clue/one/4/"), "<html><body><p>Under maintenance</p></body></html>")
        .page(
            &site("/clue/two/3/"),
            answer_page("Two", "Animals", "d2", "TWO", &[]),
        );

    let response = run_with_session(&mut session, &test_config()).await;

    assert_eq!(response.status, CrawlStatus::Success);
    let answers: Vec<&str> = response
        .results
        .category("Animals")
        .unwrap()
        .iter()
        .map(|r| r.answer.as_str())
        .collect();
    assert_eq!(answers, vec!["ONE", "TWO"]);
    assert_eq!(response.stats.clue_failures, 1);
    assert_eq!(response.stats.sub_clue_failures, 1);
    assert_eq!(response.stats.total_failures(), 2);
}

#[tokio::test]
async fn test_records_grouped_by_page_category() {
    let mut session = FixtureSession::new()
        .page(BASE_URL, homepage(&[(TARGET_PATH, "Times Specialist")], None))
        .page(TARGET_URL, listing_page(&["/clue/x/"], None))
        .page(
            &site("/clue/x/"),
            clue_page(&["/clue/x/1/", "/clue/x/2/", "/clue/x/3/"]),
        )
        .page(&site("/clue/x/1/"), answer_page("Cat", "Animals", "", "CAT", &[]))
        .page(&site("/clue/x/2/"), answer_page("Pie", "Food", "", "PIE", &[]))
        .page(&site("/clue/x/3/"), answer_page("Dog", "Animals", "", "DOG", &[]));

    let response = run_with_session(&mut session, &test_config()).await;

    let groups = response.results.groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].category, "Animals");
    assert_eq!(groups[0].content.len(), 2);
    assert_eq!(groups[0].content[1].answer, "DOG");
    assert_eq!(groups[1].category, "Food");
}

#[tokio::test]
async fn test_records_across_listing_pages() {
    let page_2 = "/crossword-answers/times-specialist/?page=2";
    let mut session = FixtureSession::new()
        .page(BASE_URL, homepage(&[(TARGET_PATH, "Times Specialist")], None))
        .page(TARGET_URL, listing_page(&["/clue/p1/"], Some(page_2)))
        .page(&site(page_2), listing_page(&["/clue/p2/"], None))
        .page(&site("/clue/p1/"), clue_page(&["/clue/p1/3/"]))
        .page(&site("/clue/p2/"), clue_page(&["/clue/p2/3/"]))
        .page(&site("/clue/p1/3/"), answer_page("P1", "Animals", "", "ONE", &[]))
        .page(&site("/clue/p2/3/"), answer_page("P2", "Animals", "", "TWO", &[]));

    let response = run_with_session(&mut session, &test_config()).await;

    assert_eq!(response.stats.listing_pages, 2);
    assert_eq!(response.results.record_count(), 2);
    assert_eq!(response.results.category("Animals").unwrap()[1].title, "P2");
}

#[tokio::test]
async fn test_node_retries_recover_transient_failure() {
    let mut session = single_clue_site().failing(&site("/clue/feline-pet/3/"), 1);
    let mut config = test_config();
    config.timing.node_retries = 1;

    let response = run_with_session(&mut session, &config).await;

    assert_eq!(response.results.record_count(), 1);
    assert_eq!(response.stats.retries, 1);
    assert_eq!(response.stats.sub_clue_failures, 0);
}

#[tokio::test]
async fn test_without_retries_transient_failure_is_skipped() {
    let mut session = single_clue_site().failing(&site("/clue/feline-pet/3/"), 1);

    let response = run_with_session(&mut session, &test_config()).await;

    assert_eq!(response.status, CrawlStatus::Success);
    assert!(response.results.is_empty());
    assert_eq!(response.stats.sub_clue_failures, 1);
}

#[tokio::test]
async fn test_timeout_before_discovery_is_failure() {
    let mut session = single_clue_site().slow(BASE_URL, Duration::from_secs(30));
    let mut config = test_config();
    config.timing.crawl_timeout = Some(1);

    let response = run_with_session(&mut session, &config).await;

    assert_eq!(response.status, CrawlStatus::Failure);
    assert!(!response.complete);
    assert_eq!(session.closes, 1);
}

#[tokio::test]
async fn test_timeout_after_discovery_returns_partial_results() {
    let mut session = single_clue_site()
        .page(
            &site("/clue/feline-pet/"),
            clue_page(&["/clue/feline-pet/3/", "/clue/feline-pet/4/"]),
        )
        .page(
            &site("/clue/feline-pet/4/"),
            answer_page("Feline pet", "Animals", "", "PUSS", &[]),
        )
        .slow(&site("/clue/feline-pet/4/"), Duration::from_secs(30));
    let mut config = test_config();
    config.timing.crawl_timeout = Some(1);

    let response = run_with_session(&mut session, &config).await;

    assert_eq!(response.status, CrawlStatus::Success);
    assert!(!response.complete);
    assert_eq!(response.results.record_count(), 1);
    assert_eq!(response.results.category("Animals").unwrap()[0].answer, "CAT");
    assert_eq!(session.closes, 1);
}

#[tokio::test]
async fn test_two_clues_same_category_grouped_together() {
    let cat = || answer_page("Feline pet", "Animals", "May 1 2024", "CAT", &[("CAT", "80%", "feline")]);
    let mut session = FixtureSession::new()
        .page(BASE_URL, homepage(&[(TARGET_PATH, "Times Specialist")], None))
        .page(TARGET_URL, listing_page(&["/clue/c1/", "/clue/c2/"], None))
        .page(&site("/clue/c1/"), clue_page(&["/clue/c1/3/"]))
        .page(&site("/clue/c2/"), clue_page(&["/clue/c2/3/"]))
        .page(&site("/clue/c1/3/"), cat())
        .page(&site("/clue/c2/3/"), cat());

    let response = run_with_session(&mut session, &test_config()).await;

    let json = serde_json::to_value(&response.results).expect("serializable");
    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert_eq!(json[0]["category"], "Animals");
    assert_eq!(json[0]["content"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        json[0]["content"][1]["potentialAnswers"],
        serde_json::json!([{"answer": "CAT", "confidence": "80%", "clueText": "feline"}])
    );
}

/// Homepage whose "more puzzles" link leads to `/todays-puzzles/`
fn site_with_more_link() -> FixtureSession {
    single_clue_site().page(
        BASE_URL,
        homepage(&[(TARGET_PATH, "Times Specialist")], Some("/todays-puzzles/")),
    )
}

#[tokio::test]
async fn test_broken_more_puzzles_page_keeps_featured_categories() {
    let mut session = site_with_more_link().page(
        &site("/todays-puzzles/"),
        "<html><body><p>Something went wrong</p></body></html>",
    );

    let response = run_with_session(&mut session, &test_config()).await;

    assert_eq!(response.status, CrawlStatus::Success);
    assert_eq!(response.stats.categories_discovered, 1);
    assert_eq!(response.stats.categories_selected, 1);
    assert_eq!(response.results.category("Animals").unwrap()[0].answer, "CAT");
    assert!(session.navigations.contains(&site("/todays-puzzles/")));
}

#[tokio::test]
async fn test_unreachable_more_puzzles_page_keeps_featured_categories() {
    let mut session = site_with_more_link();

    let response = run_with_session(&mut session, &test_config()).await;

    assert_eq!(response.status, CrawlStatus::Success);
    assert_eq!(response.stats.categories_discovered, 1);
    assert_eq!(response.results.record_count(), 1);
    assert_eq!(session.closes, 1);
}

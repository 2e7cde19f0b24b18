//! Feed client pagination and retry tests
//!
//! All pages come from a scripted in-memory source.

use crate::common::{numbered_transfers, scripted_client, ScriptedPageSource};
use whale_flow_signals::errors::FeedError;
use whale_flow_signals::feed::{FeedResponse, TimeWindow};

const WINDOW: TimeWindow = TimeWindow {
    start: 1_700_000_000,
    end: 1_700_002_879,
};

fn ids(transactions: &[whale_flow_signals::types::Transaction]) -> Vec<String> {
    transactions.iter().map(|tx| tx.id.clone()).collect()
}

#[tokio::test]
async fn test_single_short_page() {
    let source = ScriptedPageSource::new().page(FeedResponse::success("c1", numbered_transfers("p1", 2)));
    let client = scripted_client(source, 3);

    let outcome = client.fetch(WINDOW).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.transactions.len(), 2);
    assert_eq!(outcome.pages, 1);
    assert_eq!(client.source().request_count(), 1);
}

#[tokio::test]
async fn test_paginates_until_short_page() {
    let page1 = numbered_transfers("p1", 3);
    let page2 = numbered_transfers("p2", 3);
    let page3 = numbered_transfers("p3", 1);
    let source = ScriptedPageSource::new()
        .page(FeedResponse::success("c1", page1.clone()))
        .page(FeedResponse::success("c2", page2.clone()))
        .page(FeedResponse::success("c3", page3.clone()));
    let client = scripted_client(source, 3);

    let outcome = client.fetch(WINDOW).await;

    assert!(outcome.is_complete());
    assert_eq!(client.source().request_count(), 3);
    assert_eq!(outcome.pages, 3);

    let expected: Vec<String> = ids(&page1)
        .into_iter()
        .chain(ids(&page2))
        .chain(ids(&page3))
        .collect();
    assert_eq!(ids(&outcome.transactions), expected);

    let cursors: Vec<Option<String>> = client
        .source()
        .queries()
        .into_iter()
        .map(|q| q.cursor)
        .collect();
    assert_eq!(
        cursors,
        vec![None, Some("c1".to_string()), Some("c2".to_string())]
    );
}

#[tokio::test]
async fn test_empty_last_page_after_full_page() {
    let source = ScriptedPageSource::new()
        .page(FeedResponse::success("c1", numbered_transfers("p1", 2)))
        .page(FeedResponse::success("c2", Vec::new()));
    let client = scripted_client(source, 2);

    let outcome = client.fetch(WINDOW).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.transactions.len(), 2);
    assert_eq!(client.source().request_count(), 2);
}

#[tokio::test]
async fn test_query_carries_settings_and_window() {
    let source = ScriptedPageSource::new().page(FeedResponse::success("c1", Vec::new()));
    let client = scripted_client(source, 100);

    client.fetch(WINDOW).await;

    let query = &client.source().queries()[0];
    assert_eq!(query.api_key, "test-key");
    assert_eq!(query.min_value, "500000");
    assert_eq!(query.limit, 100);
    assert_eq!(query.window, WINDOW);
    assert_eq!(query.cursor, None);
}

#[tokio::test]
async fn test_retry_once_then_success() {
    let good = numbered_transfers("good", 2);
    let source = ScriptedPageSource::new()
        .page(FeedResponse::failure("temporarily unavailable"))
        .page(FeedResponse::success("c1", good.clone()));
    let client = scripted_client(source, 5);

    let outcome = client.fetch(WINDOW).await;

    assert!(outcome.is_complete());
    assert_eq!(client.source().request_count(), 2);
    assert_eq!(outcome.requests, 2);
    assert_eq!(ids(&outcome.transactions), ids(&good));

    let queries = client.source().queries();
    assert_eq!(queries[0], queries[1]);
}

#[tokio::test]
async fn test_retry_is_per_page() {
    let source = ScriptedPageSource::new()
        .page(FeedResponse::failure("busy"))
        .page(FeedResponse::success("c1", numbered_transfers("p1", 2)))
        .page(FeedResponse::failure("busy"))
        .page(FeedResponse::success("c2", numbered_transfers("p2", 1)));
    let client = scripted_client(source, 2);

    let outcome = client.fetch(WINDOW).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.transactions.len(), 3);
    assert_eq!(client.source().request_count(), 4);
}

#[tokio::test]
async fn test_second_failure_keeps_earlier_pages() {
    let page1 = numbered_transfers("p1", 2);
    let source = ScriptedPageSource::new()
        .page(FeedResponse::success("c1", page1.clone()))
        .page(FeedResponse::failure("rate limited"))
        .page(FeedResponse::failure("rate limited"));
    let client = scripted_client(source, 2);

    let outcome = client.fetch(WINDOW).await;

    assert_eq!(client.source().request_count(), 3);
    assert_eq!(ids(&outcome.transactions), ids(&page1));
    match outcome.error {
        Some(FeedError::Upstream { message }) => assert_eq!(message, "rate limited"),
        other => panic!("expected upstream error, got {:?}", other),
    }
    let last = client.source().queries().pop().unwrap();
    assert_eq!(last.cursor, Some("c1".to_string()));
}

#[tokio::test]
async fn test_transport_failure_is_retried() {
    let source = ScriptedPageSource::new()
        .error(FeedError::Transport("timed out".to_string()))
        .page(FeedResponse::success("c1", numbered_transfers("p1", 1)));
    let client = scripted_client(source, 5);

    let outcome = client.fetch(WINDOW).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.transactions.len(), 1);
    assert_eq!(client.source().request_count(), 2);
}

#[tokio::test]
async fn test_decode_failure_is_not_retried() {
    let source = ScriptedPageSource::new()
        .error(FeedError::Decode("expected value at line 1".to_string()))
        .page(FeedResponse::success("c1", numbered_transfers("p1", 1)));
    let client = scripted_client(source, 5);

    let outcome = client.fetch(WINDOW).await;

    assert!(matches!(outcome.error, Some(FeedError::Decode(_))));
    assert!(outcome.transactions.is_empty());
    assert_eq!(client.source().request_count(), 1);
}

#[tokio::test]
async fn test_full_page_without_cursor_stops() {
    let source = ScriptedPageSource::new().page(FeedResponse::success("", numbered_transfers("p1", 2)));
    let client = scripted_client(source, 2);

    let outcome = client.fetch(WINDOW).await;

    assert!(outcome.is_complete());
    assert_eq!(outcome.transactions.len(), 2);
    assert_eq!(client.source().request_count(), 1);
}

#[tokio::test]
async fn test_location_hint_omits_api_key() {
    let source = ScriptedPageSource::new().page(FeedResponse::failure("bad key")).page(FeedResponse::failure("bad key"));
    let client = scripted_client(source, 2);

    let outcome = client.fetch(WINDOW).await;

    let hint = outcome.location_hint.unwrap();
    assert!(hint.contains("start=1700000000"));
    assert!(!hint.contains("test-key"));
}

#[tokio::test]
async fn test_upstream_failure_without_message_is_described() {
    let source = ScriptedPageSource::new()
        .page(FeedResponse::failure(""))
        .page(FeedResponse::failure(""));
    let client = scripted_client(source, 2);

    let outcome = client.fetch(WINDOW).await;

    let text = outcome.error.unwrap().to_string();
    assert!(!text.is_empty());
    assert!(text.contains("\"error\""));
}

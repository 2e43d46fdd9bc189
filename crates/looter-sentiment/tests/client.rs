//! Integration tests for `SentimentClient` using wiremock HTTP mocks.

use chrono::NaiveDate;
use looter_core::{Platform, PostRecord, Sentiment};
use looter_extract::ResultStore;
use looter_sentiment::{enrich_record, SentimentClient, SentimentError, DEFAULT_MODEL};
use uuid::Uuid;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> SentimentClient {
    SentimentClient::with_base_url("test-key", DEFAULT_MODEL, 30, base_url)
        .expect("client construction should not fail")
}

fn label_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
}

fn test_record(description: &str) -> PostRecord {
    PostRecord {
        id: Uuid::new_v4(),
        platform: Platform::Instagram,
        username: "alice".to_owned(),
        followers: 100,
        captured_at: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        likes: 10,
        comments: Some(2),
        views: None,
        retweets: None,
        description: description.to_owned(),
        sentiment: None,
    }
}

#[tokio::test]
async fn classify_parses_an_uppercase_label() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-3-flash-preview:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body("POSITIVE")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let label = client.classify("great launch").await.expect("request ok");
    assert_eq!(label, Some(Sentiment::Positive));
}

#[tokio::test]
async fn classify_trims_surrounding_whitespace() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body("  Neutral \n")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let label = client.classify("some post").await.expect("request ok");
    assert_eq!(label, Some(Sentiment::Neutral));
}

#[tokio::test]
async fn classify_discards_unrecognized_labels() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body("maybe")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let label = client.classify("some post").await.expect("request ok");
    assert_eq!(label, None);
}

#[tokio::test]
async fn classify_handles_an_empty_candidate_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let label = client.classify("some post").await.expect("request ok");
    assert_eq!(label, None);
}

#[tokio::test]
async fn classify_sends_the_description_in_the_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("Exploring the latest trends"))
        .and(body_string_contains("Return ONLY one word"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body("NEGATIVE")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let label = client
        .classify("Exploring the latest trends on ig. #vibe #social")
        .await
        .expect("request ok");
    assert_eq!(label, Some(Sentiment::Negative));
}

#[tokio::test]
async fn classify_surfaces_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.classify("some post").await.unwrap_err();
    assert!(matches!(
        err,
        SentimentError::UnexpectedStatus { status: 500 }
    ));
}

#[tokio::test]
async fn classify_surfaces_malformed_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.classify("some post").await.unwrap_err();
    assert!(matches!(err, SentimentError::Deserialize { .. }));
}

#[tokio::test]
async fn enrich_updates_only_the_sentiment_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body("POSITIVE")))
        .mount(&server)
        .await;

    let store = ResultStore::new();
    let record = test_record("what a great day");
    let id = record.id;
    store.prepend_all(vec![record.clone()]);

    let client = test_client(&server.uri());
    assert!(enrich_record(&client, &store, id).await);

    let updated = store.get(id).expect("record still present");
    assert_eq!(updated.sentiment, Some(Sentiment::Positive));
    assert_eq!(updated.username, record.username);
    assert_eq!(updated.platform, record.platform);
    assert_eq!(updated.followers, record.followers);
}

#[tokio::test]
async fn enrich_leaves_sentiment_unset_on_unrecognized_label() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body("mostly positive")))
        .mount(&server)
        .await;

    let store = ResultStore::new();
    let record = test_record("ambiguous post");
    let id = record.id;
    store.prepend_all(vec![record]);

    let client = test_client(&server.uri());
    assert!(!enrich_record(&client, &store, id).await);
    assert_eq!(store.get(id).expect("record present").sentiment, None);
}

#[tokio::test]
async fn enrich_swallows_classifier_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = ResultStore::new();
    let record = test_record("post");
    let id = record.id;
    store.prepend_all(vec![record]);

    let client = test_client(&server.uri());
    assert!(!enrich_record(&client, &store, id).await);
    assert_eq!(store.get(id).expect("record present").sentiment, None);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn enrich_is_a_no_op_for_a_missing_record() {
    let server = MockServer::start().await;

    // No request should ever be made for a record that is not in the store.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body("POSITIVE")))
        .expect(0)
        .mount(&server)
        .await;

    let store = ResultStore::new();
    let client = test_client(&server.uri());
    assert!(!enrich_record(&client, &store, Uuid::new_v4()).await);
    assert!(store.is_empty());
}

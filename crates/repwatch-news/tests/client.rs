//! Integration tests for `NewsClient` using wiremock HTTP mocks.

use repwatch_news::{NewsClient, NewsError, NewsStatus};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> NewsClient {
    NewsClient::new(
        &format!("{}/v1/news/everything", server.uri()),
        "test-key",
        5,
        "repwatch-test/0.1",
    )
    .expect("client construction should not fail")
    .with_page_size(10)
}

#[tokio::test]
async fn search_returns_parsed_articles() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "ok",
        "total_results": 2,
        "results": [
            {
                "title": "Acme opens new plant",
                "description": "Acme expands production.",
                "url": "https://news.example.com/acme-plant",
                "published_at": "2025-04-02T08:00:00Z",
                "source": { "name": "Example Wire", "logo": "https://news.example.com/logo.png" },
                "sentiment": { "overall": { "score": 0.6, "label": "positive" } },
                "read_time": 3,
                "topics": ["manufacturing"]
            },
            {
                "title": "Acme quarterly results",
                "href": "https://news.example.com/acme-q1",
                "engagement": { "views": 1200, "shares": 14 }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v1/news/everything"))
        .and(query_param("title", "acme"))
        .and(query_param("per_page", "10"))
        .and(query_param("sort.order", "desc"))
        .and(header("X-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let data = test_client(&server)
        .search("acme")
        .await
        .expect("search should succeed");

    assert_eq!(data.status, NewsStatus::Ok);
    assert_eq!(data.total_results, Some(2));
    assert_eq!(data.results.len(), 2);
    assert_eq!(data.results[0].title, "Acme opens new plant");
    assert_eq!(
        data.results[0].sentiment.as_ref().map(|s| s.label.as_str()),
        Some("positive")
    );
    assert_eq!(data.results[1].url, "https://news.example.com/acme-q1");
    assert_eq!(
        data.results[1].engagement.as_ref().and_then(|e| e.views),
        Some(1200)
    );
}

#[tokio::test]
async fn search_skips_malformed_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/news/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "results": [
                { "title": "Usable", "url": "https://news.example.com/1" },
                { "title": "No link" },
                42
            ]
        })))
        .mount(&server)
        .await;

    let data = test_client(&server).search("acme").await.unwrap();
    assert_eq!(data.results.len(), 1);
    assert_eq!(data.results[0].title, "Usable");
}

#[tokio::test]
async fn search_maps_429_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "30"),
        )
        .mount(&server)
        .await;

    let err = test_client(&server).search("acme").await.unwrap_err();
    assert!(
        matches!(err, NewsError::RateLimited { retry_after_secs: 30 }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn search_maps_auth_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("title", "locked"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("title", "forbidden"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(matches!(
        client.search("locked").await,
        Err(NewsError::Unauthorized)
    ));
    assert!(matches!(
        client.search("forbidden").await,
        Err(NewsError::Forbidden)
    ));
}

#[tokio::test]
async fn search_surfaces_error_envelope_with_ok_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "not_ok",
            "error": { "message": "plan limit reached" }
        })))
        .mount(&server)
        .await;

    let err = test_client(&server).search("acme").await.unwrap_err();
    assert!(
        matches!(err, NewsError::Api(ref m) if m == "plan limit reached"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn search_rejects_body_without_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "articles": [] })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server).search("acme").await.unwrap_err();
    assert!(matches!(err, NewsError::Deserialize { .. }), "got {err:?}");
}

#[tokio::test]
async fn search_rejects_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>maintenance</html>"),
        )
        .mount(&server)
        .await;

    let err = test_client(&server).search("acme").await.unwrap_err();
    assert!(matches!(err, NewsError::Deserialize { .. }), "got {err:?}");
}

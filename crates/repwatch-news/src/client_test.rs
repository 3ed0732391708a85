use super::*;

fn test_client(endpoint: &str) -> NewsClient {
    NewsClient::new(endpoint, "test-key", 5, "repwatch-test/0.1")
        .expect("client construction should not fail")
}

#[test]
fn search_url_has_title_filter_page_size_and_sort() {
    let client = test_client("https://news.example.com/v1/news/everything").with_page_size(5);
    let url = client.search_url("acme");
    assert_eq!(
        url.as_str(),
        "https://news.example.com/v1/news/everything?title=acme&per_page=5&sort.by=published_at&sort.order=desc"
    );
}

#[test]
fn search_url_encodes_special_characters() {
    let client = test_client("https://news.example.com/search");
    let url = client.search_url("acme & co");
    assert!(
        url.as_str().contains("title=acme+%26+co"),
        "keyword should be percent-encoded: {url}"
    );
}

#[test]
fn search_url_never_contains_api_key() {
    let client = test_client("https://news.example.com/search");
    assert!(!client.search_url("acme").as_str().contains("test-key"));
}

#[test]
fn page_size_is_at_least_one() {
    let client = test_client("https://news.example.com/search").with_page_size(0);
    assert_eq!(client.page_size, 1);
}

#[test]
fn invalid_endpoint_is_rejected() {
    let result = NewsClient::new("not a url", "k", 5, "ua");
    assert!(matches!(result, Err(NewsError::InvalidUrl { .. })));
}

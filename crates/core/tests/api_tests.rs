//! Library API integration tests
use std::time::Duration;

use readlater_core::*;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

#[test]
fn test_extract_fields_article() {
    let html = read_fixture("article.html");
    let config = MetadataConfig::default();
    let result = extract_fields(&html, "https://blog.example.com/posts/ownership", None, &config);

    assert_eq!(result.title, "Understanding Ownership & Borrowing");
    assert_eq!(
        result.description,
        "A walk through moves, borrows and lifetimes, with examples you can run."
    );
    assert_eq!(result.thumbnail, "https://blog.example.com/images/ownership-card.png");
}

#[test]
fn test_extract_fields_body_fallbacks() {
    let html = read_fixture("bare.html");
    let config = MetadataConfig::default();
    let result = extract_fields(&html, "https://notes.example.com/team/weekly/", None, &config);

    assert_eq!(result.title, "Weekly Notes");
    assert_eq!(
        result.description,
        "These are the notes from the weekly sync, collected for anyone who missed it."
    );
    assert_eq!(result.thumbnail, "https://notes.example.com/team/weekly/assets/cover.jpg");
}

#[test]
fn test_extract_fields_empty_page() {
    let html = read_fixture("empty.html");
    let config = MetadataConfig::default();
    let result = extract_fields(&html, "https://example.com/my-cool_article.html", None, &config);

    assert_eq!(result, MetadataResult::new("My Cool Article", "", PLACEHOLDER_THUMBNAIL));
}

#[test]
fn test_extract_fields_uses_hints() {
    let html = read_fixture("empty.html");
    let config = MetadataConfig::default();
    let table = DomainTable::builtin();
    let hint = table.lookup("www.youtube.com");
    let result = extract_fields(&html, "https://www.youtube.com/watch?v=1", hint, &config);

    assert_eq!(result.title, "YouTube");
    assert_eq!(result.description, "YouTube - Watch, Listen, Stream");
}

#[test]
fn test_platform_fields_from_fixture() {
    let html = read_fixture("twitter_post.html");
    let config = MetadataConfig::default();
    let result = extract_platform_fields(&html, "https://x.com/jack/status/20", None, Some("jack"), &config);

    assert_eq!(result.title, "@jack");
    assert_eq!(result.description, "just setting up my twttr");
    assert!(result.thumbnail.starts_with("https://pbs.twimg.com/"));
}

#[test]
fn test_title_from_url_api() {
    assert_eq!(title_from_url("https://example.com/my-cool_article.html", 100), "My Cool Article");
    assert_eq!(title_from_url("https://twitter.com/jack", 100), "@jack on Twitter/X");
}

#[test]
fn test_fetch_file_api() {
    let html = fetch_file(&get_fixture_path("article.html")).unwrap();
    assert!(html.contains("og:title"));

    let missing = fetch_file("../../tests/fixtures/nope.html");
    assert!(matches!(missing, Err(ReadLaterError::FileNotFound(_))));
}

#[test]
fn test_link_helpers_api() {
    let url = normalize_url("example.com/post");
    assert!(validate_url(&url));
    assert!(is_duplicate("HTTPS://EXAMPLE.COM/POST", [url.as_str()]));
    assert_eq!(suggest_tags("https://github.com/rust-lang/rust", &[]), vec!["code", "github"]);
}

#[tokio::test]
async fn test_service_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("url", "https://blog.example.com/posts/ownership"))
        .respond_with(ResponseTemplate::new(200).set_body_string(read_fixture("article.html")))
        .expect(1)
        .mount(&server)
        .await;

    let relay = ProxyStrategy::from_template(&format!("{}/raw?url={{url}}", server.uri())).unwrap();
    let config = MetadataConfig::builder()
        .proxies(vec![relay])
        .fetch_timeout(Duration::from_secs(2))
        .build();
    let service = MetadataService::new(config).unwrap();

    let first = service.extract_metadata("https://blog.example.com/posts/ownership").await;
    let second = service.extract_metadata("https://blog.example.com/posts/ownership").await;

    assert_eq!(first.title, "Understanding Ownership & Borrowing");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_service_json_envelope_relay() {
    let server = MockServer::start().await;
    let envelope = serde_json::json!({ "contents": read_fixture("article.html"), "status": { "http_code": 200 } });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
        .mount(&server)
        .await;

    let relay = ProxyStrategy::from_template(&format!("{}/get?url={{url}}", server.uri())).unwrap();
    let service = MetadataService::new(MetadataConfig::builder().proxies(vec![relay]).build()).unwrap();

    let result = service.extract_metadata("https://blog.example.com/posts/ownership").await;
    assert_eq!(result.thumbnail, "https://blog.example.com/images/ownership-card.png");
}

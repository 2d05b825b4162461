//! HTTP routes for link previews and tag suggestions.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use readlater_core::{MetadataResult, MetadataService, suggest_tags, validate_url};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

pub struct AppState {
    pub service: MetadataService,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub cache_entries: usize,
    pub cache_capacity: usize,
    pub cache_ttl_secs: u64,
    pub domain_hints: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize)]
struct MetadataQuery {
    url: String,
}

#[derive(Deserialize)]
struct TagsQuery {
    url: String,
    /// Comma-separated tags the list already has.
    existing: Option<String>,
}

/// Builds the router. `request_timeout` bounds a whole request, which may
/// walk every relay in turn.
pub fn router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/metadata", get(api_metadata))
        .route("/api/tags", get(api_tags))
        .with_state(state)
        .layer(cors)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!("http_request", method = %request.method(), path = %request.uri().path())
        }))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let cache = state.service.cache();
    Json(HealthResponse {
        status: "ok".to_string(),
        cache_entries: cache.len(),
        cache_capacity: cache.capacity(),
        cache_ttl_secs: cache.ttl().as_secs(),
        domain_hints: state.service.domains().len(),
    })
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
}

async fn api_metadata(State(state): State<Arc<AppState>>, Query(query): Query<MetadataQuery>) -> Response {
    if !validate_url(&query.url) {
        return bad_request(format!("not an http(s) URL: {}", query.url));
    }

    let preview: MetadataResult = state.service.extract_metadata(query.url.trim()).await;
    debug!(url = %query.url, title = %preview.title, "served preview");
    Json(preview).into_response()
}

async fn api_tags(Query(query): Query<TagsQuery>) -> Response {
    if !validate_url(&query.url) {
        return bad_request(format!("not an http(s) URL: {}", query.url));
    }

    let existing: Vec<String> = query
        .existing
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();

    Json(TagsResponse { tags: suggest_tags(&query.url, &existing) }).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use readlater_core::MetadataConfig;
    use tower::ServiceExt;

    fn app() -> Router {
        let config = MetadataConfig::builder().proxies(Vec::new()).build();
        let service = MetadataService::new(config).unwrap();
        router(Arc::new(AppState { service }), Duration::from_secs(5))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { serde_json::Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, json) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["cache_capacity"], 100);
        assert_eq!(json["cache_ttl_secs"], 3600);
        assert_eq!(json["domain_hints"], readlater_core::DomainTable::builtin().len());
    }

    #[tokio::test]
    async fn test_metadata_falls_back_without_relays() {
        let (status, json) =
            get_json(app(), "/api/metadata?url=https%3A%2F%2Fexample.com%2Fmy-cool_article.html").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["title"], "My Cool Article");
        assert_eq!(json["description"], "");
        assert_eq!(json["thumbnail"], "/placeholder.svg");
    }

    #[tokio::test]
    async fn test_metadata_uses_domain_hints() {
        let (status, json) = get_json(app(), "/api/metadata?url=https%3A%2F%2Fwww.youtube.com%2Fwatch").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["title"], "YouTube");
    }

    #[tokio::test]
    async fn test_metadata_rejects_non_http_url() {
        let (status, json) = get_json(app(), "/api/metadata?url=ftp%3A%2F%2Fexample.com").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("ftp://example.com"));
    }

    #[tokio::test]
    async fn test_metadata_requires_url_param() {
        let response = app()
            .oneshot(Request::builder().uri("/api/metadata").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cache_fills_after_request() {
        let config = MetadataConfig::builder().proxies(Vec::new()).build();
        let state = Arc::new(AppState { service: MetadataService::new(config).unwrap() });
        let app = router(state.clone(), Duration::from_secs(5));

        let (status, _) = get_json(app, "/api/metadata?url=https%3A%2F%2Fexample.com%2F").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.service.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_tags() {
        let (status, json) =
            get_json(app(), "/api/tags?url=https%3A%2F%2Fgithub.com%2Frust-lang&existing=code,%20rust").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["tags"], serde_json::json!(["github"]));
    }

    #[tokio::test]
    async fn test_tags_rejects_invalid_url() {
        let (status, _) = get_json(app(), "/api/tags?url=nope").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

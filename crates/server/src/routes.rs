use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use precis_core::{Fetcher, Pipeline, PrecisError};
use serde::Deserialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::REQUEST_TIMEOUT_SECS;
use crate::store::Store;

/// Shared state for all handlers.
pub struct AppState<F, S> {
    pub pipeline: Arc<Pipeline<F>>,
    pub store: Option<Arc<S>>,
}

impl<F, S> AppState<F, S> {
    pub fn new(pipeline: Arc<Pipeline<F>>, store: Option<Arc<S>>) -> Self {
        Self { pipeline, store }
    }
}

impl<F, S> Clone for AppState<F, S> {
    fn clone(&self) -> Self {
        Self { pipeline: Arc::clone(&self.pipeline), store: self.store.clone() }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub url: String,
}

pub fn router<F, S>(state: AppState<F, S>) -> Router
where
    F: Fetcher + 'static,
    S: Store,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/summarize", post(handle_summarize::<F, S>))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// GET /health
async fn handle_health() -> &'static str {
    "ok"
}

/// POST /api/summarize
async fn handle_summarize<F, S>(
    State(state): State<AppState<F, S>>,
    body: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Response
where
    F: Fetcher + 'static,
    S: Store,
{
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return error_response(&PrecisError::InvalidUrl(rejection.body_text()));
        }
    };

    match state.pipeline.run(&request.url).await {
        Ok(output) => {
            if let Some(store) = &state.store
                && let Err(err) = store.save(&output).await
            {
                tracing::warn!(url = %output.blog.url, error = %format!("{err:#}"), "failed to persist summary");
            }
            (StatusCode::OK, Json(output.blog)).into_response()
        }
        Err(err) => {
            tracing::info!(url = %request.url, kind = ?err.kind(), "summarize failed: {err}");
            error_response(&err)
        }
    }
}

fn error_response(err: &PrecisError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err.to_response())).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use precis_core::{Dictionary, PipelineConfig, Result};
    use tower::ServiceExt;
    use url::Url;

    use super::*;
    use crate::store::memory::MemoryStore;

    /// Serves fixtures by path; `/missing` is a 404 and anything else is unreachable.
    struct FixtureFetcher;

    impl Fetcher for FixtureFetcher {
        async fn fetch(&self, url: &Url) -> Result<String> {
            match url.path() {
                "/ownership" => Ok(std::fs::read_to_string("../../tests/fixtures/blog_post.html")?),
                "/empty" => Ok(std::fs::read_to_string("../../tests/fixtures/empty_content.html")?),
                "/missing" => Err(PrecisError::NotFound),
                _ => Err(PrecisError::Unreachable { host: url.host_str().unwrap_or_default().to_string() }),
            }
        }
    }

    fn state(store: Option<Arc<MemoryStore>>) -> AppState<FixtureFetcher, MemoryStore> {
        let pipeline = Pipeline::with_fetcher(FixtureFetcher, PipelineConfig::default(), Arc::new(Dictionary::builtin()));
        AppState::new(Arc::new(pipeline), store)
    }

    async fn post_json(app: Router, body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/summarize")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let app = router(state(None));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn summarize_returns_record() {
        let (status, json) = post_json(router(state(None)), r#"{"url": "https://blog.example.com/ownership"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["url"], "https://blog.example.com/ownership");
        assert_eq!(json["title"], "Why Rust Ownership Matters | The Example Blog");
        assert_eq!(json["readTime"], 1);
        assert!(json["summary"].as_str().unwrap().contains("Rust guarantees memory safety"));
        assert!(json["translatedSummary"].as_str().unwrap().contains("کد"));
    }

    #[tokio::test]
    async fn summarize_persists_full_text() {
        let store = Arc::new(MemoryStore::default());
        let (status, _) = post_json(
            router(state(Some(Arc::clone(&store)))),
            r#"{"url": "https://blog.example.com/ownership"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(store.len(), 1);
        let records = store.records.lock().unwrap();
        assert_eq!(records[0].url, "https://blog.example.com/ownership");
        assert_eq!(records[0].selector.as_deref(), Some("article"));
    }

    #[tokio::test]
    async fn store_failure_does_not_change_response() {
        let store = Arc::new(MemoryStore::failing());
        let (status, json) =
            post_json(router(state(Some(store))), r#"{"url": "https://blog.example.com/ownership"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["title"], "Why Rust Ownership Matters | The Example Blog");
    }

    #[tokio::test]
    async fn invalid_url_is_validation_error() {
        let store = Arc::new(MemoryStore::default());
        let (status, json) = post_json(router(state(Some(Arc::clone(&store)))), r#"{"url": "ftp://x"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "validation");
        assert!(json["error"].as_str().unwrap().starts_with("Invalid URL"));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn malformed_body_is_validation_error() {
        let (status, json) = post_json(router(state(None)), r#"{"link": "https://example.com"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "validation");
    }

    #[tokio::test]
    async fn fetch_errors_map_to_bad_request() {
        let (status, json) = post_json(router(state(None)), r#"{"url": "https://blog.example.com/missing"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "fetch");

        let (status, json) = post_json(router(state(None)), r#"{"url": "https://offline.example.com/"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Could not reach offline.example.com");
    }

    #[tokio::test]
    async fn extraction_error_maps_to_bad_request() {
        let (status, json) = post_json(router(state(None)), r#"{"url": "https://example.com/empty"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "extraction");
    }
}

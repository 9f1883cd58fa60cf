mod analysis;
mod export;
mod videos;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tubesense_sentiment::SentimentAnalyzer;
use tubesense_store::{DataStore, StoreError};
use tubesense_youtube::{QuotaUsage, YouTubeClient, YouTubeError};

use crate::middleware::request_id;

/// Services shared by every handler. Each is constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub youtube: Arc<YouTubeClient>,
    pub analyzer: Arc<SentimentAnalyzer>,
    pub store: Arc<DataStore>,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    model_loaded: bool,
    model: Option<String>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Unwrap a JSON body, turning axum's rejection into our error shape.
pub(super) fn parse_body<T>(
    request_id: &str,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::new(request_id, "bad_request", rejection.body_text()))
}

/// Both video API failure categories are server errors; the code tells
/// quota/auth problems apart from everything else.
pub(super) fn map_youtube_error(request_id: String, error: &YouTubeError) -> ApiError {
    tracing::warn!(error = %error, "video API call failed");
    let code = if error.is_quota_or_auth() {
        "quota_exceeded"
    } else {
        "upstream_error"
    };
    ApiError::new(request_id, code, error.to_string())
}

pub(super) fn map_store_error(request_id: String, error: &StoreError) -> ApiError {
    tracing::error!(error = %error, "persistence failed");
    ApiError::new(request_id, "internal_error", "failed to write results")
}

/// Run a blocking [`DataStore`] operation off the async workers.
pub(super) async fn with_store<T, F>(
    state: &AppState,
    request_id: &str,
    op: F,
) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&DataStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    match tokio::task::spawn_blocking(move || op(&store)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(map_store_error(request_id.to_owned(), &e)),
        Err(e) => {
            tracing::error!(error = %e, "persistence task panicked");
            Err(ApiError::new(
                request_id,
                "internal_error",
                "failed to write results",
            ))
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
        .expose_headers([HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/quota", get(quota))
        .route("/api/search", post(videos::search))
        .route("/api/comments", post(videos::comments))
        .route("/api/analyze", post(analysis::analyze))
        .route("/api/analyze-video", post(analysis::analyze_video))
        .route("/api/export", post(export::export))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthData> {
    let model_loaded = state.analyzer.is_loaded();
    Json(HealthData {
        status: if model_loaded { "ok" } else { "degraded" },
        model_loaded,
        model: state.analyzer.model_id().map(ToOwned::to_owned),
    })
}

async fn quota(State(state): State<AppState>) -> Json<QuotaUsage> {
    Json(state.youtube.quota_usage())
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

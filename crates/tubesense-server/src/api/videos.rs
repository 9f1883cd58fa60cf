use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tubesense_core::{Comment, Video};
use tubesense_youtube::QuotaUsage;

use crate::middleware::RequestId;

use super::{map_youtube_error, parse_body, ApiError, AppState};

const DEFAULT_SEARCH_RESULTS: u32 = 10;
pub(super) const DEFAULT_COMMENT_RESULTS: usize = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchRequest {
    pub query: Option<String>,
    pub max_results: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchResponse {
    pub videos: Vec<Video>,
    pub quota: QuotaUsage,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct CommentsRequest {
    pub video_id: Option<String>,
    pub max_results: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(super) struct CommentsResponse {
    pub comments: Vec<Comment>,
    pub count: usize,
    pub quota: QuotaUsage,
}

/// Treat absent and empty strings alike, the way form-driven clients send them.
pub(super) fn required<'a>(
    request_id: &str,
    value: Option<&'a str>,
    message: &str,
) -> Result<&'a str, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::new(request_id, "bad_request", message))
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let body = parse_body(&req_id.0, payload)?;
    let query = required(&req_id.0, body.query.as_deref(), "Query is required")?;

    let videos = state
        .youtube
        .search(query, body.max_results.unwrap_or(DEFAULT_SEARCH_RESULTS))
        .await
        .map_err(|e| map_youtube_error(req_id.0.clone(), &e))?;

    Ok(Json(SearchResponse {
        videos,
        quota: state.youtube.quota_usage(),
    }))
}

pub(super) async fn comments(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<CommentsRequest>, JsonRejection>,
) -> Result<Json<CommentsResponse>, ApiError> {
    let body = parse_body(&req_id.0, payload)?;
    let video_id = required(&req_id.0, body.video_id.as_deref(), "Video ID is required")?;

    let comments = state
        .youtube
        .get_comments(
            video_id,
            body.max_results.unwrap_or(DEFAULT_COMMENT_RESULTS),
        )
        .await
        .map_err(|e| map_youtube_error(req_id.0.clone(), &e))?;

    Ok(Json(CommentsResponse {
        count: comments.len(),
        comments,
        quota: state.youtube.quota_usage(),
    }))
}

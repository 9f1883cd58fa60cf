use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tubesense_core::{Comment, CommentRecord, Statistics};
use tubesense_sentiment::{analyze_comments, analyze_records};
use tubesense_youtube::QuotaUsage;

use crate::middleware::RequestId;

use super::videos::{required, DEFAULT_COMMENT_RESULTS};
use super::{map_youtube_error, parse_body, with_store, ApiError, AppState};

const DEFAULT_REPORT_QUERY: &str = "politik";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct AnalyzeRequest {
    pub comments: Option<Vec<CommentRecord>>,
}

#[derive(Debug, Serialize)]
pub(super) struct AnalyzeResponse {
    pub comments: Vec<CommentRecord>,
    pub statistics: Statistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct AnalyzeVideoRequest {
    pub video_id: Option<String>,
    pub max_comments: Option<usize>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct AnalyzeVideoResponse {
    pub comments: Vec<Comment>,
    pub statistics: Statistics,
    pub saved_to: String,
    pub quota: QuotaUsage,
}

/// Label client-supplied records. Fields other than `text` are echoed back
/// untouched, whatever their type.
pub(super) async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let body = parse_body(&req_id.0, payload)?;
    let mut comments = body
        .comments
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "bad_request", "Comments are required"))?;

    let statistics = analyze_records(&state.analyzer, &mut comments).await;

    Ok(Json(AnalyzeResponse {
        comments,
        statistics,
    }))
}

/// Fetch, analyse and persist a report in one call.
///
/// A video with no comments is a 404 and nothing is written.
pub(super) async fn analyze_video(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeVideoRequest>, JsonRejection>,
) -> Result<Json<AnalyzeVideoResponse>, ApiError> {
    let body = parse_body(&req_id.0, payload)?;
    let video_id = required(&req_id.0, body.video_id.as_deref(), "Video ID is required")?;
    let query = body
        .query
        .unwrap_or_else(|| DEFAULT_REPORT_QUERY.to_owned());

    let mut comments = state
        .youtube
        .get_comments(
            video_id,
            body.max_comments.unwrap_or(DEFAULT_COMMENT_RESULTS),
        )
        .await
        .map_err(|e| map_youtube_error(req_id.0.clone(), &e))?;

    if comments.is_empty() {
        return Err(ApiError::new(
            req_id.0.clone(),
            "not_found",
            "No comments found",
        ));
    }

    let statistics = analyze_comments(&state.analyzer, &mut comments).await;

    let (comments, saved_to) = {
        let stats = statistics.clone();
        with_store(&state, &req_id.0, move |store| {
            let path = store.export_analysis_report(&comments, &stats, &query, None)?;
            Ok((comments, path))
        })
        .await?
    };

    Ok(Json(AnalyzeVideoResponse {
        comments,
        statistics,
        saved_to: saved_to.display().to_string(),
        quota: state.youtube.quota_usage(),
    }))
}

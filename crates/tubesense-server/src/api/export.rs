use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tubesense_core::CommentRecord;

use crate::middleware::RequestId;

use super::{parse_body, with_store, ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ExportRequest {
    pub comments: Option<Vec<CommentRecord>>,
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ExportResponse {
    pub success: bool,
    pub filepath: String,
}

/// Write the posted records verbatim as CSV (the default) or, for any
/// other `format` value, as JSON. CSV columns come from the records' keys.
pub(super) async fn export(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Json<ExportResponse>, ApiError> {
    let body = parse_body(&req_id.0, payload)?;
    let comments = body
        .comments
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "bad_request", "Comments are required"))?;
    let as_csv = body.format.as_deref().unwrap_or("csv") == "csv";

    let path = with_store(&state, &req_id.0, move |store| {
        if as_csv {
            store.save_comments_csv(&comments, None)
        } else {
            store.save_comments_json(&comments, None)
        }
    })
    .await?;

    Ok(Json(ExportResponse {
        success: true,
        filepath: path.display().to_string(),
    }))
}

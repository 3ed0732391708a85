use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use repwatch_pipeline::{PlatformContent, PlatformFailure};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_pipeline_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ListeningRequest {
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ListeningData {
    pub keyword: String,
    pub results: Vec<PlatformContent>,
    pub errors: Vec<PlatformFailure>,
    pub timestamp: DateTime<Utc>,
}

pub(super) async fn social_listening(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ListeningRequest>,
) -> Result<Json<ApiResponse<ListeningData>>, ApiError> {
    let keyword = body
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            ApiError::new(req_id.0.clone(), "validation_error", "keyword is required")
        })?;

    let report = state
        .pipeline
        .listen(keyword)
        .await
        .map_err(|e| map_pipeline_error(req_id.0.clone(), &e))?;

    let keyword = report.keyword.clone();
    let timestamp = report.timestamp;
    let (results, errors) = report.into_parts();

    Ok(Json(ApiResponse {
        data: ListeningData {
            keyword,
            results,
            errors,
            timestamp,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

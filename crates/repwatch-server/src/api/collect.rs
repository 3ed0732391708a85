use axum::{extract::State, Extension, Json};
use repwatch_core::normalize_keywords;
use repwatch_pipeline::CollectionResult;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

const MAX_KEYWORDS_PER_REQUEST: usize = 50;

#[derive(Debug, Deserialize)]
pub(super) struct CollectRequest {
    /// Keywords to collect; empty or absent means the tracked keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
}

pub(super) async fn collect_keywords(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CollectRequest>,
) -> Result<Json<ApiResponse<Vec<CollectionResult>>>, ApiError> {
    let keywords = if body.keywords.is_empty() {
        state.tracked_keywords.as_ref().clone()
    } else {
        normalize_keywords(&body.keywords)
    };

    if keywords.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "no keywords given and no tracked keywords configured",
        ));
    }
    if keywords.len() > MAX_KEYWORDS_PER_REQUEST {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            format!("at most {MAX_KEYWORDS_PER_REQUEST} keywords per request"),
        ));
    }

    let results = state.pipeline.collect_keywords(&keywords).await;

    Ok(Json(ApiResponse {
        data: results,
        meta: ResponseMeta::new(req_id.0),
    }))
}

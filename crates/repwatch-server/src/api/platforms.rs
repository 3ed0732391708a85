use axum::{extract::State, Extension, Json};
use repwatch_social::Platform;

use crate::middleware::RequestId;

use super::{map_pipeline_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Platforms a listening run would search.
pub(super) async fn list_platforms(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<Platform>>>, ApiError> {
    let platforms = state
        .pipeline
        .eligible_platforms()
        .await
        .map_err(|e| map_pipeline_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: platforms,
        meta: ResponseMeta::new(req_id.0),
    }))
}

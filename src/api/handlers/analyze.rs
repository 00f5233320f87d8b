use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::warn;

use crate::api::{state::AppState, types::*};

/// POST /api/analyze
pub async fn analyze_match(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<AnalyzeResponse> {
    let Json(body) = body.map_err(invalid_body)?;
    let request = body.into_match_request().map_err(error_response)?;

    let outcome = state.pipeline.analyze(&request).await.map_err(|e| {
        if !e.is_client_error() {
            warn!(error = %e, "Analysis failed");
        }
        error_response(e)
    })?;

    Ok(Json(outcome.into()))
}

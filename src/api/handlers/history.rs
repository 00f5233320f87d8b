use axum::{extract::State, Json};
use tracing::error;

use crate::api::{state::AppState, types::*};
use crate::persistence::HISTORY_LIMIT;

/// GET /api/history
pub async fn get_history(State(state): State<AppState>) -> ApiResult<HistoryResponse> {
    let records = state.history.recent(HISTORY_LIMIT).await.map_err(|e| {
        error!(error = %e, "Failed to read analysis history");
        internal_error("Database error", e)
    })?;

    Ok(Json(records))
}

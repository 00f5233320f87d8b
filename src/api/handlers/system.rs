use axum::{extract::State, Json};
use chrono::Utc;

use crate::api::{state::AppState, types::HealthResponse};

/// GET /api/health -- liveness probe
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now(),
        uptime_secs: state.uptime_seconds(),
    })
}

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    AggregatedDataset, AnalysisOptions, AnalysisResult, FixtureSummary, HistoryRecord, LeagueId,
    MatchRequest,
};
use crate::error::KickoffError;
use crate::pipeline::AnalysisOutcome;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);
pub type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

pub fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
            details: None,
        }),
    )
}

pub fn internal_error(message: impl Into<String>, details: impl ToString) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.into(),
            details: Some(details.to_string()),
        }),
    )
}

/// A body axum could not read as JSON of the expected shape
pub fn invalid_body(rejection: JsonRejection) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Invalid request body".to_string(),
            details: Some(rejection.body_text()),
        }),
    )
}

/// Map a pipeline error onto the HTTP surface
pub fn error_response(err: KickoffError) -> ApiError {
    match err {
        KickoffError::TeamNotFound { .. } => bad_request("Could not find team IDs"),
        KickoffError::Validation(message) => bad_request(message),
        other => internal_error("Internal server error", other),
    }
}

// ============================================================================
// Analysis Types
// ============================================================================

/// Body of `POST /api/analyze`. Fields are optional here so that missing
/// ones produce a 400 instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub league: Option<LeagueId>,
    pub date: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    /// `null` and absent both mean "all flags off"
    #[serde(default)]
    pub options: Option<AnalysisOptions>,
}

impl AnalyzeRequest {
    pub fn into_match_request(self) -> Result<MatchRequest, KickoffError> {
        let missing = || KickoffError::Validation("Missing required fields".to_string());
        let request = MatchRequest {
            league: self.league.ok_or_else(missing)?,
            date: self.date.ok_or_else(missing)?,
            home_team: self.home_team.ok_or_else(missing)?,
            away_team: self.away_team.ok_or_else(missing)?,
            options: self.options.unwrap_or_default(),
        };
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: AnalysisResult,
    pub raw_data: AggregatedDataset,
}

impl From<AnalysisOutcome> for AnalyzeResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        Self {
            success: true,
            analysis: outcome.analysis,
            raw_data: outcome.raw_data,
        }
    }
}

// ============================================================================
// History Types
// ============================================================================

pub type HistoryResponse = Vec<HistoryRecord>;

// ============================================================================
// Fixture Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub league: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub team1: Option<String>,
    pub team2: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthMatchesResponse {
    pub success: bool,
    pub league: LeagueId,
    pub year: i32,
    pub month: u32,
    pub date_range: DateRange,
    pub matches_found: usize,
    pub matches: Vec<FixtureSummary>,
}

// ============================================================================
// System Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_secs: i64,
}

/// Lookup responses are assembled dynamically: `{success, <key>: [...], paging?}`
pub type LookupResponse = serde_json::Map<String, Value>;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::analysis::AnalysisResult;
use crate::domain::request::MatchRequest;
use crate::error::Result;

/// Persisted analysis as returned by the history listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: i64,
    pub league: String,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub analysis: Value,
    pub created_at: DateTime<Utc>,
}

/// Row to append; the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryRecord {
    /// League exactly as the caller supplied it
    pub league: String,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    /// Serialized `AnalysisResult`
    pub analysis: String,
}

impl NewHistoryRecord {
    pub fn new(request: &MatchRequest, analysis: &AnalysisResult) -> Result<Self> {
        Ok(Self {
            league: request.league.to_string(),
            date: request.date.clone(),
            home_team: request.home_team.clone(),
            away_team: request.away_team.clone(),
            analysis: serde_json::to_string(analysis)?,
        })
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::league::LeagueId;
use crate::error::{KickoffError, Result};

/// Recognized analysis flags. Every flag defaults to `false` when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOptions {
    /// Fetch league-wide injuries and ask the model to cover absences
    #[serde(default)]
    pub include_injuries: bool,
    /// Leave bookmaker odds out even when an odds key is configured
    #[serde(default)]
    pub skip_odds: bool,
}

/// One match to analyze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub league: LeagueId,
    /// Calendar date of the match as supplied by the caller
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub options: AnalysisOptions,
}

impl MatchRequest {
    pub fn new(
        league: impl Into<LeagueId>,
        date: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
    ) -> Self {
        Self {
            league: league.into(),
            date: date.into(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            options: AnalysisOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    /// Reject requests with blank required fields
    pub fn validate(&self) -> Result<()> {
        let blank = self.league.is_blank()
            || self.date.trim().is_empty()
            || self.home_team.trim().is_empty()
            || self.away_team.trim().is_empty();

        if blank {
            return Err(KickoffError::Validation("Missing required fields".to_string()));
        }
        Ok(())
    }
}

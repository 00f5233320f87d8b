//! Aggregation-and-analysis pipeline
//!
//! One call to [`Pipeline::analyze`] resolves both teams, fans out to every
//! data source, asks the model for an analysis and records the result:
//!
//! 1. validate the request and resolve the league reference
//! 2. resolve home and away team ids (the only step that can abort)
//! 3. fetch fixtures, statistics, injuries and odds concurrently
//! 4. build the prompt and request the analysis
//! 5. append to history (best effort)

pub mod aggregate;
pub mod analyst;
pub mod prompt;
pub mod resolve;

pub use aggregate::{aggregate, FetchPlan};
pub use analyst::request_analysis;
pub use prompt::build_prompt;
pub use resolve::{resolve_team, TeamIdentity};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::domain::{AggregatedDataset, AnalysisResult, MatchRequest, NewHistoryRecord};
use crate::error::{KickoffError, Result};
use crate::persistence::HistoryStore;
use crate::providers::{CompletionModel, FootballData, OddsFeed};

/// Knobs that shape the upstream queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub season: i32,
    pub fixtures_last: u32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            season: 2023,
            fixtures_last: 10,
        }
    }
}

/// Analysis plus the data it was based on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub analysis: AnalysisResult,
    pub raw_data: AggregatedDataset,
}

/// The analysis pipeline with its injected collaborators
pub struct Pipeline {
    football: Arc<dyn FootballData>,
    odds: Option<Arc<dyn OddsFeed>>,
    model: Arc<dyn CompletionModel>,
    history: Arc<dyn HistoryStore>,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(
        football: Arc<dyn FootballData>,
        odds: Option<Arc<dyn OddsFeed>>,
        model: Arc<dyn CompletionModel>,
        history: Arc<dyn HistoryStore>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            football,
            odds,
            model,
            history,
            settings,
        }
    }

    pub fn odds_enabled(&self) -> bool {
        self.odds.is_some()
    }

    /// Run the full pipeline for one match
    #[instrument(
        skip(self, request),
        fields(
            request_id = %Uuid::new_v4(),
            home = %request.home_team,
            away = %request.away_team,
        )
    )]
    pub async fn analyze(&self, request: &MatchRequest) -> Result<AnalysisOutcome> {
        request.validate()?;
        let league = request.league.resolve();

        let (home, away) = tokio::join!(
            resolve_team(self.football.as_ref(), &request.home_team, &league),
            resolve_team(self.football.as_ref(), &request.away_team, &league),
        );
        let (home, away) = match (home, away) {
            (Some(home), Some(away)) => (home, away),
            _ => {
                return Err(KickoffError::TeamNotFound {
                    home: request.home_team.clone(),
                    away: request.away_team.clone(),
                })
            }
        };
        info!(home_id = home.id, away_id = away.id, %league, "Teams resolved");

        let plan = FetchPlan {
            home,
            away,
            league,
            season: self.settings.season,
            fixtures_last: self.settings.fixtures_last,
            include_injuries: request.options.include_injuries,
        };
        let odds = if request.options.skip_odds {
            None
        } else {
            self.odds.as_deref()
        };
        let dataset = aggregate(self.football.as_ref(), odds, &plan).await;

        let prompt = build_prompt(request, &dataset);
        let analysis = request_analysis(self.model.as_ref(), &prompt).await?;

        self.record(request, &analysis).await;

        info!(
            recommendation = %analysis.recommendation,
            confidence = analysis.confidence,
            "Analysis complete"
        );

        Ok(AnalysisOutcome {
            analysis,
            raw_data: dataset,
        })
    }

    async fn record(&self, request: &MatchRequest, analysis: &AnalysisResult) {
        let appended = match NewHistoryRecord::new(request, analysis) {
            Ok(record) => self.history.append(&record).await,
            Err(e) => Err(e),
        };
        if let Err(e) = appended {
            error!(error = %e, "Failed to save analysis to history");
        }
    }
}

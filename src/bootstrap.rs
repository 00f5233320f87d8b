//! Service wiring
//!
//! Builds every client and the history store from configuration and hands
//! them to the pipeline as trait objects.

use std::sync::Arc;
use tracing::{info, warn};

use crate::api::AppState;
use crate::config::AppConfig;
use crate::error::Result;
use crate::persistence::{HistoryStore, SqliteHistoryStore};
use crate::pipeline::{Pipeline, PipelineSettings};
use crate::providers::{
    ApiFootballClient, ChatCompletionClient, CompletionModel, FootballData, OddsFeed,
    TheOddsApiClient,
};

/// Fully wired services
pub struct Services {
    pub pipeline: Arc<Pipeline>,
    pub history: Arc<dyn HistoryStore>,
    pub football: Arc<dyn FootballData>,
}

impl Services {
    pub fn app_state(&self) -> AppState {
        AppState::new(
            self.pipeline.clone(),
            self.history.clone(),
            self.football.clone(),
        )
    }
}

/// Connect the store, run migrations and build the pipeline
pub async fn build_services(config: &AppConfig) -> Result<Services> {
    let store = SqliteHistoryStore::connect(&config.database.url, config.database.max_connections)
        .await?;
    store.migrate().await?;
    let history: Arc<dyn HistoryStore> = Arc::new(store);

    let football: Arc<dyn FootballData> = Arc::new(ApiFootballClient::new(&config.football)?);
    let model: Arc<dyn CompletionModel> = Arc::new(ChatCompletionClient::new(config.llm.clone())?);

    let odds: Option<Arc<dyn OddsFeed>> = if config.odds.is_configured() {
        info!(sport = %config.odds.sport, "Odds enrichment enabled");
        Some(Arc::new(TheOddsApiClient::new(&config.odds)?) as Arc<dyn OddsFeed>)
    } else {
        warn!("ODDS_API_KEY not set, analyses will run without bookmaker odds");
        None
    };

    let settings = PipelineSettings {
        season: config.football.season,
        fixtures_last: config.football.fixtures_last,
    };
    let pipeline = Arc::new(Pipeline::new(
        football.clone(),
        odds,
        model,
        history.clone(),
        settings,
    ));

    Ok(Services {
        pipeline,
        history,
        football,
    })
}

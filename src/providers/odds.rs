//! The Odds API client (`/v4/sports/{sport}/odds`)

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::OddsConfig;
use crate::error::{KickoffError, Result};

/// Source of bookmaker odds
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OddsFeed: Send + Sync {
    /// Current head-to-head odds for the configured sport, one provider
    /// event object per entry
    async fn h2h_odds(&self) -> Result<Vec<Value>>;
}

pub struct TheOddsApiClient {
    http: Client,
    config: OddsConfig,
    api_key: String,
}

impl TheOddsApiClient {
    /// Fails when no API key is configured
    pub fn new(config: &OddsConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| KickoffError::Internal("ODDS_API_KEY not configured".into()))?
            .to_string();

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KickoffError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config: config.clone(),
            api_key,
        })
    }

    fn odds_url(&self) -> String {
        format!(
            "{}/sports/{}/odds",
            self.config.base_url.trim_end_matches('/'),
            self.config.sport
        )
    }
}

#[async_trait]
impl OddsFeed for TheOddsApiClient {
    #[instrument(skip(self), fields(sport = %self.config.sport))]
    async fn h2h_odds(&self) -> Result<Vec<Value>> {
        let url = self.odds_url();
        debug!("Fetching odds from: {}", url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("regions", self.config.regions.as_str()),
                ("markets", self.config.markets.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Odds API error: {} - {}", status, body);
            return Err(KickoffError::Upstream {
                service: "The Odds API",
                status: status.as_u16(),
                body,
            });
        }

        let events: Vec<Value> = response.json().await?;
        info!("Fetched odds for {} events", events.len());
        Ok(events)
    }
}

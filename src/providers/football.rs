//! API-Football client
//!
//! All calls go to `{base_url}/{endpoint}` with the RapidAPI-style headers
//! `x-rapidapi-host` and `x-rapidapi-key`. Responses share one envelope:
//! `{get, parameters, errors, results, paging, response}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::FootballConfig;
use crate::domain::LeagueId;
use crate::error::{KickoffError, Result};

const SERVICE: &str = "API-Football";

/// Team returned by `/teams?search=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub team: TeamInfo,
}

/// Generic API-Football response envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub response: Value,
    #[serde(default)]
    pub paging: Option<Value>,
    #[serde(default)]
    pub errors: Value,
}

impl ApiEnvelope {
    /// API-Football reports some failures with HTTP 200 and a non-empty
    /// `errors` field (an object or an array).
    pub fn error_message(&self) -> Option<String> {
        let reported = match &self.errors {
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => false,
        };
        reported.then(|| self.errors.to_string())
    }

    /// The `response` payload as a list; anything else becomes empty
    pub fn into_list(self) -> Vec<Value> {
        match self.response {
            Value::Array(items) => items,
            _ => Vec::new(),
        }
    }
}

/// Sports-data operations used by the pipeline and the lookup routes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FootballData: Send + Sync {
    /// Teams whose name matches `name` within a league
    async fn search_team(&self, name: &str, league: &LeagueId) -> Result<Vec<TeamEntry>>;

    /// Most recent `last` fixtures of a team in a season
    async fn fixtures(&self, team_id: i64, last: u32, season: i32) -> Result<Vec<Value>>;

    /// Season statistics object for a team in a league
    async fn team_statistics(&self, team_id: i64, league: &LeagueId, season: i32) -> Result<Value>;

    /// League-wide injury list for a season
    async fn injuries(&self, league: &LeagueId, season: i32) -> Result<Vec<Value>>;

    /// Raw pass-through query against any endpoint
    async fn lookup(&self, endpoint: &str, params: &[(String, String)]) -> Result<ApiEnvelope>;
}

/// HTTP client for `v3.football.api-sports.io`
pub struct ApiFootballClient {
    http: Client,
    base_url: String,
    host: String,
    api_key: String,
}

impl ApiFootballClient {
    pub fn new(config: &FootballConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KickoffError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let host = host_of(&base_url);

        Ok(Self {
            http,
            base_url,
            host,
            api_key: config.api_key.clone(),
        })
    }

    async fn get(&self, endpoint: &str, params: &[(String, String)]) -> Result<ApiEnvelope> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        debug!(url = %url, ?params, "API-Football request");

        let response = self
            .http
            .get(&url)
            .header("x-rapidapi-host", &self.host)
            .header("x-rapidapi-key", &self.api_key)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(endpoint, status = status.as_u16(), "API-Football error: {}", body);
            return Err(KickoffError::Upstream {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ApiEnvelope = response.json().await?;
        if let Some(message) = envelope.error_message() {
            warn!(endpoint, "API-Football reported errors: {}", message);
            return Err(KickoffError::Upstream {
                service: SERVICE,
                status: status.as_u16(),
                body: message,
            });
        }

        Ok(envelope)
    }
}

fn host_of(base_url: &str) -> String {
    let without_scheme = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_string()
}

fn param(key: &str, value: impl ToString) -> (String, String) {
    (key.to_string(), value.to_string())
}

#[async_trait]
impl FootballData for ApiFootballClient {
    #[instrument(skip(self))]
    async fn search_team(&self, name: &str, league: &LeagueId) -> Result<Vec<TeamEntry>> {
        let envelope = self
            .get("teams", &[param("league", league), param("search", name)])
            .await?;

        Ok(envelope
            .into_list()
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }

    #[instrument(skip(self))]
    async fn fixtures(&self, team_id: i64, last: u32, season: i32) -> Result<Vec<Value>> {
        let envelope = self
            .get(
                "fixtures",
                &[
                    param("team", team_id),
                    param("last", last),
                    param("season", season),
                ],
            )
            .await?;
        Ok(envelope.into_list())
    }

    #[instrument(skip(self))]
    async fn team_statistics(&self, team_id: i64, league: &LeagueId, season: i32) -> Result<Value> {
        let envelope = self
            .get(
                "teams/statistics",
                &[
                    param("team", team_id),
                    param("league", league),
                    param("season", season),
                ],
            )
            .await?;
        Ok(envelope.response)
    }

    #[instrument(skip(self))]
    async fn injuries(&self, league: &LeagueId, season: i32) -> Result<Vec<Value>> {
        let envelope = self
            .get("injuries", &[param("league", league), param("season", season)])
            .await?;
        Ok(envelope.into_list())
    }

    #[instrument(skip(self, params))]
    async fn lookup(&self, endpoint: &str, params: &[(String, String)]) -> Result<ApiEnvelope> {
        self.get(endpoint, params).await
    }
}

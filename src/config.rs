use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::error::KickoffError;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub football: FootballConfig,
    #[serde(default)]
    pub odds: OddsConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_url() -> String {
    sqlite_url("./football_analysis.db")
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Build a create-if-missing SQLite URL from a filesystem path
pub fn sqlite_url(path: &str) -> String {
    format!("sqlite://{}?mode=rwc", path)
}

/// API-Football settings
#[derive(Debug, Clone, Deserialize)]
pub struct FootballConfig {
    #[serde(default = "default_football_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Season used for fixtures, statistics and injuries
    #[serde(default = "default_season")]
    pub season: i32,
    /// How many past fixtures to request per team
    #[serde(default = "default_fixtures_last")]
    pub fixtures_last: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_football_url() -> String {
    "https://v3.football.api-sports.io".to_string()
}

fn default_season() -> i32 {
    2023
}

fn default_fixtures_last() -> u32 {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for FootballConfig {
    fn default() -> Self {
        Self {
            base_url: default_football_url(),
            api_key: String::new(),
            season: default_season(),
            fixtures_last: default_fixtures_last(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// The Odds API settings. Odds enrichment is disabled when no key is set.
#[derive(Debug, Clone, Deserialize)]
pub struct OddsConfig {
    #[serde(default = "default_odds_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_odds_sport")]
    pub sport: String,
    #[serde(default = "default_odds_regions")]
    pub regions: String,
    #[serde(default = "default_odds_markets")]
    pub markets: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_odds_url() -> String {
    "https://api.the-odds-api.com/v4".to_string()
}

fn default_odds_sport() -> String {
    "soccer_epl".to_string()
}

fn default_odds_regions() -> String {
    "eu".to_string()
}

fn default_odds_markets() -> String {
    "h2h".to_string()
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            base_url: default_odds_url(),
            api_key: None,
            sport: default_odds_sport(),
            regions: default_odds_regions(),
            markets: default_odds_markets(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OddsConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Chat-completion model settings
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
    /// Ask the endpoint for a JSON object response (`response_format`)
    #[serde(default)]
    pub json_mode: bool,
}

fn default_llm_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_llm_timeout_secs() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_url(),
            api_key: String::new(),
            model: default_llm_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_llm_timeout_secs(),
            json_mode: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Load configuration from a config directory and the environment
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, KickoffError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("KICKOFF_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (KICKOFF__LLM__MODEL, etc.)
            .add_source(
                Environment::with_prefix("KICKOFF")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            // Conventional provider variables win over everything else
            .set_override_option("football.api_key", non_empty_env("API_FOOTBALL_KEY"))?
            .set_override_option("odds.api_key", non_empty_env("ODDS_API_KEY"))?
            .set_override_option("llm.api_key", non_empty_env("OPENAI_API_KEY"))?
            .set_override_option(
                "server.port",
                non_empty_env("PORT").and_then(|p| p.parse::<i64>().ok()),
            )?
            .set_override_option(
                "database.url",
                non_empty_env("DB_PATH").map(|p| sqlite_url(&p)),
            )?;

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.football.api_key.trim().is_empty() {
            errors.push("football.api_key is not set (API_FOOTBALL_KEY)".to_string());
        }

        if self.llm.api_key.trim().is_empty() {
            errors.push("llm.api_key is not set (OPENAI_API_KEY)".to_string());
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            errors.push(format!(
                "llm.temperature must be between 0 and 2, got {}",
                self.llm.temperature
            ));
        }

        if self.llm.max_tokens == 0 {
            errors.push("llm.max_tokens must be positive".to_string());
        }

        if self.football.fixtures_last == 0 {
            errors.push("football.fixtures_last must be positive".to_string());
        }

        if self.database.url.trim().is_empty() {
            errors.push("database.url must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.football.season, 2023);
        assert_eq!(config.football.fixtures_last, 10);
        assert_eq!(config.odds.sport, "soccer_epl");
        assert_eq!(config.odds.regions, "eu");
        assert_eq!(config.odds.markets, "h2h");
        assert_eq!(config.llm.model, "gpt-4o");
        assert!((config.llm.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.llm.max_tokens, 2000);
        assert_eq!(config.database.url, "sqlite://./football_analysis.db?mode=rwc");
    }

    #[test]
    fn test_odds_configured_only_with_non_blank_key() {
        let mut odds = OddsConfig::default();
        assert!(!odds.is_configured());
        odds.api_key = Some("   ".to_string());
        assert!(!odds.is_configured());
        odds.api_key = Some("abc".to_string());
        assert!(odds.is_configured());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = AppConfig::default();
        config.llm.temperature = 3.5;
        config.llm.max_tokens = 0;

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("API_FOOTBALL_KEY")));
        assert!(errors.iter().any(|e| e.contains("OPENAI_API_KEY")));
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        let mut config = AppConfig::default();
        config.football.api_key = "football".to_string();
        config.llm.api_key = "llm".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_missing_directory_uses_defaults() {
        let config = AppConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.football.base_url, "https://v3.football.api-sports.io");
        assert_eq!(config.odds.base_url, "https://api.the-odds-api.com/v4");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = std::env::temp_dir().join(format!("kickoff-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("default.toml"), "[server]\nport = \"not a port\"\n").unwrap();

        let err = AppConfig::load_from(&dir).unwrap_err();
        assert!(matches!(err, KickoffError::Config(_)));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

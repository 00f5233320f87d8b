use thiserror::Error;

/// Main error type for the analysis relay
#[derive(Error, Debug)]
pub enum KickoffError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} API error {status}: {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Request errors
    #[error("Could not find team IDs (home: {home}, away: {away})")]
    TeamNotFound { home: String, away: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl KickoffError {
    /// Whether the error was caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            KickoffError::TeamNotFound { .. } | KickoffError::Validation(_)
        )
    }
}

/// Result type alias for KickoffError
pub type Result<T> = std::result::Result<T, KickoffError>;

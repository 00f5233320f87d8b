use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::persistence::HistoryStore;
use crate::pipeline::Pipeline;
use crate::providers::FootballData;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Analysis pipeline
    pub pipeline: Arc<Pipeline>,

    /// History store (also held by the pipeline)
    pub history: Arc<dyn HistoryStore>,

    /// API-Football client for the lookup routes
    pub football: Arc<dyn FootballData>,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        pipeline: Arc<Pipeline>,
        history: Arc<dyn HistoryStore>,
        football: Arc<dyn FootballData>,
    ) -> Self {
        Self {
            pipeline,
            history,
            football,
            start_time: Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.start_time).num_seconds()
    }
}

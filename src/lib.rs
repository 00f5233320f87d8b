pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod pipeline;
pub mod providers;

pub use config::AppConfig;
pub use domain::{AnalysisResult, LeagueId, MatchRequest};
pub use error::{KickoffError, Result};
pub use pipeline::Pipeline;

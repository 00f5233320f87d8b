//! Upstream service clients, each behind an injectable trait

pub mod football;
pub mod llm;
pub mod odds;

pub use football::{ApiEnvelope, ApiFootballClient, FootballData, TeamEntry, TeamInfo};
pub use llm::{ChatCompletionClient, CompletionModel};
pub use odds::{OddsFeed, TheOddsApiClient};

#[cfg(test)]
pub use football::MockFootballData;
#[cfg(test)]
pub use llm::MockCompletionModel;
#[cfg(test)]
pub use odds::MockOddsFeed;

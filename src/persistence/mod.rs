//! Persistence layer
//!
//! Analyses are written to an append-only SQLite table and read back
//! newest-first for the history listing.

pub mod history;

pub use history::{HistoryStore, SqliteHistoryStore, HISTORY_LIMIT};

#[cfg(test)]
pub use history::MockHistoryStore;

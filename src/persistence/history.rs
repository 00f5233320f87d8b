use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{debug, info, instrument};

use crate::domain::{HistoryRecord, NewHistoryRecord};
use crate::error::Result;

/// Upper bound on records returned by a history read
pub const HISTORY_LIMIT: u32 = 50;

/// Append-only analysis history
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append a record, returning its id
    async fn append(&self, record: &NewHistoryRecord) -> Result<i64>;

    /// Most recent records first, at most `min(limit, HISTORY_LIMIT)`
    async fn recent(&self, limit: u32) -> Result<Vec<HistoryRecord>>;
}

/// SQLite-backed history store
#[derive(Clone)]
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    /// Connect to a SQLite database URL
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("Connected to SQLite");
        Ok(Self { pool })
    }

    /// Private in-memory database, kept alive by a single pinned connection
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self { pool })
    }

    /// Run migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

}

fn parse_analysis(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    #[instrument(skip(self, record), fields(home = %record.home_team, away = %record.away_team))]
    async fn append(&self, record: &NewHistoryRecord) -> Result<i64> {
        let created_at: DateTime<Utc> = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO analysis_history (league, date, home_team, away_team, analysis, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.league)
        .bind(&record.date)
        .bind(&record.home_team)
        .bind(&record.away_team)
        .bind(&record.analysis)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Analysis recorded");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn recent(&self, limit: u32) -> Result<Vec<HistoryRecord>> {
        let limit = limit.min(HISTORY_LIMIT) as i64;
        let rows = sqlx::query(
            r#"
            SELECT id, league, date, home_team, away_team, analysis, created_at
            FROM analysis_history
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| -> Result<HistoryRecord> {
                Ok(HistoryRecord {
                    id: row.try_get("id")?,
                    league: row.try_get("league")?,
                    date: row.try_get("date")?,
                    home_team: row.try_get("home_team")?,
                    away_team: row.try_get("away_team")?,
                    analysis: parse_analysis(row.try_get("analysis")?),
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisResult, MatchRequest};

    async fn store() -> SqliteHistoryStore {
        let store = SqliteHistoryStore::in_memory().await.unwrap();
        store.migrate().await.unwrap();
        store
    }

    fn record(home: &str) -> NewHistoryRecord {
        let request = MatchRequest::new("premier_league", "2024-03-10", home, "Chelsea");
        NewHistoryRecord::new(&request, &AnalysisResult::fallback("raw")).unwrap()
    }

    #[tokio::test]
    async fn test_append_and_read_back() {
        let store = store().await;
        let id = store.append(&record("Arsenal")).await.unwrap();

        let records = store.recent(HISTORY_LIMIT).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].league, "premier_league");
        assert_eq!(records[0].home_team, "Arsenal");
        assert_eq!(records[0].analysis["recommendation"], "no data");
    }

    #[tokio::test]
    async fn test_recent_is_capped_and_newest_first() {
        let store = store().await;
        for i in 0..55 {
            store.append(&record(&format!("Team {}", i))).await.unwrap();
        }

        let records = store.recent(1_000).await.unwrap();
        assert_eq!(records.len(), 50);
        assert_eq!(records[0].home_team, "Team 54");
        assert_eq!(records[49].home_team, "Team 5");
        assert!(records.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        assert_eq!(store.recent(3).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_history() {
        let store = store().await;
        assert!(store.recent(HISTORY_LIMIT).await.unwrap().is_empty());
    }

    #[test]
    fn test_non_json_analysis_is_kept_as_text() {
        assert_eq!(parse_analysis("oops".into()), Value::String("oops".into()));
    }
}

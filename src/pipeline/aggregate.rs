//! Per-source isolated fetch stage
//!
//! Each source is fetched independently. A failing source is logged with its
//! field name and scope and replaced by its empty sentinel, so one bad
//! upstream never sinks the whole request.

use serde_json::Value;
use std::future::Future;
use tracing::{debug, warn};

use crate::domain::{AggregatedDataset, LeagueId};
use crate::error::Result;
use crate::pipeline::resolve::TeamIdentity;
use crate::providers::{FootballData, OddsFeed};

/// What to fetch for one match
#[derive(Debug, Clone)]
pub struct FetchPlan {
    pub home: TeamIdentity,
    pub away: TeamIdentity,
    pub league: LeagueId,
    pub season: i32,
    pub fixtures_last: u32,
    pub include_injuries: bool,
}

/// Await a fetch, turning failure into `None` after logging it
async fn isolated<T, F>(field: &'static str, scope: &str, fetch: F) -> Option<T>
where
    F: Future<Output = Result<T>>,
{
    match fetch.await {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(field, scope, error = %e, "Source fetch failed, continuing without it");
            None
        }
    }
}

/// Run every fetch concurrently and assemble the dataset.
///
/// Odds are fetched only when a feed is supplied; injuries only when the
/// plan asks for them.
pub async fn aggregate(
    football: &dyn FootballData,
    odds: Option<&dyn OddsFeed>,
    plan: &FetchPlan,
) -> AggregatedDataset {
    let league_scope = plan.league.to_string();

    let injuries_fetch = async {
        if plan.include_injuries {
            Some(
                isolated(
                    "injuries",
                    &league_scope,
                    football.injuries(&plan.league, plan.season),
                )
                .await
                .unwrap_or_default(),
            )
        } else {
            None
        }
    };

    let odds_fetch = async {
        match odds {
            Some(feed) => Some(
                isolated("odds", &league_scope, feed.h2h_odds())
                    .await
                    .unwrap_or_default(),
            ),
            None => None,
        }
    };

    let (home_fixtures, away_fixtures, home_stats, away_stats, injuries, odds) = tokio::join!(
        isolated(
            "homeTeamFixtures",
            &plan.home.name,
            football.fixtures(plan.home.id, plan.fixtures_last, plan.season),
        ),
        isolated(
            "awayTeamFixtures",
            &plan.away.name,
            football.fixtures(plan.away.id, plan.fixtures_last, plan.season),
        ),
        isolated(
            "homeTeamStats",
            &plan.home.name,
            football.team_statistics(plan.home.id, &plan.league, plan.season),
        ),
        isolated(
            "awayTeamStats",
            &plan.away.name,
            football.team_statistics(plan.away.id, &plan.league, plan.season),
        ),
        injuries_fetch,
        odds_fetch,
    );

    let dataset = AggregatedDataset {
        home_team_fixtures: home_fixtures.unwrap_or_default(),
        away_team_fixtures: away_fixtures.unwrap_or_default(),
        home_team_stats: home_stats.filter(has_content),
        away_team_stats: away_stats.filter(has_content),
        injuries,
        odds,
    };

    debug!(
        home_fixtures = dataset.home_team_fixtures.len(),
        away_fixtures = dataset.away_team_fixtures.len(),
        home_stats = dataset.home_team_stats.is_some(),
        away_stats = dataset.away_team_stats.is_some(),
        "Dataset aggregated"
    );

    dataset
}

/// Statistics for an unknown team/season come back as `[]` or `{}`
fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

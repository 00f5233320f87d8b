use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{debug, warn};

use crate::api::{state::AppState, types::*};
use crate::domain::{month_range, FixtureItem, LeagueId};

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// GET /api/matches-by-month
pub async fn matches_by_month(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<MonthMatchesResponse> {
    let (Some(league), Some(year), Some(month)) = (
        non_blank(&query.league),
        non_blank(&query.year),
        non_blank(&query.month),
    ) else {
        return Err(bad_request("Missing required fields: league, year, month"));
    };

    let parsed = year.parse::<i32>().ok().zip(month.parse::<u32>().ok());
    let Some((year, month, (start, end))) =
        parsed.and_then(|(y, m)| month_range(y, m).map(|range| (y, m, range)))
    else {
        return Err(bad_request("Invalid year or month"));
    };

    let league = LeagueId::from(league).resolve();
    let start_date = start.format("%Y-%m-%d").to_string();
    let end_date = end.format("%Y-%m-%d").to_string();
    debug!(%league, %start_date, %end_date, "Searching matches");

    let params = vec![
        ("league".to_string(), league.to_string()),
        ("season".to_string(), year.to_string()),
        ("from".to_string(), start_date.clone()),
        ("to".to_string(), end_date.clone()),
    ];
    let envelope = state.football.lookup("fixtures", &params).await.map_err(|e| {
        warn!(error = %e, "Matches by month lookup failed");
        internal_error("Failed to fetch matches", e)
    })?;

    let team1 = non_blank(&query.team1);
    let team2 = non_blank(&query.team2);
    let matches: Vec<_> = envelope
        .into_list()
        .into_iter()
        .filter_map(|item| serde_json::from_value::<FixtureItem>(item).ok())
        .filter(|fixture| fixture.matches_teams(team1, team2))
        .map(|fixture| fixture.summary())
        .collect();

    Ok(Json(MonthMatchesResponse {
        success: true,
        league,
        year,
        month,
        date_range: DateRange {
            start_date,
            end_date,
        },
        matches_found: matches.len(),
        matches,
    }))
}

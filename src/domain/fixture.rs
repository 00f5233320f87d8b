//! Fixture listings for the month browser.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Subset of an API-Football `/fixtures` response item
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureItem {
    pub fixture: FixtureInfo,
    pub teams: FixtureTeams,
    #[serde(default)]
    pub goals: FixtureGoals,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureInfo {
    pub id: i64,
    pub date: String,
    pub status: FixtureStatus,
    #[serde(default)]
    pub venue: Option<FixtureVenue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureStatus {
    pub short: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureVenue {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureTeams {
    pub home: FixtureSide,
    pub away: FixtureSide,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureSide {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureGoals {
    pub home: Option<i32>,
    pub away: Option<i32>,
}

impl FixtureItem {
    /// Case-insensitive substring match on team names.
    ///
    /// With both names the pairing must match in either orientation; with one
    /// name either side may match. No filter matches everything.
    pub fn matches_teams(&self, team1: Option<&str>, team2: Option<&str>) -> bool {
        let home = self.teams.home.name.to_lowercase();
        let away = self.teams.away.name.to_lowercase();

        match (team1, team2) {
            (Some(a), Some(b)) => {
                let (a, b) = (a.to_lowercase(), b.to_lowercase());
                (home.contains(&a) && away.contains(&b)) || (home.contains(&b) && away.contains(&a))
            }
            (Some(one), None) | (None, Some(one)) => {
                let one = one.to_lowercase();
                home.contains(&one) || away.contains(&one)
            }
            (None, None) => true,
        }
    }

    pub fn summary(&self) -> FixtureSummary {
        FixtureSummary {
            id: self.fixture.id,
            date: self.fixture.date.clone(),
            status: self.fixture.status.short.clone(),
            home_team: self.teams.home.name.clone(),
            away_team: self.teams.away.name.clone(),
            home_score: self.goals.home,
            away_score: self.goals.away,
            venue: self.fixture.venue.as_ref().and_then(|v| v.name.clone()),
        }
    }
}

/// Compact fixture row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSummary {
    pub id: i64,
    pub date: String,
    pub status: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub venue: Option<String>,
}

/// First and last day of a calendar month
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let end = next.pred_opt()?;
    debug_assert_eq!(end.month(), month);
    Some((start, end))
}

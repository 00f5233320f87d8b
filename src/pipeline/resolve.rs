//! Team identity resolution

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::LeagueId;
use crate::providers::FootballData;

/// Provider identity of a team, resolved per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamIdentity {
    pub id: i64,
    pub name: String,
}

/// Resolve a team name to its provider id by searching within a league.
///
/// The first search result wins. Zero results and provider errors both
/// yield `None`; errors are logged, never propagated.
pub async fn resolve_team(
    football: &dyn FootballData,
    name: &str,
    league: &LeagueId,
) -> Option<TeamIdentity> {
    match football.search_team(name, league).await {
        Ok(entries) => match entries.into_iter().next() {
            Some(entry) => {
                debug!(team = name, id = entry.team.id, "Resolved team");
                Some(TeamIdentity {
                    id: entry.team.id,
                    name: entry.team.name,
                })
            }
            None => {
                warn!(team = name, %league, "Team search returned no results");
                None
            }
        },
        Err(e) => {
            warn!(team = name, %league, error = %e, "Team search failed");
            None
        }
    }
}

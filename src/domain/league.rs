use serde::{Deserialize, Serialize};

/// League identifier as accepted by API-Football.
///
/// Requests may name a league either by its numeric provider id or by a
/// short key such as `premier_league`. Names outside the known table are
/// kept verbatim and forwarded to the provider as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LeagueId {
    Numeric(i64),
    Named(String),
}

/// Known league keys (lowercase) and their API-Football ids
pub const KNOWN_LEAGUES: &[(&str, i64)] = &[
    ("premier_league", 39),
    ("la_liga", 140),
    ("bundesliga", 78),
    ("serie_a", 135),
    ("ligue_1", 61),
];

impl LeagueId {
    /// Resolve a league reference into the identifier sent upstream.
    ///
    /// Numeric input (including numeric strings) is returned as a number,
    /// known names map to their id case-insensitively, anything else is
    /// passed through unchanged.
    pub fn resolve(&self) -> LeagueId {
        match self {
            LeagueId::Numeric(id) => LeagueId::Numeric(*id),
            LeagueId::Named(name) => {
                if let Ok(id) = name.trim().parse::<i64>() {
                    return LeagueId::Numeric(id);
                }
                let key = name.to_lowercase();
                KNOWN_LEAGUES
                    .iter()
                    .find(|(known, _)| *known == key)
                    .map(|(_, id)| LeagueId::Numeric(*id))
                    .unwrap_or_else(|| LeagueId::Named(name.clone()))
            }
        }
    }

    pub fn as_numeric(&self) -> Option<i64> {
        match self {
            LeagueId::Numeric(id) => Some(*id),
            LeagueId::Named(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, LeagueId::Named(name) if name.trim().is_empty())
    }
}

impl From<&str> for LeagueId {
    fn from(value: &str) -> Self {
        LeagueId::Named(value.to_string())
    }
}

impl From<i64> for LeagueId {
    fn from(value: i64) -> Self {
        LeagueId::Numeric(value)
    }
}

impl std::fmt::Display for LeagueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueId::Numeric(id) => write!(f, "{}", id),
            LeagueId::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Resolve a league reference into the identifier sent upstream
pub fn resolve_league(input: &LeagueId) -> LeagueId {
    input.resolve()
}

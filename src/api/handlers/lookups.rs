//! Validated pass-through queries against API-Football
//!
//! Every lookup route forwards the allowed, non-empty query parameters to one
//! upstream endpoint and wraps the `response` payload under a route-specific
//! key.

use axum::{
    extract::{Query, State},
    routing::{get, MethodRouter},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::warn;

use crate::api::{state::AppState, types::*};

/// Which query parameters must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Optional,
    Required(&'static str),
    AnyOf(&'static [&'static str]),
    AllOf(&'static [&'static str]),
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Requirement {
    /// Check the supplied parameter names, returning the client-facing message
    /// on failure
    pub fn check(&self, present: &[(String, String)]) -> Result<(), String> {
        let has = |name: &str| present.iter().any(|(key, _)| key == name);
        match self {
            Requirement::Optional => Ok(()),
            Requirement::Required(name) if has(*name) => Ok(()),
            Requirement::Required(name) => Err(format!("{} parameter is required", capitalize(name))),
            Requirement::AnyOf(names) if names.iter().any(|n| has(*n)) => Ok(()),
            Requirement::AnyOf(_) => Err("At least one parameter is required".to_string()),
            Requirement::AllOf(names) if names.iter().all(|n| has(*n)) => Ok(()),
            Requirement::AllOf(names) => Err(format!(
                "{} parameters are required",
                capitalize(&names.join(" and "))
            )),
        }
    }
}

/// One lookup route
#[derive(Debug)]
pub struct Lookup {
    pub route: &'static str,
    pub upstream: &'static str,
    pub params: &'static [&'static str],
    pub requirement: Requirement,
    /// Response key the payload is placed under
    pub key: &'static str,
    pub with_paging: bool,
    /// Used in the failure message
    pub label: &'static str,
}

pub static LOOKUPS: &[Lookup] = &[
    Lookup {
        route: "/api/fixtures/statistics",
        upstream: "fixtures/statistics",
        params: &["fixture", "team", "type", "half"],
        requirement: Requirement::Required("fixture"),
        key: "statistics",
        with_paging: false,
        label: "fixture statistics",
    },
    Lookup {
        route: "/api/fixtures/events",
        upstream: "fixtures/events",
        params: &["fixture", "team", "player", "type"],
        requirement: Requirement::Required("fixture"),
        key: "events",
        with_paging: false,
        label: "fixture events",
    },
    Lookup {
        route: "/api/fixtures/lineups",
        upstream: "fixtures/lineups",
        params: &["fixture", "team", "player", "type"],
        requirement: Requirement::Required("fixture"),
        key: "lineups",
        with_paging: false,
        label: "fixture lineups",
    },
    Lookup {
        route: "/api/fixtures/players",
        upstream: "fixtures/players",
        params: &["fixture", "team"],
        requirement: Requirement::Required("fixture"),
        key: "players",
        with_paging: false,
        label: "fixture players",
    },
    Lookup {
        route: "/api/injuries",
        upstream: "injuries",
        params: &[
            "league", "season", "fixture", "team", "player", "date", "ids", "timezone",
        ],
        requirement: Requirement::AnyOf(&[
            "league", "season", "fixture", "team", "player", "date", "ids",
        ]),
        key: "injuries",
        with_paging: false,
        label: "injuries",
    },
    Lookup {
        route: "/api/predictions",
        upstream: "predictions",
        params: &["fixture"],
        requirement: Requirement::Required("fixture"),
        key: "predictions",
        with_paging: false,
        label: "predictions",
    },
    Lookup {
        route: "/api/coaches",
        upstream: "coachs",
        params: &["id", "team", "search"],
        requirement: Requirement::AnyOf(&["id", "team", "search"]),
        key: "coaches",
        with_paging: false,
        label: "coaches",
    },
    Lookup {
        route: "/api/players/seasons",
        upstream: "players/seasons",
        params: &["player"],
        requirement: Requirement::Optional,
        key: "seasons",
        with_paging: false,
        label: "players seasons",
    },
    Lookup {
        route: "/api/players/profiles",
        upstream: "players/profiles",
        params: &["player", "search", "page"],
        requirement: Requirement::Optional,
        key: "players",
        with_paging: true,
        label: "players profiles",
    },
    Lookup {
        route: "/api/players",
        upstream: "players",
        params: &["id", "team", "league", "season", "search", "page"],
        requirement: Requirement::Optional,
        key: "players",
        with_paging: true,
        label: "players",
    },
    Lookup {
        route: "/api/players/squads",
        upstream: "players/squads",
        params: &["team", "player"],
        requirement: Requirement::AnyOf(&["team", "player"]),
        key: "squads",
        with_paging: false,
        label: "players squads",
    },
    Lookup {
        route: "/api/players/teams",
        upstream: "players/teams",
        params: &["player"],
        requirement: Requirement::Required("player"),
        key: "teams",
        with_paging: false,
        label: "players teams",
    },
    Lookup {
        route: "/api/players/topscorers",
        upstream: "players/topscorers",
        params: &["league", "season"],
        requirement: Requirement::AllOf(&["league", "season"]),
        key: "topScorers",
        with_paging: false,
        label: "top scorers",
    },
    Lookup {
        route: "/api/players/topassists",
        upstream: "players/topassists",
        params: &["league", "season"],
        requirement: Requirement::AllOf(&["league", "season"]),
        key: "topAssists",
        with_paging: false,
        label: "top assists",
    },
];

/// Allowed, non-blank parameters in declaration order
fn select_params(lookup: &Lookup, query: &HashMap<String, String>) -> Vec<(String, String)> {
    lookup
        .params
        .iter()
        .filter_map(|name| {
            query
                .get(*name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| (name.to_string(), v.to_string()))
        })
        .collect()
}

pub async fn run_lookup(
    state: &AppState,
    lookup: &Lookup,
    query: HashMap<String, String>,
) -> ApiResult<LookupResponse> {
    let params = select_params(lookup, &query);
    lookup.requirement.check(&params).map_err(bad_request)?;

    let envelope = state
        .football
        .lookup(lookup.upstream, &params)
        .await
        .map_err(|e| {
            warn!(route = lookup.route, error = %e, "Lookup failed");
            internal_error(format!("Failed to fetch {}", lookup.label), e)
        })?;

    let payload = match envelope.response {
        Value::Null => json!([]),
        other => other,
    };

    let mut body = LookupResponse::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(lookup.key.to_string(), payload);
    if lookup.with_paging {
        body.insert(
            "paging".to_string(),
            envelope.paging.unwrap_or_else(|| json!({})),
        );
    }
    Ok(Json(body))
}

/// GET handler bound to one table entry
pub fn lookup_route(lookup: &'static Lookup) -> MethodRouter<AppState> {
    get(
        move |State(state): State<AppState>, Query(query): Query<HashMap<String, String>>| async move {
            run_lookup(&state, lookup, query).await
        },
    )
}

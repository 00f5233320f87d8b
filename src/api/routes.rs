use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        // Analysis endpoints
        .route("/api/analyze", post(handlers::analyze_match))
        .route("/api/history", get(handlers::get_history))
        // Fixture browsing
        .route("/api/matches-by-month", get(handlers::matches_by_month))
        // System endpoints
        .route("/api/health", get(handlers::health_handler));

    // Provider lookups
    let router = handlers::LOOKUPS.iter().fold(router, |router, lookup| {
        router.route(lookup.route, handlers::lookup_route(lookup))
    });

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnalysisResult;
    use crate::error::KickoffError;
    use crate::persistence::MockHistoryStore;
    use crate::pipeline::{Pipeline, PipelineSettings};
    use crate::providers::{
        ApiEnvelope, FootballData, MockCompletionModel, MockFootballData, TeamEntry, TeamInfo,
    };
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(football: MockFootballData, model: MockCompletionModel, history: MockHistoryStore) -> Router {
        let football: Arc<dyn FootballData> = Arc::new(football);
        let history: Arc<dyn crate::persistence::HistoryStore> = Arc::new(history);
        let pipeline = Pipeline::new(
            football.clone(),
            None,
            Arc::new(model),
            history.clone(),
            PipelineSettings::default(),
        );
        create_router(AppState::new(Arc::new(pipeline), history, football))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(
            MockFootballData::new(),
            MockCompletionModel::new(),
            MockHistoryStore::new(),
        )
        .oneshot(get("/api/health"))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "OK");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_missing_fields_is_400() {
        let mut football = MockFootballData::new();
        football.expect_search_team().never();

        let response = app(football, MockCompletionModel::new(), MockHistoryStore::new())
            .oneshot(post_json(
                "/api/analyze",
                json!({"league": "premier_league", "homeTeam": "Arsenal"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn test_analyze_malformed_body_is_json_400() {
        let bodies = [
            json!({"league": 1.5, "date": "2024-03-10", "homeTeam": "A", "awayTeam": "B"}),
            json!({"league": 39, "date": "2024-03-10", "homeTeam": "A", "awayTeam": "B",
                   "options": {"includeInjuries": "yes"}}),
        ];
        for body in bodies {
            let mut football = MockFootballData::new();
            football.expect_search_team().never();

            let response = app(football, MockCompletionModel::new(), MockHistoryStore::new())
                .oneshot(post_json("/api/analyze", body))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = body_json(response).await;
            assert_eq!(body["error"], "Invalid request body");
            assert!(body["details"].is_string());
        }

        let not_json = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app(
            MockFootballData::new(),
            MockCompletionModel::new(),
            MockHistoryStore::new(),
        )
        .oneshot(not_json)
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_analyze_null_options_mean_defaults() {
        let mut football = MockFootballData::new();
        football.expect_search_team().times(2).returning(|_, _| Ok(vec![]));

        let response = app(football, MockCompletionModel::new(), MockHistoryStore::new())
            .oneshot(post_json(
                "/api/analyze",
                json!({"league": 39, "date": "2024-03-10", "homeTeam": "X", "awayTeam": "Y",
                       "options": null}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Could not find team IDs");
    }

    #[tokio::test]
    async fn test_analyze_unknown_team_is_400() {
        let mut football = MockFootballData::new();
        football.expect_search_team().returning(|_, _| Ok(vec![]));

        let response = app(football, MockCompletionModel::new(), MockHistoryStore::new())
            .oneshot(post_json(
                "/api/analyze",
                json!({"league": 39, "date": "2024-03-10", "homeTeam": "X", "awayTeam": "Y"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Could not find team IDs");
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let mut football = MockFootballData::new();
        football.expect_search_team().returning(|name, _| {
            Ok(vec![TeamEntry {
                team: TeamInfo {
                    id: if name == "Arsenal" { 42 } else { 49 },
                    name: name.to_string(),
                    code: None,
                    country: None,
                    logo: None,
                },
            }])
        });
        football.expect_fixtures().returning(|_, _, _| Ok(vec![]));
        football
            .expect_team_statistics()
            .returning(|_, _, _| Err(KickoffError::Internal("quota".into())));

        let mut model = MockCompletionModel::new();
        model.expect_complete().returning(|_| Ok("plain text".into()));
        let mut history = MockHistoryStore::new();
        history.expect_append().times(1).returning(|_| Ok(1));

        let response = app(football, model, history)
            .oneshot(post_json(
                "/api/analyze",
                json!({"league": "premier_league", "date": "2024-03-10",
                       "homeTeam": "Arsenal", "awayTeam": "Chelsea"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["analysis"]["analysis"], "plain text");
        assert_eq!(body["analysis"]["confidence"], 5);
        assert_eq!(body["rawData"]["homeTeamFixtures"], json!([]));
        assert_eq!(body["rawData"]["homeTeamStats"], Value::Null);
        assert!(body["rawData"].get("odds").is_none());
    }

    #[tokio::test]
    async fn test_model_failure_is_500() {
        let mut football = MockFootballData::new();
        football.expect_search_team().returning(|name, _| {
            Ok(vec![TeamEntry {
                team: TeamInfo {
                    id: 1,
                    name: name.to_string(),
                    code: None,
                    country: None,
                    logo: None,
                },
            }])
        });
        football.expect_fixtures().returning(|_, _, _| Ok(vec![]));
        football.expect_team_statistics().returning(|_, _, _| Ok(json!({})));

        let mut model = MockCompletionModel::new();
        model
            .expect_complete()
            .returning(|_| Err(KickoffError::Internal("connect timeout".into())));

        let response = app(football, model, MockHistoryStore::new())
            .oneshot(post_json(
                "/api/analyze",
                json!({"league": 39, "date": "2024-03-10", "homeTeam": "A", "awayTeam": "B"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_history_lists_records() {
        let mut history = MockHistoryStore::new();
        history
            .expect_recent()
            .withf(|limit| *limit == 50)
            .returning(|_| {
                Ok(vec![crate::domain::HistoryRecord {
                    id: 3,
                    league: "39".into(),
                    date: "2024-03-10".into(),
                    home_team: "Arsenal".into(),
                    away_team: "Chelsea".into(),
                    analysis: serde_json::to_value(AnalysisResult::fallback("x")).unwrap(),
                    created_at: chrono::Utc::now(),
                }])
            });

        let response = app(MockFootballData::new(), MockCompletionModel::new(), history)
            .oneshot(get("/api/history"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body[0]["homeTeam"], "Arsenal");
        assert_eq!(body[0]["analysis"]["recommendation"], "no data");
    }

    #[tokio::test]
    async fn test_history_failure_is_500() {
        let mut history = MockHistoryStore::new();
        history
            .expect_recent()
            .returning(|_| Err(KickoffError::Internal("locked".into())));

        let response = app(MockFootballData::new(), MockCompletionModel::new(), history)
            .oneshot(get("/api/history"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Database error");
    }

    #[tokio::test]
    async fn test_lookup_requires_param() {
        let mut football = MockFootballData::new();
        football.expect_lookup().never();

        let response = app(football, MockCompletionModel::new(), MockHistoryStore::new())
            .oneshot(get("/api/predictions"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Fixture parameter is required");
    }

    #[tokio::test]
    async fn test_lookup_passes_through_with_paging() {
        let mut football = MockFootballData::new();
        football
            .expect_lookup()
            .withf(|endpoint, params| {
                endpoint == "players"
                    && params
                        == [
                            ("team".to_string(), "42".to_string()),
                            ("season".to_string(), "2023".to_string()),
                        ]
            })
            .returning(|_, _| {
                Ok(ApiEnvelope {
                    response: json!([{"player": {"id": 1100, "name": "B. Saka"}}]),
                    paging: Some(json!({"current": 1, "total": 2})),
                    errors: json!([]),
                })
            });

        let response = app(football, MockCompletionModel::new(), MockHistoryStore::new())
            .oneshot(get("/api/players?season=2023&team=42&unknown=1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["players"][0]["player"]["id"], 1100);
        assert_eq!(body["paging"]["total"], 2);
    }

    #[tokio::test]
    async fn test_coaches_use_upstream_spelling() {
        let mut football = MockFootballData::new();
        football
            .expect_lookup()
            .withf(|endpoint, _| endpoint == "coachs")
            .returning(|_, _| Ok(ApiEnvelope::default()));

        let response = app(football, MockCompletionModel::new(), MockHistoryStore::new())
            .oneshot(get("/api/coaches?team=42"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["coaches"], json!([]));
    }

    #[tokio::test]
    async fn test_lookup_upstream_failure_is_500() {
        let mut football = MockFootballData::new();
        football.expect_lookup().returning(|_, _| {
            Err(KickoffError::Upstream {
                service: "API-Football",
                status: 429,
                body: "Too many requests".into(),
            })
        });

        let response = app(football, MockCompletionModel::new(), MockHistoryStore::new())
            .oneshot(get("/api/players/topscorers?league=39&season=2023"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to fetch top scorers");
        assert!(body["details"].as_str().unwrap().contains("429"));
    }

    #[tokio::test]
    async fn test_matches_by_month_filters_and_projects() {
        let mut football = MockFootballData::new();
        football
            .expect_lookup()
            .withf(|endpoint, params| {
                endpoint == "fixtures"
                    && params.contains(&("league".to_string(), "39".to_string()))
                    && params.contains(&("from".to_string(), "2024-02-01".to_string()))
                    && params.contains(&("to".to_string(), "2024-02-29".to_string()))
                    && params.contains(&("season".to_string(), "2024".to_string()))
            })
            .returning(|_, _| {
                Ok(ApiEnvelope {
                    response: json!([
                        {
                            "fixture": {"id": 1, "date": "2024-02-04T16:30:00+00:00",
                                        "status": {"short": "FT"}, "venue": {"name": "Emirates Stadium"}},
                            "teams": {"home": {"name": "Arsenal"}, "away": {"name": "Liverpool"}},
                            "goals": {"home": 3, "away": 1}
                        },
                        {
                            "fixture": {"id": 2, "date": "2024-02-10T15:00:00+00:00",
                                        "status": {"short": "FT"}, "venue": {"name": "Turf Moor"}},
                            "teams": {"home": {"name": "Burnley"}, "away": {"name": "Arsenal"}},
                            "goals": {"home": 0, "away": 5}
                        },
                        {
                            "fixture": {"id": 3, "date": "2024-02-11T14:00:00+00:00",
                                        "status": {"short": "FT"}},
                            "teams": {"home": {"name": "Chelsea"}, "away": {"name": "Wolves"}},
                            "goals": {"home": 2, "away": 4}
                        }
                    ]),
                    paging: None,
                    errors: json!([]),
                })
            });

        let response = app(football, MockCompletionModel::new(), MockHistoryStore::new())
            .oneshot(get(
                "/api/matches-by-month?league=premier_league&year=2024&month=2&team1=arsenal",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["league"], 39);
        assert_eq!(body["dateRange"]["endDate"], "2024-02-29");
        assert_eq!(body["matchesFound"], 2);
        assert_eq!(body["matches"][1]["awayScore"], 5);
    }

    #[tokio::test]
    async fn test_matches_by_month_requires_fields() {
        let response = app(
            MockFootballData::new(),
            MockCompletionModel::new(),
            MockHistoryStore::new(),
        )
        .oneshot(get("/api/matches-by-month?league=39&year=2024"))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

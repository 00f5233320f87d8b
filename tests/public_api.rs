use kickoff::domain::{
    resolve_league, AggregatedDataset, AnalysisOptions, AnalysisResult, LeagueId, MatchRequest,
    ModelVerdict, NewHistoryRecord,
};
use kickoff::persistence::{HistoryStore, SqliteHistoryStore, HISTORY_LIMIT};
use kickoff::pipeline::build_prompt;
use serde_json::json;

#[test]
fn league_resolution_table() {
    let cases = [
        (LeagueId::from("premier_league"), LeagueId::Numeric(39)),
        (LeagueId::from("LA_LIGA"), LeagueId::Numeric(140)),
        (LeagueId::from("bundesliga"), LeagueId::Numeric(78)),
        (LeagueId::from("serie_a"), LeagueId::Numeric(135)),
        (LeagueId::from("ligue_1"), LeagueId::Numeric(61)),
        (LeagueId::from("253"), LeagueId::Numeric(253)),
        (LeagueId::Numeric(2), LeagueId::Numeric(2)),
        (LeagueId::from("eredivisie"), LeagueId::from("eredivisie")),
    ];
    for (input, expected) in cases {
        assert_eq!(resolve_league(&input), expected, "input {:?}", input);
    }
}

#[test]
fn prompt_truncates_fixtures_and_is_stable() {
    let request = MatchRequest::new(39i64, "2024-03-10", "Arsenal", "Chelsea").with_options(
        AnalysisOptions {
            include_injuries: true,
            skip_odds: true,
        },
    );
    let dataset = AggregatedDataset {
        home_team_fixtures: (0..8).map(|i| json!({"marker": format!("H{}", i)})).collect(),
        away_team_fixtures: (0..8).map(|i| json!({"marker": format!("A{}", i)})).collect(),
        injuries: Some(vec![]),
        ..Default::default()
    };

    let first = build_prompt(&request, &dataset);
    assert_eq!(first, build_prompt(&request, &dataset));
    assert!(first.contains("H4") && !first.contains("H5"));
    assert!(first.contains("A4") && !first.contains("A5"));
    assert!(first.contains("- Injuries: []"));
    assert!(!first.contains("- Odds:"));
}

#[test]
fn verdict_parsing_from_markdown() {
    let reply = "Sure!\n```json\n{\"analysis\":\"x\",\"recommendation\":\"X\",\"justification\":\"y\",\"confidence\":3,\"betType\":\"over_under\",\"suggestedOdds\":\"3.10\"}\n```\nGood luck.";
    match ModelVerdict::parse(reply) {
        ModelVerdict::Structured(result) => assert_eq!(result.recommendation, "X"),
        ModelVerdict::Fallback(_) => panic!("expected structured verdict"),
    }
}

#[tokio::test]
async fn history_is_capped_and_newest_first() {
    let store = SqliteHistoryStore::in_memory().await.unwrap();
    store.migrate().await.unwrap();

    for i in 0..(HISTORY_LIMIT + 5) {
        let request = MatchRequest::new("serie_a", "2024-04-01", format!("Home {}", i), "Away");
        let record = NewHistoryRecord::new(&request, &AnalysisResult::fallback("n/a")).unwrap();
        store.append(&record).await.unwrap();
    }

    let records = store.recent(HISTORY_LIMIT).await.unwrap();
    assert_eq!(records.len(), HISTORY_LIMIT as usize);
    assert_eq!(records.first().unwrap().home_team, "Home 54");
    assert_eq!(records.last().unwrap().home_team, "Home 5");
}

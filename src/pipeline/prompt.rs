//! Prompt construction for the betting analysis model

use serde::Serialize;

use crate::domain::{AggregatedDataset, MatchRequest};

/// Fixtures per team embedded in the prompt
pub const PROMPT_FIXTURES: usize = 5;

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn first_fixtures(fixtures: &[serde_json::Value]) -> String {
    to_json(&fixtures[..fixtures.len().min(PROMPT_FIXTURES)])
}

/// Build the analysis prompt for one match.
///
/// Pure and deterministic: the same request and dataset always produce the
/// same text.
pub fn build_prompt(request: &MatchRequest, dataset: &AggregatedDataset) -> String {
    let home = &request.home_team;
    let away = &request.away_team;
    let options = &request.options;

    let injuries_section = if options.include_injuries {
        format!(
            "- Injuries: {}\n",
            to_json(dataset.injuries.as_deref().unwrap_or_default())
        )
    } else {
        String::new()
    };
    let odds_section = match &dataset.odds {
        Some(odds) => format!("- Odds: {}\n", to_json(odds)),
        None => String::new(),
    };

    let mut tasks = vec!["Form analysis of both teams", "Head-to-head summary"];
    if options.include_injuries {
        tasks.push("Injuries and absences");
    }
    tasks.extend([
        "Bet recommendation (1, X, 2 or handicap)",
        "Justification of the recommendation",
        "Confidence level (1-10)",
        "Suggested bet type (basic, handicap, over_under)",
    ]);
    let task_list: String = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| format!("{}. {}\n", i + 1, task))
        .collect();

    format!(
        r#"Analyze the match data and give a betting recommendation.

MATCH: {home} vs {away}
DATE: {date}
LEAGUE: {league}

DATA:
- Recent matches of {home}: {home_fixtures}
- Recent matches of {away}: {away_fixtures}
- Statistics of {home}: {home_stats}
- Statistics of {away}: {away_stats}
{injuries_section}{odds_section}
ANALYSIS OPTIONS: {options}

Provide a detailed analysis covering:
{task_list}
Respond with a single JSON object of this shape:
{{
  "analysis": "detailed analysis...",
  "recommendation": "1/X/2",
  "justification": "justification...",
  "confidence": 7,
  "betType": "basic/handicap/over_under",
  "suggestedOdds": "minimum odds worth taking"
}}
"#,
        date = request.date,
        league = request.league,
        home_fixtures = first_fixtures(&dataset.home_team_fixtures),
        away_fixtures = first_fixtures(&dataset.away_team_fixtures),
        home_stats = to_json(&dataset.home_team_stats),
        away_stats = to_json(&dataset.away_team_stats),
        options = to_json(options),
    )
}

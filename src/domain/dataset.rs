use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything gathered for one match before the model is consulted.
///
/// Provider payloads (odds events included) are kept verbatim. A source that failed shows up as its
/// empty sentinel (`[]` for lists, `null` for statistics) so the analysis can
/// still run on partial data. `injuries` and `odds` are omitted entirely
/// when they were not requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedDataset {
    #[serde(default)]
    pub home_team_fixtures: Vec<Value>,
    #[serde(default)]
    pub away_team_fixtures: Vec<Value>,
    #[serde(default)]
    pub home_team_stats: Option<Value>,
    #[serde(default)]
    pub away_team_stats: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injuries: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odds: Option<Vec<Value>>,
}

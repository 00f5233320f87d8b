//! Structured model output and its degraded fallback.

use serde::{Deserialize, Deserializer, Serialize};

pub const FALLBACK_RECOMMENDATION: &str = "no data";
pub const FALLBACK_JUSTIFICATION: &str = "model output could not be parsed";
pub const FALLBACK_CONFIDENCE: u8 = 5;
pub const FALLBACK_SUGGESTED_ODDS: &str = "not available";

/// Suggested bet type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetType {
    #[default]
    Basic,
    Handicap,
    #[serde(alias = "over/under", alias = "overunder", alias = "over-under")]
    OverUnder,
}

impl BetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetType::Basic => "basic",
            BetType::Handicap => "handicap",
            BetType::OverUnder => "over_under",
        }
    }
}

impl std::fmt::Display for BetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Betting analysis for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Narrative analysis text
    pub analysis: String,
    /// "1", "X", "2" or handicap notation
    pub recommendation: String,
    pub justification: String,
    /// 1 (low) to 10 (high)
    pub confidence: u8,
    #[serde(alias = "bet_type")]
    pub bet_type: BetType,
    /// Minimum acceptable price for the suggested bet
    #[serde(alias = "suggested_odds", deserialize_with = "string_or_number")]
    pub suggested_odds: String,
}

impl AnalysisResult {
    /// Degraded record carrying the raw model text
    pub fn fallback(raw: impl Into<String>) -> Self {
        Self {
            analysis: raw.into(),
            recommendation: FALLBACK_RECOMMENDATION.to_string(),
            justification: FALLBACK_JUSTIFICATION.to_string(),
            confidence: FALLBACK_CONFIDENCE,
            bet_type: BetType::default(),
            suggested_odds: FALLBACK_SUGGESTED_ODDS.to_string(),
        }
    }

    fn is_conforming(&self) -> bool {
        (1..=10).contains(&self.confidence) && !self.recommendation.trim().is_empty()
    }
}

/// Outcome of parsing a model reply
#[derive(Debug, Clone, PartialEq)]
pub enum ModelVerdict {
    Structured(AnalysisResult),
    Fallback(String),
}

impl ModelVerdict {
    /// Parse a raw reply. The whole reply is tried first, then the outermost
    /// `{...}` span (replies are often wrapped in markdown fences).
    pub fn parse(raw: &str) -> Self {
        let candidates = [Some(raw.trim()), json_span(raw)];
        for candidate in candidates.into_iter().flatten() {
            if let Ok(result) = serde_json::from_str::<AnalysisResult>(candidate) {
                if result.is_conforming() {
                    return ModelVerdict::Structured(result);
                }
            }
        }
        ModelVerdict::Fallback(raw.to_string())
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ModelVerdict::Fallback(_))
    }

    pub fn into_result(self) -> AnalysisResult {
        match self {
            ModelVerdict::Structured(result) => result,
            ModelVerdict::Fallback(raw) => AnalysisResult::fallback(raw),
        }
    }
}

fn json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Price::deserialize(deserializer)? {
        Price::Text(text) => text,
        Price::Number(number) => number.to_string(),
    })
}

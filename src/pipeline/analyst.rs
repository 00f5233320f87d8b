//! Model invocation and output repair

use tracing::{debug, warn};

use crate::domain::{AnalysisResult, ModelVerdict};
use crate::error::Result;
use crate::providers::CompletionModel;

/// Ask the model for an analysis and coerce its reply into an `AnalysisResult`.
///
/// Only a transport failure of the completion call is an error. A reply that
/// does not parse becomes the fallback record carrying the raw text.
pub async fn request_analysis(model: &dyn CompletionModel, prompt: &str) -> Result<AnalysisResult> {
    let reply = model.complete(prompt).await?;

    match ModelVerdict::parse(&reply) {
        ModelVerdict::Structured(result) => {
            debug!(
                recommendation = %result.recommendation,
                confidence = result.confidence,
                "Model reply parsed"
            );
            Ok(result)
        }
        verdict @ ModelVerdict::Fallback(_) => {
            warn!(reply_len = reply.len(), "Model reply did not parse, using fallback record");
            Ok(verdict.into_result())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BetType, FALLBACK_RECOMMENDATION};
    use crate::error::KickoffError;
    use crate::providers::MockCompletionModel;

    #[tokio::test]
    async fn test_structured_reply() {
        let mut model = MockCompletionModel::new();
        model.expect_complete().times(1).returning(|_| {
            Ok(r#"{"analysis":"a","recommendation":"2","justification":"j","confidence":6,"betType":"handicap","suggestedOdds":"2.40"}"#.to_string())
        });

        let result = request_analysis(&model, "prompt").await.unwrap();
        assert_eq!(result.recommendation, "2");
        assert_eq!(result.bet_type, BetType::Handicap);
    }

    #[tokio::test]
    async fn test_unparseable_reply_falls_back() {
        let mut model = MockCompletionModel::new();
        model
            .expect_complete()
            .returning(|_| Ok("Sorry, I cannot help with that.".to_string()));

        let result = request_analysis(&model, "prompt").await.unwrap();
        assert_eq!(result.analysis, "Sorry, I cannot help with that.");
        assert_eq!(result.recommendation, FALLBACK_RECOMMENDATION);
        assert_eq!(result.confidence, 5);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let mut model = MockCompletionModel::new();
        model.expect_complete().returning(|_| {
            Err(KickoffError::Upstream {
                service: "Chat completion",
                status: 503,
                body: "overloaded".into(),
            })
        });

        assert!(request_analysis(&model, "prompt").await.is_err());
    }
}

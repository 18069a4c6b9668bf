//! The verdict returned for one analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::status::{Reliability, VerificationStatus};
use crate::types::signals::{Signal, SignalScores};

/// A signal that was dropped from the breakdown, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalFailure {
    pub signal: Signal,
    pub error: String,
}

/// Result of scoring one request.
///
/// Built once by the engine and never mutated afterwards; callers own
/// persistence and display.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    id: Uuid,
    analyzed_at: DateTime<Utc>,
    reliability_score: f32,
    confidence: f32,
    status: VerificationStatus,
    reasons: Vec<String>,
    breakdown: SignalScores,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    omitted: Vec<SignalFailure>,
}

impl AnalysisResult {
    pub(crate) fn new(
        reliability_score: f32,
        confidence: f32,
        reasons: Vec<String>,
        breakdown: SignalScores,
        omitted: Vec<SignalFailure>,
    ) -> Self {
        let reliability_score = reliability_score.clamp(0.0, 1.0);
        Self {
            id: Uuid::now_v7(),
            analyzed_at: Utc::now(),
            reliability_score,
            confidence: confidence.clamp(0.0, 1.0),
            status: VerificationStatus::from_score(reliability_score),
            reasons,
            breakdown,
            omitted,
        }
    }

    /// Unique id for correlating logs and stored verdicts.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn analyzed_at(&self) -> DateTime<Utc> {
        self.analyzed_at
    }

    /// Weighted combination of the present signals, in [0, 1].
    pub fn reliability_score(&self) -> f32 {
        self.reliability_score
    }

    /// How much evidence backs the reliability score, in [0, 1].
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn status(&self) -> VerificationStatus {
        self.status
    }

    /// Binary view of the verdict.
    pub fn reliability(&self) -> Reliability {
        Reliability::from_score(self.reliability_score)
    }

    pub fn is_reliable(&self) -> bool {
        self.reliability().is_reliable()
    }

    /// Explanations, most important first.
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Per-signal scores that went into the verdict.
    pub fn breakdown(&self) -> &SignalScores {
        &self.breakdown
    }

    /// Signals whose extractor failed. A signal that does not apply, such as
    /// source without a URL, is simply absent from the breakdown.
    pub fn omitted(&self) -> &[SignalFailure] {
        &self.omitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_derived_from_score() {
        let result = AnalysisResult::new(0.6, 0.9, vec![], SignalScores::new(), vec![]);
        assert_eq!(result.status(), VerificationStatus::LikelyTrue);
        assert!(result.is_reliable());
    }

    #[test]
    fn test_scores_clamped() {
        let result = AnalysisResult::new(1.2, -0.5, vec![], SignalScores::new(), vec![]);
        assert_eq!(result.reliability_score(), 1.0);
        assert_eq!(result.confidence(), 0.0);
        assert_eq!(result.status(), VerificationStatus::Verified);
    }

    #[test]
    fn test_serialized_shape() {
        let breakdown = SignalScores::new().with(Signal::Clickbait, 1.0);
        let result = AnalysisResult::new(0.3, 0.5, vec!["why".into()], breakdown, vec![]);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"], "LIKELY_FALSE");
        assert_eq!(json["reasons"][0], "why");
        assert!(json["breakdown"]["clickbait"].is_object());
        assert!(json.get("omitted").is_none());
    }
}

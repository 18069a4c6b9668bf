//! Percent-based view of a verdict, the shape API consumers display.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::scoring::status::{Reliability, VerificationStatus};
use crate::types::result::AnalysisResult;
use crate::types::signals::Signal;

/// A verdict with every score expressed as a percentage rounded to two
/// decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub result: Reliability,
    pub status: VerificationStatus,
    pub confidence: f64,
    pub reliability_score: f64,
    /// Absent signals are left out rather than reported as zero.
    pub signals: BTreeMap<Signal, f64>,
    pub reasons: Vec<String>,
}

impl From<&AnalysisResult> for AnalysisReport {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            result: result.reliability(),
            status: result.status(),
            confidence: as_percent(result.confidence()),
            reliability_score: as_percent(result.reliability_score()),
            signals: result
                .breakdown()
                .iter()
                .map(|(signal, score)| (signal, as_percent(score.score)))
                .collect(),
            reasons: result.reasons().to_vec(),
        }
    }
}

/// `0.84567` → `84.57`
pub fn as_percent(score: f32) -> f64 {
    (f64::from(score) * 10_000.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::signals::SignalScores;

    #[test]
    fn test_as_percent_rounds_to_two_decimals() {
        assert_eq!(as_percent(0.0), 0.0);
        assert_eq!(as_percent(1.0), 100.0);
        assert_eq!(as_percent(0.5), 50.0);
        assert!((as_percent(0.84567) - 84.57).abs() < 1e-9);
    }

    #[test]
    fn test_report_from_result() {
        let breakdown = SignalScores::new()
            .with(Signal::Source, 0.5)
            .with(Signal::Clickbait, 0.25);
        let result = AnalysisResult::new(
            0.35,
            0.5,
            vec!["Title contains clickbait patterns".into()],
            breakdown,
            vec![],
        );

        let report = AnalysisReport::from(&result);
        assert_eq!(report.result, Reliability::Unreliable);
        assert_eq!(report.status, VerificationStatus::LikelyFalse);
        assert_eq!(report.confidence, 50.0);
        assert_eq!(report.signals.len(), 2);
        assert_eq!(report.signals[&Signal::Clickbait], 25.0);
        assert!(!report.signals.contains_key(&Signal::Model));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["result"], "unreliable");
        assert_eq!(json["signals"]["source"], 50.0);
    }
}

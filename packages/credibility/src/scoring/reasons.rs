//! Reason composition.

use crate::types::signals::{Signal, SignalScores};

/// Order in which signal reasons are reported.
pub const REASON_ORDER: [Signal; 6] = [
    Signal::Source,
    Signal::Clickbait,
    Signal::Bias,
    Signal::Sentiment,
    Signal::Factual,
    Signal::Model,
];

/// Collect the reasons of signals that raised a concern.
///
/// A reason is reported when the signal scored below 1.0, or when the
/// signal is pattern-based and attached one. Each signal contributes at
/// most one reason; duplicates across signals are kept.
pub fn compose_reasons(scores: &SignalScores) -> Vec<String> {
    REASON_ORDER
        .iter()
        .filter_map(|signal| {
            let score = scores.get(*signal)?;
            let reason = score.reason.as_ref()?;
            (signal.is_pattern_based() || score.score < 1.0).then(|| reason.clone())
        })
        .collect()
}

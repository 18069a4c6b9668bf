//! Weighted aggregation with renormalization over present signals.
//!
//! A missing signal contributes neither score nor weight: the weights of the
//! present signals are rescaled to sum to 1.0, so the result is always a
//! convex combination of the scores that were actually measured.

use crate::error::{AnalysisError, Result};
use crate::types::config::SignalWeights;
use crate::types::signals::{clamp_unit, Signal, SignalScores};

/// Reliability score and the effective weights that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub score: f32,
    /// Renormalized weight of each present signal, in canonical order.
    pub weights: Vec<(Signal, f32)>,
}

impl Aggregate {
    pub fn weight_of(&self, signal: Signal) -> Option<f32> {
        self.weights
            .iter()
            .find(|(s, _)| *s == signal)
            .map(|(_, w)| *w)
    }
}

/// Combine present signals into one reliability score.
///
/// Scores are clamped into [0, 1] on the way in, since `SignalScores` fields
/// can be set directly. Fails with `NoSignalsAvailable` when nothing is
/// present, or when every present signal carries zero weight. Never
/// fabricates a default.
pub fn aggregate(scores: &SignalScores, weights: &SignalWeights) -> Result<Aggregate> {
    let present: Vec<(Signal, f32, f32)> = scores
        .iter()
        .map(|(signal, s)| (signal, clamp_unit(s.score), weights.get(signal).max(0.0)))
        .collect();

    let total_weight: f32 = present.iter().map(|(_, _, w)| w).sum();
    if present.is_empty() || !(total_weight > 0.0) {
        return Err(AnalysisError::NoSignalsAvailable);
    }

    let mut score = 0.0;
    let mut effective = Vec::with_capacity(present.len());
    for (signal, value, weight) in present {
        let w = weight / total_weight;
        score += value * w;
        effective.push((signal, w));
    }

    Ok(Aggregate {
        score: clamp_unit(score),
        weights: effective,
    })
}

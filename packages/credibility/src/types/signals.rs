//! Signal identities and per-signal scores.
//!
//! The set of signals is closed: every signal the engine knows about is a
//! variant of [`Signal`] and a field of [`SignalScores`]. A signal that could
//! not be measured is `None`, never a guessed default.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One independent measurement of a textual property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Polarity balance of the text
    Sentiment,
    /// Sensational headline patterns
    Clickbait,
    /// Emotional and subjective language
    Bias,
    /// Density of names, numbers and dates
    Factual,
    /// Reputation of the publishing domain
    Source,
    /// External reliability classifier
    Model,
}

impl Signal {
    /// All signals in canonical order.
    pub const ALL: [Signal; 6] = [
        Signal::Sentiment,
        Signal::Clickbait,
        Signal::Bias,
        Signal::Factual,
        Signal::Source,
        Signal::Model,
    ];

    /// Stable snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Sentiment => "sentiment",
            Signal::Clickbait => "clickbait",
            Signal::Bias => "bias",
            Signal::Factual => "factual",
            Signal::Source => "source",
            Signal::Model => "model",
        }
    }

    /// Pattern-based signals report their reasons whenever a pattern fires,
    /// even if the score itself is unaffected.
    pub fn is_pattern_based(&self) -> bool {
        matches!(self, Signal::Clickbait)
    }

    /// Parse a snake_case name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp into [0, 1]. NaN becomes 0.0.
pub(crate) fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// A normalized score in [0, 1] with an optional explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalScore {
    /// 1.0 = no concern, 0.0 = strongest concern
    pub score: f32,

    /// Human-readable explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SignalScore {
    /// Create a score, clamping into [0, 1]. NaN becomes 0.0.
    pub fn new(score: f32) -> Self {
        Self {
            score: clamp_unit(score),
            reason: None,
        }
    }

    /// Attach a reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach a reason only when `condition` holds.
    pub fn with_reason_if(self, condition: bool, reason: impl Into<String>) -> Self {
        if condition {
            self.with_reason(reason)
        } else {
            self
        }
    }
}

/// Scores for every signal that was successfully measured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SignalScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clickbait: Option<SignalScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias: Option<SignalScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factual: Option<SignalScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SignalScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<SignalScore>,
}

impl SignalScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the score for a signal, if present.
    pub fn get(&self, signal: Signal) -> Option<&SignalScore> {
        match signal {
            Signal::Sentiment => self.sentiment.as_ref(),
            Signal::Clickbait => self.clickbait.as_ref(),
            Signal::Bias => self.bias.as_ref(),
            Signal::Factual => self.factual.as_ref(),
            Signal::Source => self.source.as_ref(),
            Signal::Model => self.model.as_ref(),
        }
    }

    fn slot_mut(&mut self, signal: Signal) -> &mut Option<SignalScore> {
        match signal {
            Signal::Sentiment => &mut self.sentiment,
            Signal::Clickbait => &mut self.clickbait,
            Signal::Bias => &mut self.bias,
            Signal::Factual => &mut self.factual,
            Signal::Source => &mut self.source,
            Signal::Model => &mut self.model,
        }
    }

    /// Set a signal's score. The score is re-clamped on the way in.
    pub fn set(&mut self, signal: Signal, score: SignalScore) {
        let clamped = SignalScore {
            reason: score.reason,
            ..SignalScore::new(score.score)
        };
        *self.slot_mut(signal) = Some(clamped);
    }

    /// Remove a signal's score.
    pub fn remove(&mut self, signal: Signal) -> Option<SignalScore> {
        self.slot_mut(signal).take()
    }

    /// Builder-style [`set`](Self::set) with a bare score.
    pub fn with(mut self, signal: Signal, score: f32) -> Self {
        self.set(signal, SignalScore::new(score));
        self
    }

    /// Present signals in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Signal, &SignalScore)> + '_ {
        Signal::ALL
            .into_iter()
            .filter_map(move |s| self.get(s).map(|score| (s, score)))
    }

    /// Signals that are absent, in canonical order.
    pub fn missing(&self) -> Vec<Signal> {
        Signal::ALL
            .into_iter()
            .filter(|s| self.get(*s).is_none())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(SignalScore::new(1.7).score, 1.0);
        assert_eq!(SignalScore::new(-0.2).score, 0.0);
        assert_eq!(SignalScore::new(f32::NAN).score, 0.0);
        assert_eq!(SignalScore::new(0.42).score, 0.42);
    }

    #[test]
    fn test_set_reclamps() {
        let mut scores = SignalScores::new();
        scores.set(
            Signal::Bias,
            SignalScore {
                score: 3.0,
                reason: Some("r".into()),
            },
        );
        let bias = scores.get(Signal::Bias).unwrap();
        assert_eq!(bias.score, 1.0);
        assert_eq!(bias.reason.as_deref(), Some("r"));
    }

    #[test]
    fn test_iter_in_canonical_order() {
        let scores = SignalScores::new()
            .with(Signal::Model, 0.1)
            .with(Signal::Sentiment, 0.2)
            .with(Signal::Factual, 0.3);

        let order: Vec<Signal> = scores.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec![Signal::Sentiment, Signal::Factual, Signal::Model]);
        assert_eq!(
            scores.missing(),
            vec![Signal::Clickbait, Signal::Bias, Signal::Source]
        );
        assert_eq!(scores.len(), 3);
    }

    #[test]
    fn test_signal_names_roundtrip() {
        for signal in Signal::ALL {
            assert_eq!(Signal::parse(signal.as_str()), Some(signal));
        }
        assert_eq!(Signal::parse(" Model "), Some(Signal::Model));
        assert_eq!(Signal::parse("fake_news"), None);
    }

    #[test]
    fn test_absent_signals_not_serialized() {
        let scores = SignalScores::new().with(Signal::Source, 0.5);
        let json = serde_json::to_value(&scores).unwrap();
        assert_eq!(json, serde_json::json!({ "source": { "score": 0.5 } }));
    }
}

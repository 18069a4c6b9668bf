//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::types::signals::Signal;

/// Weight given to each signal by the aggregator.
///
/// Weights need not sum to 1.0: the aggregator always renormalizes over the
/// signals that are actually present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalWeights {
    pub sentiment: f32,
    pub clickbait: f32,
    pub bias: f32,
    pub factual: f32,
    pub source: f32,
    pub model: f32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            sentiment: 0.10,
            clickbait: 0.15,
            bias: 0.20,
            factual: 0.25,
            source: 0.15,
            model: 0.15,
        }
    }
}

impl SignalWeights {
    pub fn get(&self, signal: Signal) -> f32 {
        match signal {
            Signal::Sentiment => self.sentiment,
            Signal::Clickbait => self.clickbait,
            Signal::Bias => self.bias,
            Signal::Factual => self.factual,
            Signal::Source => self.source,
            Signal::Model => self.model,
        }
    }

    /// Set one signal's weight.
    pub fn with(mut self, signal: Signal, weight: f32) -> Self {
        let slot = match signal {
            Signal::Sentiment => &mut self.sentiment,
            Signal::Clickbait => &mut self.clickbait,
            Signal::Bias => &mut self.bias,
            Signal::Factual => &mut self.factual,
            Signal::Source => &mut self.source,
            Signal::Model => &mut self.model,
        };
        *slot = weight;
        self
    }

    pub fn total(&self) -> f32 {
        Signal::ALL.iter().map(|s| self.get(*s)).sum()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for signal in Signal::ALL {
            let w = self.get(signal);
            if !w.is_finite() || w < 0.0 {
                return Err(ConfigError::InvalidWeights(format!(
                    "{} weight must be finite and non-negative, got {}",
                    signal, w
                )));
            }
        }
        if self.total() <= 0.0 {
            return Err(ConfigError::InvalidWeights(
                "weights sum to zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse `sentiment=0.1,clickbait=0.15,...`. Unlisted signals keep
    /// their default weight.
    pub fn parse(raw: &str) -> ConfigResult<Self> {
        let mut weights = Self::default();
        for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                ConfigError::InvalidWeights(format!("expected name=value, got '{}'", pair))
            })?;
            let signal = Signal::parse(name).ok_or_else(|| {
                ConfigError::InvalidWeights(format!("unknown signal '{}'", name.trim()))
            })?;
            let weight: f32 = value.trim().parse().map_err(|_| {
                ConfigError::InvalidWeights(format!("'{}' is not a number", value.trim()))
            })?;
            weights = weights.with(signal, weight);
        }
        weights.validate()?;
        Ok(weights)
    }
}

/// Which way a classifier label points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// The label's score is the probability the text is reliable
    Reliable,
    /// The label's score is the probability the text is unreliable
    Unreliable,
}

/// Maps classifier labels to polarity, so swapping models only needs a new
/// table. Labels are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "HashMap<String, Polarity>",
    into = "HashMap<String, Polarity>"
)]
pub struct LabelPolarity(HashMap<String, Polarity>);

impl From<HashMap<String, Polarity>> for LabelPolarity {
    fn from(map: HashMap<String, Polarity>) -> Self {
        map.into_iter()
            .fold(Self::empty(), |table, (label, polarity)| {
                table.with_label(label, polarity)
            })
    }
}

impl From<LabelPolarity> for HashMap<String, Polarity> {
    fn from(table: LabelPolarity) -> Self {
        table.0
    }
}

impl Default for LabelPolarity {
    fn default() -> Self {
        Self::empty()
            .with_label("real", Polarity::Reliable)
            .with_label("true", Polarity::Reliable)
            .with_label("reliable", Polarity::Reliable)
            .with_label("nothate", Polarity::Reliable)
            .with_label("not_hate", Polarity::Reliable)
            .with_label("fake", Polarity::Unreliable)
            .with_label("false", Polarity::Unreliable)
            .with_label("unreliable", Polarity::Unreliable)
            .with_label("hate", Polarity::Unreliable)
    }
}

impl LabelPolarity {
    /// A table with no labels.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    pub fn with_label(mut self, label: impl AsRef<str>, polarity: Polarity) -> Self {
        self.0.insert(normalize_label(label.as_ref()), polarity);
        self
    }

    pub fn polarity(&self, label: &str) -> Option<Polarity> {
        self.0.get(&normalize_label(label)).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Configuration for the analysis engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-signal aggregation weights.
    pub weights: SignalWeights,

    /// Ceiling on any single extractor, in milliseconds.
    ///
    /// A timed-out extractor is treated exactly like a failed one.
    /// Default: 5000.
    pub extractor_timeout_ms: u64,

    /// Ceiling on fetching an article by URL, in milliseconds.
    /// Default: 10000.
    pub fetch_timeout_ms: u64,

    /// Characters of text handed to the sentiment capability. Default: 512.
    pub sentiment_max_chars: usize,

    /// Characters of text handed to the external classifier. Default: 4096.
    pub classifier_max_chars: usize,

    /// Characters segmented for the complexity factor of the confidence
    /// estimate. Default: 1000.
    pub confidence_sample_chars: usize,

    /// Label vocabulary of the external classifier.
    pub classifier_labels: LabelPolarity,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: SignalWeights::default(),
            extractor_timeout_ms: 5_000,
            fetch_timeout_ms: 10_000,
            sentiment_max_chars: 512,
            classifier_max_chars: 4_096,
            confidence_sample_chars: 1_000,
            classifier_labels: LabelPolarity::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from `CREDIBILITY_*` environment variables.
    ///
    /// A `.env` file is read first if present.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Some(ms) = env_parse::<u64>("CREDIBILITY_EXTRACTOR_TIMEOUT_MS")? {
            config.extractor_timeout_ms = ms;
        }
        if let Some(ms) = env_parse::<u64>("CREDIBILITY_FETCH_TIMEOUT_MS")? {
            config.fetch_timeout_ms = ms;
        }
        if let Some(n) = env_parse::<usize>("CREDIBILITY_SENTIMENT_MAX_CHARS")? {
            config.sentiment_max_chars = n;
        }
        if let Some(n) = env_parse::<usize>("CREDIBILITY_CLASSIFIER_MAX_CHARS")? {
            config.classifier_max_chars = n;
        }
        if let Ok(raw) = env::var("CREDIBILITY_WEIGHTS") {
            config.weights = SignalWeights::parse(&raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_weights(mut self, weights: SignalWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Timeouts are stored in whole milliseconds, rounded up.
    pub fn with_extractor_timeout(mut self, timeout: Duration) -> Self {
        self.extractor_timeout_ms = ceil_millis(timeout);
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout_ms = ceil_millis(timeout);
        self
    }

    pub fn with_classifier_labels(mut self, labels: LabelPolarity) -> Self {
        self.classifier_labels = labels;
        self
    }

    pub fn with_sentiment_max_chars(mut self, n: usize) -> Self {
        self.sentiment_max_chars = n;
        self
    }

    pub fn with_classifier_max_chars(mut self, n: usize) -> Self {
        self.classifier_max_chars = n;
        self
    }

    pub fn extractor_timeout(&self) -> Duration {
        Duration::from_millis(self.extractor_timeout_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.weights.validate()?;
        if self.extractor_timeout_ms == 0 || self.fetch_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}

fn ceil_millis(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX)
}

fn env_parse<T: std::str::FromStr>(var: &str) -> ConfigResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidEnv {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

/// Truncate to at most `max_chars` characters on a char boundary.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

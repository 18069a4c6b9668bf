//! External classifier signal.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{ExtractorError, ExtractorResult};
use crate::traits::classifier::{Classification, TextClassifier};
use crate::traits::extractor::{SignalExtractor, SignalInput};
use crate::types::config::{truncate_chars, LabelPolarity, Polarity};
use crate::types::signals::{Signal, SignalScore};

pub const MODEL_REASON: &str = "Classifier flags the text as likely unreliable";

/// Scores below this carry [`MODEL_REASON`].
pub const MODEL_CONCERN_THRESHOLD: f32 = 0.5;

/// Convert a label and its probability into the probability the text is
/// reliable.
pub fn score_classification(
    classification: &Classification,
    labels: &LabelPolarity,
) -> ExtractorResult<SignalScore> {
    let p = classification.score;
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(ExtractorError::InvalidScore { value: p });
    }

    let reliable = match labels.polarity(&classification.label) {
        Some(Polarity::Reliable) => p,
        Some(Polarity::Unreliable) => 1.0 - p,
        None => {
            return Err(ExtractorError::UnknownLabel {
                label: classification.label.clone(),
            })
        }
    };

    let score = SignalScore::new(reliable);
    let concerning = score.score < MODEL_CONCERN_THRESHOLD;
    Ok(score.with_reason_if(concerning, MODEL_REASON))
}

pub struct ModelExtractor {
    classifier: Arc<dyn TextClassifier>,
    labels: LabelPolarity,
    max_chars: usize,
}

impl ModelExtractor {
    pub fn new(classifier: Arc<dyn TextClassifier>, labels: LabelPolarity, max_chars: usize) -> Self {
        Self {
            classifier,
            labels,
            max_chars,
        }
    }
}

#[async_trait]
impl SignalExtractor for ModelExtractor {
    fn signal(&self) -> Signal {
        Signal::Model
    }

    async fn extract(&self, input: &SignalInput) -> ExtractorResult<Option<SignalScore>> {
        let text = truncate_chars(&input.text, self.max_chars);
        let classification = self.classifier.classify(text).await?;
        tracing::debug!(
            classifier = self.classifier.name(),
            label = %classification.label,
            score = classification.score,
            "Classifier responded"
        );
        score_classification(&classification, &self.labels).map(Some)
    }
}

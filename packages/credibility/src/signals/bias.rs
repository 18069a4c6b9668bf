//! Bias signal: share of emotional and subjective words.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{ExtractorError, ExtractorResult};
use crate::traits::extractor::{SignalExtractor, SignalInput};
use crate::traits::nlp::{NlpBackend, NlpDocument, PosTag};
use crate::types::signals::{Signal, SignalScore};

pub const BIAS_REASON: &str = "Article relies on emotional or subjective language";

/// Scores below this carry [`BIAS_REASON`].
pub const BIAS_CONCERN_THRESHOLD: f32 = 0.75;

/// `1 - (emotional_ratio + pronoun_ratio) / 2`
pub fn score_bias(doc: &NlpDocument) -> ExtractorResult<SignalScore> {
    if doc.is_empty() {
        return Err(ExtractorError::EmptyInput);
    }

    let total = doc.len() as f32;
    let emotional_ratio = doc.count_pos(|p| p.is_emotional()) as f32 / total;
    let pronoun_ratio = doc.count_pos(|p| p == PosTag::Pron) as f32 / total;

    let score = SignalScore::new(1.0 - (emotional_ratio + pronoun_ratio) / 2.0);
    let concerning = score.score < BIAS_CONCERN_THRESHOLD;
    Ok(score.with_reason_if(concerning, BIAS_REASON))
}

pub struct BiasExtractor {
    nlp: Arc<dyn NlpBackend>,
}

impl BiasExtractor {
    pub fn new(nlp: Arc<dyn NlpBackend>) -> Self {
        Self { nlp }
    }
}

#[async_trait]
impl SignalExtractor for BiasExtractor {
    fn signal(&self) -> Signal {
        Signal::Bias
    }

    async fn extract(&self, input: &SignalInput) -> ExtractorResult<Option<SignalScore>> {
        let doc = self.nlp.parse(&input.text).await?;
        score_bias(&doc).map(Some)
    }
}

//! Factual density signal: names, numbers and dates per token.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{ExtractorError, ExtractorResult};
use crate::traits::extractor::{SignalExtractor, SignalInput};
use crate::traits::nlp::{NlpBackend, NlpDocument};
use crate::types::signals::{Signal, SignalScore};

pub const FACTUAL_REASON: &str = "Article contains few verifiable specifics";

/// Scores below this carry [`FACTUAL_REASON`].
pub const FACTUAL_CONCERN_THRESHOLD: f32 = 0.05;

/// `(entities + numeric/date/time tokens) / tokens`, capped at 1.0.
pub fn score_factual_density(doc: &NlpDocument) -> ExtractorResult<SignalScore> {
    if doc.is_empty() {
        return Err(ExtractorError::EmptyInput);
    }

    let specifics = doc
        .tokens
        .iter()
        .filter(|t| t.like_num || t.is_temporal())
        .count();
    let density = (doc.entities.len() + specifics) as f32 / doc.len() as f32;

    let score = SignalScore::new(density.min(1.0));
    let concerning = score.score < FACTUAL_CONCERN_THRESHOLD;
    Ok(score.with_reason_if(concerning, FACTUAL_REASON))
}

pub struct FactualExtractor {
    nlp: Arc<dyn NlpBackend>,
}

impl FactualExtractor {
    pub fn new(nlp: Arc<dyn NlpBackend>) -> Self {
        Self { nlp }
    }
}

#[async_trait]
impl SignalExtractor for FactualExtractor {
    fn signal(&self) -> Signal {
        Signal::Factual
    }

    async fn extract(&self, input: &SignalInput) -> ExtractorResult<Option<SignalScore>> {
        let doc = self.nlp.parse(&input.text).await?;
        score_factual_density(&doc).map(Some)
    }
}

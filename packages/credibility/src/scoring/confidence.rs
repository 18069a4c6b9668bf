//! Confidence estimation.
//!
//! Confidence measures how much evidence backs a verdict, independently of
//! what the verdict is. Each factor is in [0, 1]; the estimate is the mean
//! of whichever factors are available.

use crate::types::metadata::ArticleMetadata;

/// Characters of text for a full length factor.
pub const FULL_LENGTH_CHARS: f32 = 1000.0;
/// Average sentence length (tokens) for a full complexity factor.
pub const FULL_SENTENCE_TOKENS: f32 = 20.0;

/// The individual factors behind a confidence estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceFactors {
    pub length: f32,
    pub metadata: Option<f32>,
    pub complexity: Option<f32>,
}

impl ConfidenceFactors {
    /// Arithmetic mean of the available factors.
    pub fn mean(&self) -> f32 {
        let available: Vec<f32> = [Some(self.length), self.metadata, self.complexity]
            .into_iter()
            .flatten()
            .collect();
        // The length factor is always present.
        available.iter().sum::<f32>() / available.len() as f32
    }
}

/// Compute the factors for a text.
///
/// `sentence_lengths` is the token count of each sentence, or `None` when
/// segmentation was unavailable.
pub fn confidence_factors(
    char_count: usize,
    metadata: Option<&ArticleMetadata>,
    sentence_lengths: Option<&[usize]>,
) -> ConfidenceFactors {
    let length = (char_count as f32 / FULL_LENGTH_CHARS).min(1.0);
    let metadata = metadata.map(ArticleMetadata::completeness);
    let complexity = sentence_lengths
        .filter(|lengths| !lengths.is_empty())
        .map(|lengths| {
            let avg = lengths.iter().sum::<usize>() as f32 / lengths.len() as f32;
            (avg / FULL_SENTENCE_TOKENS).min(1.0)
        });

    ConfidenceFactors {
        length,
        metadata,
        complexity,
    }
}

/// Confidence in [0, 1].
pub fn estimate_confidence(
    char_count: usize,
    metadata: Option<&ArticleMetadata>,
    sentence_lengths: Option<&[usize]>,
) -> f32 {
    confidence_factors(char_count, metadata, sentence_lengths)
        .mean()
        .clamp(0.0, 1.0)
}

//! Sentiment balance signal.
//!
//! Strong polarity in either direction is treated as a sign of slant.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{ExtractorError, ExtractorResult};
use crate::traits::extractor::{SignalExtractor, SignalInput};
use crate::traits::sentiment::SentimentAnalyzer;
use crate::types::config::truncate_chars;
use crate::types::signals::{Signal, SignalScore};

pub const EXTREME_REASON: &str = "Article shows extreme sentiment bias";
pub const MODERATE_REASON: &str = "Article shows moderate sentiment bias";
pub const BALANCED_REASON: &str = "Article shows balanced sentiment";

const EXTREME_MAGNITUDE: f32 = 0.8;
const MODERATE_MAGNITUDE: f32 = 0.5;

/// Map a compound polarity in [-1, 1] to a balance score.
pub fn score_polarity(compound: f32) -> ExtractorResult<SignalScore> {
    if !compound.is_finite() || !(-1.0..=1.0).contains(&compound) {
        return Err(ExtractorError::InvalidScore { value: compound });
    }

    let magnitude = compound.abs();
    let score = if magnitude > EXTREME_MAGNITUDE {
        SignalScore::new(0.5).with_reason(EXTREME_REASON)
    } else if magnitude > MODERATE_MAGNITUDE {
        SignalScore::new(0.7).with_reason(MODERATE_REASON)
    } else {
        SignalScore::new(1.0).with_reason(BALANCED_REASON)
    };
    Ok(score)
}

pub struct SentimentExtractor {
    analyzer: Arc<dyn SentimentAnalyzer>,
    max_chars: usize,
}

impl SentimentExtractor {
    pub fn new(analyzer: Arc<dyn SentimentAnalyzer>, max_chars: usize) -> Self {
        Self {
            analyzer,
            max_chars,
        }
    }
}

#[async_trait]
impl SignalExtractor for SentimentExtractor {
    fn signal(&self) -> Signal {
        Signal::Sentiment
    }

    async fn extract(&self, input: &SignalInput) -> ExtractorResult<Option<SignalScore>> {
        let text = truncate_chars(&input.text, self.max_chars);
        let compound = self.analyzer.polarity(text).await?;
        score_polarity(compound).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSentiment;

    #[test]
    fn test_polarity_bands() {
        assert_eq!(score_polarity(0.95).unwrap().score, 0.5);
        assert_eq!(score_polarity(-0.85).unwrap().score, 0.5);
        assert_eq!(score_polarity(0.6).unwrap().score, 0.7);
        assert_eq!(score_polarity(-0.51).unwrap().score, 0.7);
        assert_eq!(score_polarity(0.5).unwrap().score, 1.0);
        assert_eq!(score_polarity(0.0).unwrap().score, 1.0);
        assert_eq!(
            score_polarity(0.8).unwrap().reason.as_deref(),
            Some(MODERATE_REASON)
        );
    }

    #[test]
    fn test_out_of_range_polarity_fails() {
        assert!(score_polarity(1.5).is_err());
        assert!(score_polarity(f32::NAN).is_err());
    }

    #[tokio::test]
    async fn test_extractor_truncates_input() {
        let analyzer = Arc::new(MockSentiment::fixed(-0.9));
        let extractor = SentimentExtractor::new(analyzer.clone(), 10);

        let score = extractor
            .extract(&SignalInput::new("a".repeat(50)))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(score.score, 0.5);
        assert_eq!(analyzer.seen_lengths(), vec![10]);
    }

    #[tokio::test]
    async fn test_extractor_propagates_failure() {
        let extractor = SentimentExtractor::new(Arc::new(MockSentiment::failing("offline")), 512);
        let err = extractor.extract(&SignalInput::new("text")).await.unwrap_err();
        assert!(matches!(err, ExtractorError::Unavailable(_)));
    }
}

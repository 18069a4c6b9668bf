//! Sentiment polarity capability.

use async_trait::async_trait;

use crate::error::ExtractorResult;

/// Produces a compound polarity for a text.
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Compound polarity in [-1, 1]: -1 most negative, 1 most positive.
    async fn polarity(&self, text: &str) -> ExtractorResult<f32>;
}

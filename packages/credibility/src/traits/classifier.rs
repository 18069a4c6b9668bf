//! External text classifier capability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ExtractorResult;

/// Output of a binary text classifier: the winning label and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub score: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// A binary fake/real (or hate/nothate) classifier.
///
/// The engine never interprets labels directly; it maps them through the
/// configured [`LabelPolarity`](crate::types::config::LabelPolarity) table.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classify text, returning the top label and its probability.
    async fn classify(&self, text: &str) -> ExtractorResult<Classification>;

    /// Short identifier used in logs.
    fn name(&self) -> &str {
        "classifier"
    }
}

//! The signal extractor seam.

use async_trait::async_trait;
use url::Url;

use crate::error::ExtractorResult;
use crate::types::metadata::ArticleMetadata;
use crate::types::signals::{Signal, SignalScore};

/// Read-only input shared by every extractor of one analysis.
#[derive(Debug, Clone)]
pub struct SignalInput {
    pub text: String,
    pub metadata: Option<ArticleMetadata>,
    pub url: Option<Url>,
}

impl SignalInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: None,
            url: None,
        }
    }

    pub fn with_metadata(mut self, metadata: ArticleMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Metadata title, or the first non-blank line of the text.
    pub fn title(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(ArticleMetadata::title)
            .or_else(|| self.text.lines().map(str::trim).find(|l| !l.is_empty()))
            .unwrap_or("")
    }
}

/// Turns the input into one signal's score.
///
/// `Ok(None)` means the signal does not apply to this input (it is omitted,
/// not defaulted). `Err` means the measurement failed; the engine omits the
/// signal and carries on.
#[async_trait]
pub trait SignalExtractor: Send + Sync {
    fn signal(&self) -> Signal;

    async fn extract(&self, input: &SignalInput) -> ExtractorResult<Option<SignalScore>>;
}

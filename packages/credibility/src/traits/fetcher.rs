//! Content fetcher capability.
//!
//! Fetching and article extraction are done upstream; the engine only
//! consumes the result.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::FetchResult;
use crate::types::metadata::ArticleMetadata;

/// Article text and metadata for a URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchedArticle {
    pub text: String,
    #[serde(default)]
    pub metadata: ArticleMetadata,
}

impl FetchedArticle {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: ArticleMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ArticleMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Check if the article has any text.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Fetches an article by URL.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedArticle>;
}

//! Analysis request and its validation rules.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AnalysisError, Result};

/// A single request to score a piece of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// The text to score
    pub content: String,

    /// Whether the text came from an article URL
    #[serde(default)]
    pub is_url: bool,

    /// Article URL, required when `is_url` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl AnalysisRequest {
    /// Raw text with no source URL.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_url: false,
            url: None,
        }
    }

    /// Article text fetched from `url`.
    pub fn article(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_url: true,
            url: Some(url.into()),
        }
    }

    /// Reject empty content and malformed URLs.
    ///
    /// Returns the parsed URL when the request carries one.
    pub fn validate(&self) -> Result<Option<Url>> {
        if self.content.trim().is_empty() {
            return Err(AnalysisError::invalid("content is empty"));
        }

        match (&self.url, self.is_url) {
            (Some(raw), _) => parse_article_url(raw).map(Some),
            (None, true) => Err(AnalysisError::invalid("is_url is set but no URL was given")),
            (None, false) => Ok(None),
        }
    }
}

/// Parse an absolute http(s) URL with a host.
pub fn parse_article_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AnalysisError::invalid(format!("malformed URL '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AnalysisError::invalid(format!(
            "unsupported URL scheme: {}",
            url.scheme()
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(AnalysisError::invalid(format!("URL has no host: {}", raw)));
    }

    Ok(url)
}

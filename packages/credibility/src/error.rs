//! Typed errors for the credibility engine.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell
//! user-correctable input errors apart from service degradation.

use std::time::Duration;

use thiserror::Error;

/// Errors that abort an analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The request was rejected before any extraction was attempted
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// The text to score could not be acquired upstream
    #[error("content extraction failed: {0}")]
    ExtractionFailed(#[from] FetchError),

    /// Every signal extractor failed or was not applicable
    #[error("no signals available to score the content")]
    NoSignalsAvailable,
}

impl AnalysisError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// True for errors the caller can fix by changing its input.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. } | Self::ExtractionFailed(_))
    }
}

/// Errors raised by a content fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or parsing failure
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// URL could not be parsed
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// The page was fetched but held no article text
    #[error("no article text at: {url}")]
    EmptyContent { url: String },

    /// Fetch did not complete in time
    #[error("timeout fetching: {url}")]
    Timeout { url: String },
}

/// Per-signal failures. Never fatal: the signal is omitted instead.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractorError {
    /// Backing capability (model, NLP pipeline, remote service) failed
    #[error("capability unavailable: {0}")]
    Unavailable(String),

    /// Nothing to measure (e.g. zero tokens)
    #[error("input has no measurable content")]
    EmptyInput,

    /// Classifier returned a label with no configured polarity
    #[error("unmapped classifier label: {label}")]
    UnknownLabel { label: String },

    /// Capability returned a score outside its documented range
    #[error("score out of range: {value}")]
    InvalidScore { value: f32 },

    /// Extractor exceeded its time budget
    #[error("timed out after {after:?}")]
    Timeout { after: Duration },

    /// Extractor task panicked
    #[error("extractor task panicked")]
    Panicked,
}

impl ExtractorError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Weights must be finite, non-negative and sum to something positive
    #[error("invalid signal weights: {0}")]
    InvalidWeights(String),

    /// Extractor and fetch timeouts must be non-zero
    #[error("timeouts must be greater than zero")]
    InvalidTimeout,

    /// Environment variable could not be parsed
    #[error("invalid value for {var}: {reason}")]
    InvalidEnv { var: String, reason: String },

    /// Reputation table could not be loaded
    #[error("reputation table error: {0}")]
    Reputation(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Result type alias for a single extractor.
pub type ExtractorResult<T> = std::result::Result<T, ExtractorError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for configuration.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

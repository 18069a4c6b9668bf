//! Signal-Based Credibility Scoring
//!
//! Scores a news article or a piece of text for reliability by combining
//! independent signals into one weighted verdict.
//!
//! # Design Philosophy
//!
//! **"Measure, don't guess"**
//!
//! - Each signal measures one property and fails on its own
//! - A signal that could not be measured is omitted, never defaulted
//! - Models and NLP pipelines are injected capabilities, not globals
//! - Library scores, app decides what to do with the score
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use credibility::{AnalysisRequest, Engine};
//! use credibility::backends::{HeuristicNlp, KeywordClassifier, LexiconSentiment};
//!
//! let engine = Engine::builder(
//!     Arc::new(LexiconSentiment::new()),
//!     Arc::new(HeuristicNlp::new()),
//!     Arc::new(KeywordClassifier::new()),
//! )
//! .build()?;
//!
//! let request = AnalysisRequest::article(text, "https://www.reuters.com/world/x");
//! let result = engine.analyze(&request, None).await?;
//!
//! println!("{} {:.2}", result.status(), result.reliability_score());
//! for reason in result.reasons() {
//!     println!("- {}", reason);
//! }
//! ```
//!
//! # Modules
//!
//! - [`engine`] - The facade: concurrent extraction, aggregation, verdict
//! - [`signals`] - The six signal extractors and their scoring functions
//! - [`scoring`] - Aggregation, confidence, status bands and reasons
//! - [`reputation`] - Domain reputation table
//! - [`traits`] - Capability seams (sentiment, NLP, classifier, fetcher)
//! - [`types`] - Requests, results, configuration
//! - [`backends`] - Built-in capability implementations
//! - [`testing`] - Mock implementations for testing

pub mod backends;
pub mod engine;
pub mod error;
pub mod reputation;
pub mod scoring;
pub mod signals;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "http")]
pub mod credentials;

// Re-export core types at crate root
pub use engine::{Engine, EngineBuilder};
pub use error::{AnalysisError, ConfigError, ExtractorError, FetchError, Result};
pub use reputation::{ReputationEntry, ReputationTable, Standing};
pub use scoring::{Reliability, VerificationStatus};
pub use traits::{
    classifier::{Classification, TextClassifier},
    extractor::{SignalExtractor, SignalInput},
    fetcher::{ContentFetcher, FetchedArticle},
    nlp::{Entity, NlpBackend, NlpDocument, PosTag, Sentence, Token},
    sentiment::SentimentAnalyzer,
};
pub use types::{
    config::{EngineConfig, LabelPolarity, Polarity, SignalWeights},
    metadata::ArticleMetadata,
    report::AnalysisReport,
    request::AnalysisRequest,
    result::{AnalysisResult, SignalFailure},
    signals::{Signal, SignalScore, SignalScores},
};

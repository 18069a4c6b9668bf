//! Capability backends shipped with the crate.
//!
//! - [`heuristic`] - rule-based NLP, sentiment and classifier, always built
//! - `http` - article fetcher and hosted classifier (feature `http`)

pub mod heuristic;

#[cfg(feature = "http")]
pub mod http;

pub use heuristic::{HeuristicNlp, KeywordClassifier, LexiconSentiment};

#[cfg(feature = "http")]
pub use http::{extract_article, HttpClassifier, HttpFetcher};

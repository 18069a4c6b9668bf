//! Capability traits the engine consumes.
//!
//! Models, NLP pipelines and fetchers are external collaborators. They are
//! constructed once by the application and injected as `Arc<dyn _>`.

pub mod classifier;
pub mod extractor;
pub mod fetcher;
pub mod nlp;
pub mod sentiment;

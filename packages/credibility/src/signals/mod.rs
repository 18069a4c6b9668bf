//! Signal extractors.
//!
//! Each extractor measures one property of the text independently of the
//! others. Pure scoring functions are exposed next to each extractor so the
//! arithmetic can be tested without any capability behind it.

pub mod bias;
pub mod clickbait;
pub mod factual;
pub mod model;
pub mod sentiment;
pub mod source;

pub use bias::{score_bias, BiasExtractor};
pub use clickbait::{analyze_clickbait, ClickbaitAnalysis, ClickbaitExtractor};
pub use factual::{score_factual_density, FactualExtractor};
pub use model::{score_classification, ModelExtractor};
pub use sentiment::{score_polarity, SentimentExtractor};
pub use source::{score_standing, SourceExtractor};

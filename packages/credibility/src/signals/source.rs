//! Source reputation signal.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::ExtractorResult;
use crate::reputation::{ReputationTable, Standing};
use crate::traits::extractor::{SignalExtractor, SignalInput};
use crate::types::signals::{Signal, SignalScore};

pub const RELIABLE_REASON: &str = "Domain is from a reliable news source";
pub const UNRELIABLE_REASON: &str = "Domain is known for spreading fake news";
pub const MIXED_REASON: &str = "Domain has a mixed reliability record";
pub const UNKNOWN_REASON: &str = "Domain is not in our known sources database";

pub fn score_standing(standing: Standing) -> SignalScore {
    let reason = match standing {
        Standing::Reliable => RELIABLE_REASON,
        Standing::Unreliable => UNRELIABLE_REASON,
        Standing::Mixed(_) => MIXED_REASON,
        Standing::Unknown => UNKNOWN_REASON,
    };
    SignalScore::new(standing.score()).with_reason(reason)
}

pub struct SourceExtractor {
    table: Arc<ReputationTable>,
}

impl SourceExtractor {
    pub fn new(table: Arc<ReputationTable>) -> Self {
        Self { table }
    }
}

#[async_trait]
impl SignalExtractor for SourceExtractor {
    fn signal(&self) -> Signal {
        Signal::Source
    }

    /// Not applicable without a URL.
    async fn extract(&self, input: &SignalInput) -> ExtractorResult<Option<SignalScore>> {
        Ok(input
            .url
            .as_ref()
            .map(|url| score_standing(self.table.standing_for_url(url))))
    }
}

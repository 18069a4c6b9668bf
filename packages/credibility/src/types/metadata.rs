//! Article metadata produced by an upstream fetcher.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about a fetched article. Every field is optional; missing
/// fields lower confidence but are never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_domain: Option<String>,
}

impl ArticleMetadata {
    /// Number of fields counted towards completeness.
    pub const FIELD_COUNT: usize = 6;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    pub fn with_publish_date(mut self, date: DateTime<Utc>) -> Self {
        self.publish_date = Some(date);
        self
    }

    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keywords = keywords.into_iter().map(|k| k.into()).collect();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_source_domain(mut self, domain: impl Into<String>) -> Self {
        self.source_domain = Some(domain.into());
        self
    }

    /// Count of fields carrying a non-blank value.
    pub fn filled_fields(&self) -> usize {
        let text_filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        let list_filled = |v: &[String]| v.iter().any(|s| !s.trim().is_empty());

        [
            text_filled(&self.title),
            list_filled(&self.authors),
            self.publish_date.is_some(),
            list_filled(&self.keywords),
            text_filled(&self.summary),
            text_filled(&self.source_domain),
        ]
        .into_iter()
        .filter(|filled| *filled)
        .count()
    }

    /// Fraction of non-empty fields, in [0, 1].
    pub fn completeness(&self) -> f32 {
        self.filled_fields() as f32 / Self::FIELD_COUNT as f32
    }

    /// Title with surrounding whitespace removed, if non-blank.
    pub fn title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

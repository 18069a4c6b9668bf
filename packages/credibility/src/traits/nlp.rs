//! NLP pipeline capability: tokenization, part-of-speech tagging, named
//! entity recognition and sentence segmentation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ExtractorResult;

/// Coarse universal part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Adj,
    Adv,
    Pron,
    Noun,
    Propn,
    Verb,
    Num,
    Det,
    Adp,
    Punct,
    Other,
}

impl PosTag {
    /// Adjectives and adverbs carry most emotional coloring.
    pub fn is_emotional(&self) -> bool {
        matches!(self, PosTag::Adj | PosTag::Adv)
    }
}

/// One token of a parsed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub pos: PosTag,
    /// Looks like a number ("42", "3.5", "seven")
    #[serde(default)]
    pub like_num: bool,
    /// Entity label this token belongs to, if any ("DATE", "PERSON", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl Token {
    pub fn new(text: impl Into<String>, pos: PosTag) -> Self {
        Self {
            text: text.into(),
            pos,
            like_num: false,
            entity: None,
        }
    }

    pub fn numeric(mut self) -> Self {
        self.like_num = true;
        self
    }

    pub fn with_entity(mut self, label: impl Into<String>) -> Self {
        self.entity = Some(label.into());
        self
    }

    /// Part of a DATE or TIME entity.
    pub fn is_temporal(&self) -> bool {
        matches!(self.entity.as_deref(), Some("DATE") | Some("TIME"))
    }
}

/// A named entity span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// A sentence as a half-open span of token indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub start: usize,
    pub end: usize,
}

impl Sentence {
    pub fn token_count(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// A parsed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NlpDocument {
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

impl NlpDocument {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn count_pos(&self, pred: impl Fn(PosTag) -> bool) -> usize {
        self.tokens.iter().filter(|t| pred(t.pos)).count()
    }

    /// Token count of each sentence.
    pub fn sentence_lengths(&self) -> Vec<usize> {
        self.sentences.iter().map(Sentence::token_count).collect()
    }
}

/// An NLP pipeline.
#[async_trait]
pub trait NlpBackend: Send + Sync {
    /// Tokenize, tag, find entities and split sentences.
    async fn parse(&self, text: &str) -> ExtractorResult<NlpDocument>;
}

//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the engine without
//! loading models or making network calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{ExtractorError, ExtractorResult, FetchError, FetchResult};
use crate::traits::{
    classifier::{Classification, TextClassifier},
    extractor::{SignalExtractor, SignalInput},
    fetcher::{ContentFetcher, FetchedArticle},
    nlp::{NlpBackend, NlpDocument},
    sentiment::SentimentAnalyzer,
};
use crate::types::signals::{Signal, SignalScore};

/// How a mock capability responds.
#[derive(Debug, Clone)]
enum Behavior<T> {
    Respond(T),
    Fail(String),
}

impl<T: Clone> Behavior<T> {
    fn respond(&self) -> ExtractorResult<T> {
        match self {
            Behavior::Respond(value) => Ok(value.clone()),
            Behavior::Fail(message) => Err(ExtractorError::Unavailable(message.clone())),
        }
    }
}

async fn pause(delay: Option<Duration>) {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

/// Mock sentiment analyzer returning a fixed polarity.
#[derive(Clone)]
pub struct MockSentiment {
    behavior: Behavior<f32>,
    delay: Option<Duration>,
    /// Length in chars of every text received
    seen: Arc<RwLock<Vec<usize>>>,
}

impl MockSentiment {
    pub fn fixed(polarity: f32) -> Self {
        Self {
            behavior: Behavior::Respond(polarity),
            delay: None,
            seen: Arc::default(),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Fail(message.into()),
            ..Self::fixed(0.0)
        }
    }

    /// Sleep before responding.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn seen_lengths(&self) -> Vec<usize> {
        self.seen.read().unwrap().clone()
    }
}

#[async_trait]
impl SentimentAnalyzer for MockSentiment {
    async fn polarity(&self, text: &str) -> ExtractorResult<f32> {
        self.seen.write().unwrap().push(text.chars().count());
        pause(self.delay).await;
        self.behavior.respond()
    }
}

/// Mock NLP pipeline returning a fixed document.
#[derive(Clone)]
pub struct MockNlp {
    behavior: Behavior<NlpDocument>,
    calls: Arc<RwLock<usize>>,
}

impl MockNlp {
    pub fn fixed(doc: NlpDocument) -> Self {
        Self {
            behavior: Behavior::Respond(doc),
            calls: Arc::default(),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Fail(message.into()),
            calls: Arc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.read().unwrap()
    }
}

#[async_trait]
impl NlpBackend for MockNlp {
    async fn parse(&self, _text: &str) -> ExtractorResult<NlpDocument> {
        *self.calls.write().unwrap() += 1;
        self.behavior.respond()
    }
}

/// Mock text classifier returning a fixed label and score.
#[derive(Clone)]
pub struct MockClassifier {
    behavior: Behavior<Classification>,
    delay: Option<Duration>,
    calls: Arc<RwLock<Vec<usize>>>,
}

impl MockClassifier {
    pub fn fixed(label: impl Into<String>, score: f32) -> Self {
        Self {
            behavior: Behavior::Respond(Classification::new(label, score)),
            delay: None,
            calls: Arc::default(),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Fail(message.into()),
            ..Self::fixed("", 0.0)
        }
    }

    /// Sleep before responding, e.g. to exercise the extractor timeout.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Length in chars of every text received.
    pub fn seen_lengths(&self) -> Vec<usize> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl TextClassifier for MockClassifier {
    async fn classify(&self, text: &str) -> ExtractorResult<Classification> {
        self.calls.write().unwrap().push(text.chars().count());
        pause(self.delay).await;
        self.behavior.respond()
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock fetcher serving canned articles by URL.
#[derive(Clone, Default)]
pub struct MockFetcher {
    articles: Arc<RwLock<HashMap<String, FetchedArticle>>>,
    calls: Arc<RwLock<Vec<String>>>,
    delay: Option<Duration>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `article` for `url`. Unknown URLs fail with an HTTP error.
    pub fn with_article(self, url: impl Into<String>, article: FetchedArticle) -> Self {
        self.articles.write().unwrap().insert(url.into(), article);
        self
    }

    /// Sleep before responding, e.g. to exercise the fetch timeout.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ContentFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedArticle> {
        self.calls.write().unwrap().push(url.to_string());
        pause(self.delay).await;
        self.articles
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Http(format!("404 Not Found: {}", url).into()))
    }
}

/// Extractor that always returns the same score.
pub struct FixedExtractor {
    signal: Signal,
    score: SignalScore,
}

impl FixedExtractor {
    pub fn new(signal: Signal, score: f32) -> Self {
        Self {
            signal,
            score: SignalScore::new(score),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.score = self.score.with_reason(reason);
        self
    }
}

#[async_trait]
impl SignalExtractor for FixedExtractor {
    fn signal(&self) -> Signal {
        self.signal
    }

    async fn extract(&self, _input: &SignalInput) -> ExtractorResult<Option<SignalScore>> {
        Ok(Some(self.score.clone()))
    }
}

/// Extractor that always fails.
pub struct FailingExtractor {
    signal: Signal,
    error: ExtractorError,
}

impl FailingExtractor {
    pub fn new(signal: Signal) -> Self {
        Self {
            signal,
            error: ExtractorError::Unavailable("backend unreachable".to_string()),
        }
    }

    pub fn with_error(mut self, error: ExtractorError) -> Self {
        self.error = error;
        self
    }
}

#[async_trait]
impl SignalExtractor for FailingExtractor {
    fn signal(&self) -> Signal {
        self.signal
    }

    async fn extract(&self, _input: &SignalInput) -> ExtractorResult<Option<SignalScore>> {
        Err(self.error.clone())
    }
}

/// Extractor that panics, for exercising task isolation.
pub struct PanickingExtractor {
    signal: Signal,
}

impl PanickingExtractor {
    pub fn new(signal: Signal) -> Self {
        Self { signal }
    }
}

#[async_trait]
impl SignalExtractor for PanickingExtractor {
    fn signal(&self) -> Signal {
        self.signal
    }

    async fn extract(&self, _input: &SignalInput) -> ExtractorResult<Option<SignalScore>> {
        panic!("extractor for {} blew up", self.signal)
    }
}

//! The Engine - main entry point for scoring text.
//!
//! One call to [`Engine::analyze`] fans the input out to every signal
//! extractor concurrently, bounds each with the configured timeout, and folds
//! whatever came back into a single [`AnalysisResult`]. A failed, panicked or
//! timed-out extractor drops its signal; the remaining weights renormalize.

use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::error::{AnalysisError, ConfigResult, ExtractorError, ExtractorResult, FetchError, Result};
use crate::reputation::ReputationTable;
use crate::scoring::{aggregate, compose_reasons, estimate_confidence};
use crate::signals::{
    BiasExtractor, ClickbaitExtractor, FactualExtractor, ModelExtractor, SentimentExtractor,
    SourceExtractor,
};
use crate::traits::{
    classifier::TextClassifier,
    extractor::{SignalExtractor, SignalInput},
    fetcher::ContentFetcher,
    nlp::NlpBackend,
    sentiment::SentimentAnalyzer,
};
use crate::types::{
    config::{truncate_chars, EngineConfig},
    metadata::ArticleMetadata,
    request::{parse_article_url, AnalysisRequest},
    result::{AnalysisResult, SignalFailure},
    signals::{Signal, SignalScore, SignalScores},
};

type Outcome = (Signal, ExtractorResult<Option<SignalScore>>);

/// Scores text for reliability.
///
/// Stateless between calls apart from the shared reputation table, so one
/// engine can serve any number of concurrent requests.
///
/// # Example
///
/// ```rust,ignore
/// let engine = Engine::builder(sentiment, nlp, classifier)
///     .with_config(EngineConfig::from_env()?)
///     .build()?;
///
/// let result = engine
///     .analyze(&AnalysisRequest::text("Officials confirmed..."), None)
///     .await?;
/// println!("{} ({:.2})", result.status(), result.reliability_score());
/// ```
pub struct Engine {
    extractors: Vec<Arc<dyn SignalExtractor>>,
    nlp: Arc<dyn NlpBackend>,
    reputation: Arc<ReputationTable>,
    config: EngineConfig,
}

impl Engine {
    /// Start building an engine over the three external capabilities.
    pub fn builder(
        sentiment: Arc<dyn SentimentAnalyzer>,
        nlp: Arc<dyn NlpBackend>,
        classifier: Arc<dyn TextClassifier>,
    ) -> EngineBuilder {
        EngineBuilder {
            sentiment,
            nlp,
            classifier,
            reputation: Arc::new(ReputationTable::default()),
            config: EngineConfig::default(),
            overrides: HashMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared reputation table. Replacing its contents affects subsequent
    /// analyses without rebuilding the engine.
    pub fn reputation(&self) -> &Arc<ReputationTable> {
        &self.reputation
    }

    /// Signals this engine extracts, in canonical order.
    pub fn signals(&self) -> Vec<Signal> {
        self.extractors.iter().map(|e| e.signal()).collect()
    }

    /// Score one request.
    ///
    /// Fails only on an invalid request or when no signal could be
    /// computed; individual extractor failures are logged and recorded in
    /// [`AnalysisResult::omitted`].
    #[instrument(skip_all, fields(content_len = request.content.len(), is_url = request.is_url))]
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
        metadata: Option<&ArticleMetadata>,
    ) -> Result<AnalysisResult> {
        let url = request.validate()?;

        let input = Arc::new(SignalInput {
            text: request.content.clone(),
            metadata: metadata.cloned(),
            url,
        });

        let (outcomes, sentence_lengths) =
            tokio::join!(self.run_extractors(&input), self.sentence_lengths(&input.text));

        let mut breakdown = SignalScores::new();
        let mut omitted = Vec::new();
        for (signal, outcome) in outcomes {
            match outcome {
                Ok(Some(score)) => breakdown.set(signal, score),
                Ok(None) => debug!(signal = %signal, "Signal not applicable"),
                Err(e) => {
                    warn!(signal = %signal, error = %e, "Signal extraction failed");
                    omitted.push(SignalFailure {
                        signal,
                        error: e.to_string(),
                    });
                }
            }
        }

        let aggregate = aggregate(&breakdown, &self.config.weights).map_err(|e| {
            warn!(failed = omitted.len(), "No signal could be computed");
            e
        })?;

        let confidence = estimate_confidence(
            input.text.chars().count(),
            metadata,
            sentence_lengths.as_deref(),
        );
        let reasons = compose_reasons(&breakdown);
        let result = AnalysisResult::new(aggregate.score, confidence, reasons, breakdown, omitted);

        info!(
            id = %result.id(),
            score = result.reliability_score(),
            confidence = result.confidence(),
            status = %result.status(),
            signals = result.breakdown().len(),
            omitted = result.omitted().len(),
            "Analysis complete"
        );
        Ok(result)
    }

    /// Fetch an article and score it.
    ///
    /// The fetched metadata feeds the confidence estimate; the URL feeds
    /// the source signal.
    #[instrument(skip(self, fetcher), fields(url = %url))]
    pub async fn analyze_url(&self, fetcher: &dyn ContentFetcher, url: &str) -> Result<AnalysisResult> {
        parse_article_url(url)?;

        let timeout = self.config.fetch_timeout();
        let article = tokio::time::timeout(timeout, fetcher.fetch(url))
            .await
            .map_err(|_| FetchError::Timeout { url: url.to_string() })??;

        if !article.has_content() {
            return Err(AnalysisError::from(FetchError::EmptyContent {
                url: url.to_string(),
            }));
        }

        debug!(chars = article.text.len(), "Fetched article");
        let request = AnalysisRequest::article(article.text, url);
        self.analyze(&request, Some(&article.metadata)).await
    }

    /// Run every extractor on its own task, each bounded by the timeout.
    async fn run_extractors(&self, input: &Arc<SignalInput>) -> Vec<Outcome> {
        let timeout = self.config.extractor_timeout();

        let tasks = self.extractors.iter().map(|extractor| {
            let signal = extractor.signal();
            let extractor = Arc::clone(extractor);
            let input = Arc::clone(input);

            async move {
                let mut handle = tokio::spawn(async move { extractor.extract(&input).await });

                let outcome = match tokio::time::timeout(timeout, &mut handle).await {
                    Ok(Ok(result)) => result,
                    Ok(Err(join_error)) if join_error.is_panic() => Err(ExtractorError::Panicked),
                    Ok(Err(join_error)) => Err(ExtractorError::unavailable(join_error)),
                    Err(_) => {
                        handle.abort();
                        Err(ExtractorError::Timeout { after: timeout })
                    }
                };
                (signal, outcome)
            }
        });

        join_all(tasks).await
    }

    /// Sentence lengths of the leading sample, for the complexity factor.
    async fn sentence_lengths(&self, text: &str) -> Option<Vec<usize>> {
        let sample = truncate_chars(text, self.config.confidence_sample_chars);

        match tokio::time::timeout(self.config.extractor_timeout(), self.nlp.parse(sample)).await {
            Ok(Ok(doc)) => Some(doc.sentence_lengths()),
            Ok(Err(e)) => {
                debug!(error = %e, "Sentence segmentation unavailable");
                None
            }
            Err(_) => {
                debug!("Sentence segmentation timed out");
                None
            }
        }
    }
}

/// Builder for [`Engine`].
pub struct EngineBuilder {
    sentiment: Arc<dyn SentimentAnalyzer>,
    nlp: Arc<dyn NlpBackend>,
    classifier: Arc<dyn TextClassifier>,
    reputation: Arc<ReputationTable>,
    config: EngineConfig,
    overrides: HashMap<Signal, Arc<dyn SignalExtractor>>,
}

impl EngineBuilder {
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Share a reputation table with other owners.
    pub fn with_reputation(mut self, reputation: Arc<ReputationTable>) -> Self {
        self.reputation = reputation;
        self
    }

    /// Replace the built-in extractor for `extractor.signal()`.
    pub fn with_extractor(mut self, extractor: impl SignalExtractor + 'static) -> Self {
        self.overrides.insert(extractor.signal(), Arc::new(extractor));
        self
    }

    pub fn build(mut self) -> ConfigResult<Engine> {
        self.config.validate()?;

        let extractors = Signal::ALL
            .iter()
            .map(|signal| match self.overrides.remove(signal) {
                Some(extractor) => extractor,
                None => self.default_extractor(*signal),
            })
            .collect();

        Ok(Engine {
            extractors,
            nlp: self.nlp,
            reputation: self.reputation,
            config: self.config,
        })
    }

    fn default_extractor(&self, signal: Signal) -> Arc<dyn SignalExtractor> {
        match signal {
            Signal::Sentiment => Arc::new(SentimentExtractor::new(
                Arc::clone(&self.sentiment),
                self.config.sentiment_max_chars,
            )),
            Signal::Clickbait => Arc::new(ClickbaitExtractor::new()),
            Signal::Bias => Arc::new(BiasExtractor::new(Arc::clone(&self.nlp))),
            Signal::Factual => Arc::new(FactualExtractor::new(Arc::clone(&self.nlp))),
            Signal::Source => Arc::new(SourceExtractor::new(Arc::clone(&self.reputation))),
            Signal::Model => Arc::new(ModelExtractor::new(
                Arc::clone(&self.classifier),
                self.config.classifier_labels.clone(),
                self.config.classifier_max_chars,
            )),
        }
    }
}

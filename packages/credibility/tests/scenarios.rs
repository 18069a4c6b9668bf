//! End-to-end analyses through the public API.

use std::sync::Arc;
use std::time::Duration;

use credibility::backends::{HeuristicNlp, KeywordClassifier, LexiconSentiment};
use credibility::signals::clickbait::PATTERN_REASON;
use credibility::signals::source::{RELIABLE_REASON, UNKNOWN_REASON};
use credibility::testing::{
    FailingExtractor, FixedExtractor, MockClassifier, MockFetcher, MockNlp, MockSentiment,
    PanickingExtractor,
};
use credibility::{
    AnalysisError, AnalysisRequest, ArticleMetadata, Engine, EngineBuilder, EngineConfig,
    ExtractorError, FetchError, FetchedArticle, NlpDocument, PosTag, Sentence, Signal, Token,
    VerificationStatus,
};

/// A small parsed document: one 10-token sentence, a name and a number.
fn sample_doc() -> NlpDocument {
    let mut tokens = vec![Token::new("word", PosTag::Noun); 7];
    tokens.push(Token::new("Alice", PosTag::Propn).with_entity("NAME"));
    tokens.push(Token::new("12", PosTag::Num).numeric());
    tokens.push(Token::new(".", PosTag::Punct));
    NlpDocument {
        tokens,
        entities: vec![credibility::Entity::new("Alice", "NAME")],
        sentences: vec![Sentence { start: 0, end: 10 }],
    }
}

fn mock_builder() -> EngineBuilder {
    Engine::builder(
        Arc::new(MockSentiment::fixed(0.1)),
        Arc::new(MockNlp::fixed(sample_doc())),
        Arc::new(MockClassifier::fixed("REAL", 0.9)),
    )
}

fn heuristic_engine() -> Engine {
    Engine::builder(
        Arc::new(LexiconSentiment::new()),
        Arc::new(HeuristicNlp::new()),
        Arc::new(KeywordClassifier::new()),
    )
    .build()
    .unwrap()
}

fn long_text(chars: usize) -> String {
    "Officials reported steady figures. ".repeat(chars / 35 + 1)[..chars].to_string()
}

#[tokio::test]
async fn test_well_sourced_text_without_url_is_verified() {
    let engine = mock_builder()
        .with_extractor(FixedExtractor::new(Signal::Sentiment, 0.9))
        .with_extractor(FixedExtractor::new(Signal::Clickbait, 1.0))
        .with_extractor(FixedExtractor::new(Signal::Bias, 0.8))
        .with_extractor(FixedExtractor::new(Signal::Factual, 0.7))
        .with_extractor(FixedExtractor::new(Signal::Model, 0.85))
        .build()
        .unwrap();

    let text = long_text(1200);
    assert_eq!(text.chars().count(), 1200);

    let result = engine.analyze(&AnalysisRequest::text(text), None).await.unwrap();

    // (.09 + .15 + .16 + .175 + .1275) / .85
    assert!((result.reliability_score() - 0.8265).abs() < 1e-3);
    assert_eq!(result.status(), VerificationStatus::Verified);
    assert!(result.is_reliable());
    assert!(result.breakdown().get(Signal::Source).is_none());
    assert!(result.omitted().is_empty());
    assert!(result.reasons().is_empty());
    // Length factor is 1.0, complexity 10/20.
    assert!((result.confidence() - 0.75).abs() < 1e-6);
}

#[tokio::test]
async fn test_clickbait_title_lowers_score_and_explains() {
    let engine = heuristic_engine();
    let metadata = ArticleMetadata::new().with_title("SHOCKING!!! You won't believe what happened");
    let request = AnalysisRequest::text("The council met on Tuesday and approved the budget.");

    let result = engine.analyze(&request, Some(&metadata)).await.unwrap();

    let clickbait = result.breakdown().get(Signal::Clickbait).unwrap();
    assert!((clickbait.score - 5.0 / 7.0).abs() < 1e-4);
    assert!(result.reasons().iter().any(|r| r == PATTERN_REASON));
}

#[tokio::test]
async fn test_unknown_domain_and_slow_classifier() {
    let engine = Engine::builder(
        Arc::new(MockSentiment::fixed(0.1)),
        Arc::new(MockNlp::fixed(sample_doc())),
        Arc::new(MockClassifier::fixed("REAL", 0.9).with_delay(Duration::from_secs(5))),
    )
    .with_config(EngineConfig::default().with_extractor_timeout(Duration::from_millis(50)))
    .build()
    .unwrap();

    let request = AnalysisRequest::article(
        "The council met on Tuesday.",
        "https://unknown-news.example/story",
    );
    let result = engine.analyze(&request, None).await.unwrap();

    assert_eq!(result.breakdown().get(Signal::Source).unwrap().score, 0.5);
    assert!(result.breakdown().get(Signal::Model).is_none());

    let model = result
        .omitted()
        .iter()
        .find(|f| f.signal == Signal::Model)
        .unwrap();
    assert_eq!(
        model.error,
        ExtractorError::Timeout {
            after: Duration::from_millis(50)
        }
        .to_string()
    );
    assert_eq!(result.reasons()[0], UNKNOWN_REASON);
}

#[tokio::test]
async fn test_every_extractor_failing_is_no_signals() {
    let engine = Engine::builder(
        Arc::new(MockSentiment::failing("model not loaded")),
        Arc::new(MockNlp::failing("pipeline down")),
        Arc::new(MockClassifier::failing("endpoint 503")),
    )
    .with_extractor(FailingExtractor::new(Signal::Clickbait))
    .build()
    .unwrap();

    let err = engine
        .analyze(&AnalysisRequest::text("Anything at all."), None)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::NoSignalsAvailable));
    assert!(!err.is_user_error());
}

#[tokio::test]
async fn test_panicking_extractor_is_isolated() {
    let engine = mock_builder()
        .with_extractor(PanickingExtractor::new(Signal::Bias))
        .build()
        .unwrap();

    let result = engine
        .analyze(&AnalysisRequest::text("Alice counted 12 ballots."), None)
        .await
        .unwrap();

    assert!(result.breakdown().get(Signal::Bias).is_none());
    let failure = result.omitted().iter().find(|f| f.signal == Signal::Bias).unwrap();
    assert_eq!(failure.error, ExtractorError::Panicked.to_string());
    assert!(result.breakdown().get(Signal::Model).is_some());
}

#[tokio::test]
async fn test_invalid_requests_are_rejected() {
    let engine = mock_builder().build().unwrap();

    for request in [
        AnalysisRequest::text(""),
        AnalysisRequest::article("Body", "not a url"),
        AnalysisRequest::article("Body", "ftp://files.example/x"),
        AnalysisRequest {
            content: "Body".into(),
            is_url: true,
            url: None,
        },
    ] {
        let err = engine.analyze(&request, None).await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRequest { .. }), "{:?}", request);
        assert!(err.is_user_error());
    }
}

#[tokio::test]
async fn test_repeated_analysis_is_deterministic() {
    let engine = heuristic_engine();
    let metadata = ArticleMetadata::new().with_title("10 things you must see");
    let request = AnalysisRequest::article(
        "You won't believe this shocking, outrageous story. They are lying to you!",
        "https://www.hoax.example/a",
    );

    let first = engine.analyze(&request, Some(&metadata)).await.unwrap();
    let second = engine.analyze(&request, Some(&metadata)).await.unwrap();

    assert_eq!(first.reliability_score(), second.reliability_score());
    assert_eq!(first.reasons(), second.reasons());
    assert_eq!(first.breakdown(), second.breakdown());
    assert_ne!(first.id(), second.id());
}

#[tokio::test]
async fn test_inputs_are_truncated_per_capability() {
    let sentiment = MockSentiment::fixed(0.0);
    let classifier = MockClassifier::fixed("REAL", 0.9);
    let engine = Engine::builder(
        Arc::new(sentiment.clone()),
        Arc::new(MockNlp::fixed(sample_doc())),
        Arc::new(classifier.clone()),
    )
    .build()
    .unwrap();

    engine
        .analyze(&AnalysisRequest::text(long_text(6000)), None)
        .await
        .unwrap();

    assert_eq!(sentiment.seen_lengths(), vec![512]);
    assert_eq!(classifier.seen_lengths(), vec![4096]);
}

#[tokio::test]
async fn test_reputation_swap_applies_to_next_analysis() {
    let engine = mock_builder().build().unwrap();
    let request = AnalysisRequest::article("Report text.", "https://www.reuters.com/world/a");

    let before = engine.analyze(&request, None).await.unwrap();
    assert_eq!(before.breakdown().get(Signal::Source).unwrap().score, 1.0);
    assert!(!before.reasons().iter().any(|r| r == RELIABLE_REASON));

    engine.reputation().replace(Vec::new());

    let after = engine.analyze(&request, None).await.unwrap();
    assert_eq!(after.breakdown().get(Signal::Source).unwrap().score, 0.5);
    assert!(after.reliability_score() < before.reliability_score());
}

#[tokio::test]
async fn test_analyze_url_uses_fetched_article() {
    let url = "https://apnews.com/article/budget";
    let fetcher = MockFetcher::new().with_article(
        url,
        FetchedArticle::new("The council approved the budget on Tuesday.").with_metadata(
            ArticleMetadata::new()
                .with_title("Council approves budget")
                .with_author("Ana Ruiz"),
        ),
    );
    let engine = mock_builder().build().unwrap();

    let result = engine.analyze_url(&fetcher, url).await.unwrap();

    assert_eq!(fetcher.calls(), vec![url.to_string()]);
    assert_eq!(result.breakdown().get(Signal::Source).unwrap().score, 1.0);
    assert_eq!(result.breakdown().len(), 6);
}

#[tokio::test]
async fn test_analyze_url_failures() {
    let engine = mock_builder().build().unwrap();
    let fetcher = MockFetcher::new()
        .with_article("https://blank.example/a", FetchedArticle::new("   "));

    let invalid = engine.analyze_url(&fetcher, "notaurl").await.unwrap_err();
    assert!(matches!(invalid, AnalysisError::InvalidRequest { .. }));
    assert!(fetcher.calls().is_empty());

    let missing = engine
        .analyze_url(&fetcher, "https://missing.example/a")
        .await
        .unwrap_err();
    assert!(matches!(missing, AnalysisError::ExtractionFailed(FetchError::Http(_))));

    let empty = engine
        .analyze_url(&fetcher, "https://blank.example/a")
        .await
        .unwrap_err();
    assert!(matches!(
        empty,
        AnalysisError::ExtractionFailed(FetchError::EmptyContent { .. })
    ));
}

#[tokio::test]
async fn test_heuristic_backends_cover_every_signal() {
    let engine = heuristic_engine();
    let metadata = ArticleMetadata::new()
        .with_title("Council approves transit budget")
        .with_author("Ana Ruiz")
        .with_keywords(["transit", "budget"]);
    let request = AnalysisRequest::article(
        "The city council voted 7-2 on Tuesday to approve a $40 million transit budget, \
         according to officials. Mayor Jane Smith said construction would begin in March 2025.",
        "https://www.reuters.com/world/us/transit",
    );

    let result = engine.analyze(&request, Some(&metadata)).await.unwrap();

    assert_eq!(result.breakdown().len(), 6, "{:?}", result.omitted());
    assert!(result.omitted().is_empty());
    assert_eq!(result.breakdown().get(Signal::Clickbait).unwrap().score, 1.0);
    assert!(result.is_reliable(), "score {}", result.reliability_score());
}

#[tokio::test]
async fn test_slow_fetch_hits_fetch_timeout() {
    let url = "https://apnews.com/article/slow";
    let fetcher = MockFetcher::new()
        .with_article(url, FetchedArticle::new("The council approved the budget."))
        .with_delay(Duration::from_secs(5));
    let engine = mock_builder()
        .with_config(EngineConfig::default().with_fetch_timeout(Duration::from_millis(50)))
        .build()
        .unwrap();

    let err = engine.analyze_url(&fetcher, url).await.unwrap_err();

    match err {
        AnalysisError::ExtractionFailed(FetchError::Timeout { url: timed_out }) => {
            assert_eq!(timed_out, url)
        }
        other => panic!("expected fetch timeout, got {:?}", other),
    }
    assert_eq!(fetcher.calls(), vec![url.to_string()]);
}

#[tokio::test]
async fn test_source_is_scored_on_requested_url_not_fetched_domain() {
    let url = "https://apnews.com/article/moved";
    let fetcher = MockFetcher::new().with_article(
        url,
        FetchedArticle::new("The council approved the budget on Tuesday.")
            .with_metadata(ArticleMetadata::new().with_source_domain("mirror.example")),
    );
    let engine = mock_builder().build().unwrap();

    let result = engine.analyze_url(&fetcher, url).await.unwrap();

    assert_eq!(result.breakdown().get(Signal::Source).unwrap().score, 1.0);
}

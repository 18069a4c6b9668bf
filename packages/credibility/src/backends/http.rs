//! HTTP-backed capabilities: an article fetcher and a hosted classifier.
//!
//! Both are thin: HTML is reduced to paragraph text with regexes and the
//! classifier speaks the common `{"inputs": text}` inference protocol. Neither
//! retries; the engine's timeouts bound them.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::credentials::ClassifierCredentials;
use crate::error::{ExtractorError, ExtractorResult, FetchError, FetchResult};
use crate::reputation::normalize_domain;
use crate::traits::classifier::{Classification, TextClassifier};
use crate::traits::fetcher::{ContentFetcher, FetchedArticle};
use crate::types::metadata::ArticleMetadata;

lazy_static! {
    static ref NOISE: Regex = Regex::new(
        r"(?is)<(script|style|noscript|nav|header|footer|aside|form)\b[^>]*>.*?</(script|style|noscript|nav|header|footer|aside|form)>"
    )
    .unwrap();
    static ref ARTICLE: Regex = Regex::new(r"(?is)<article\b[^>]*>(.*?)</article>").unwrap();
    static ref PARAGRAPH: Regex = Regex::new(r"(?is)<(?:p|h1|h2|h3|li)\b[^>]*>(.*?)</(?:p|h1|h2|h3|li)>").unwrap();
    static ref TAG: Regex = Regex::new(r"(?s)<[^>]+>").unwrap();
    static ref TITLE: Regex = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap();
    static ref META: Regex = Regex::new(r"(?is)<meta\b[^>]*>").unwrap();
    static ref ATTRIBUTE: Regex = Regex::new(r#"(?i)([a-z][a-z0-9:_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap();
    static ref TIME_DATETIME: Regex = Regex::new(r#"(?is)<time\b[^>]*datetime\s*=\s*["']([^"']+)["']"#).unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Fetches a URL and extracts article text plus metadata from the HTML.
///
/// # Example
///
/// ```rust,ignore
/// let fetcher = HttpFetcher::new().with_user_agent("newsroom-bot/2.0");
/// let result = engine.analyze_url(&fetcher, "https://apnews.com/article/x").await?;
/// ```
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            user_agent: "CredibilityBot/1.0".to_string(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedArticle> {
        debug!(url = %url, "HTTP fetch starting");
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    FetchError::Http(Box::new(e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(format!("HTTP {}", status).into()));
        }

        // Metadata records the post-redirect domain; the source signal still
        // scores the requested URL.
        let final_url = response.url().to_string();
        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let article = extract_article(&html, &final_url);
        debug!(
            url = %url,
            chars = article.text.len(),
            metadata_fields = article.metadata.filled_fields(),
            "Article extracted"
        );
        Ok(article)
    }
}

/// Reduce an HTML page to article text and metadata.
pub fn extract_article(html: &str, url: &str) -> FetchedArticle {
    let cleaned = NOISE.replace_all(html, " ");
    let scope = ARTICLE
        .captures(&cleaned)
        .and_then(|c| c.get(1))
        .map_or(&*cleaned, |m| m.as_str());

    let paragraphs: Vec<String> = PARAGRAPH
        .captures_iter(scope)
        .filter_map(|c| c.get(1))
        .map(|m| plain_text(m.as_str()))
        .filter(|p| !p.is_empty())
        .collect();

    let text = if paragraphs.is_empty() {
        plain_text(scope)
    } else {
        paragraphs.join("\n\n")
    };

    FetchedArticle::new(text).with_metadata(extract_metadata(html, url))
}

fn extract_metadata(html: &str, url: &str) -> ArticleMetadata {
    let meta = meta_tags(html);

    let mut metadata = ArticleMetadata::new();

    let title = first_meta(&meta, &["og:title", "twitter:title"]).or_else(|| {
        TITLE
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| plain_text(m.as_str()))
            .filter(|t| !t.is_empty())
    });
    if let Some(title) = title {
        metadata = metadata.with_title(title);
    }

    if let Some(authors) = first_meta(&meta, &["author", "article:author", "byl"]) {
        let authors = authors.trim_start_matches("By ").trim_start_matches("by ");
        for author in authors.split([',', '&']).flat_map(|a| a.split(" and ")) {
            let author = author.trim();
            if !author.is_empty() {
                metadata = metadata.with_author(author);
            }
        }
    }

    let published = first_meta(&meta, &["article:published_time", "date", "pubdate", "publish-date"]).or_else(|| {
        TIME_DATETIME
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    });
    if let Some(date) = published.as_deref().and_then(parse_date) {
        metadata = metadata.with_publish_date(date);
    }

    if let Some(keywords) = first_meta(&meta, &["keywords", "news_keywords"]) {
        metadata = metadata.with_keywords(
            keywords
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>(),
        );
    }

    if let Some(summary) = first_meta(&meta, &["description", "og:description"]) {
        metadata = metadata.with_summary(summary);
    }

    if let Some(domain) = normalize_domain(url) {
        metadata = metadata.with_source_domain(domain);
    }

    metadata
}

fn first_meta(meta: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| meta.get(*k))
        .map(|v| plain_text(v))
        .filter(|v| !v.is_empty())
}

/// `name`/`property` → `content` for every `<meta>` tag, lowercased keys.
fn meta_tags(html: &str) -> HashMap<String, String> {
    let mut tags = HashMap::new();
    for tag in META.find_iter(html) {
        let attrs: HashMap<String, String> = ATTRIBUTE
            .captures_iter(tag.as_str())
            .filter_map(|c| {
                let value = c.get(2).or_else(|| c.get(3))?;
                Some((c[1].to_lowercase(), value.as_str().to_string()))
            })
            .collect();

        let key = attrs.get("property").or_else(|| attrs.get("name"));
        if let (Some(key), Some(content)) = (key, attrs.get("content")) {
            tags.entry(key.to_lowercase()).or_insert_with(|| content.clone());
        }
    }
    tags
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn plain_text(fragment: &str) -> String {
    let text = TAG.replace_all(fragment, " ");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&rsquo;", "’")
        .replace("&lsquo;", "‘")
        // Last, so `&amp;lt;` stays `&lt;`.
        .replace("&amp;", "&");
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Hosted classifier speaking the `{"inputs": text}` inference protocol.
///
/// Accepts the response shapes inference servers commonly return: a single
/// `{label, score}`, a list of them, or a batch of lists. The top-scoring
/// label wins.
pub struct HttpClassifier {
    client: reqwest::Client,
    credentials: ClassifierCredentials,
}

impl HttpClassifier {
    pub fn new(credentials: ClassifierCredentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<Vec<Classification>>),
    List(Vec<Classification>),
    Single(Classification),
}

/// Pick the top label out of an inference response body.
pub fn parse_inference_response(body: &str) -> ExtractorResult<Classification> {
    let response: InferenceResponse = serde_json::from_str(body)
        .map_err(|e| ExtractorError::unavailable(format!("unexpected classifier response: {}", e)))?;

    let candidates = match response {
        InferenceResponse::Batch(batch) => batch.into_iter().next().unwrap_or_default(),
        InferenceResponse::List(list) => list,
        InferenceResponse::Single(one) => vec![one],
    };

    candidates
        .into_iter()
        .filter(|c| c.score.is_finite())
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| ExtractorError::unavailable("classifier returned no labels"))
}

#[async_trait]
impl TextClassifier for HttpClassifier {
    async fn classify(&self, text: &str) -> ExtractorResult<Classification> {
        let mut request = self
            .client
            .post(&self.credentials.endpoint)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(key) = &self.credentials.api_key {
            request = request.bearer_auth(key.expose());
        }

        let response = request.send().await.map_err(ExtractorError::unavailable)?;
        let status = response.status();
        let body = response.text().await.map_err(ExtractorError::unavailable)?;

        if !status.is_success() {
            warn!(status = %status, "Classifier request failed");
            return Err(ExtractorError::Unavailable(format!("HTTP {}", status)));
        }

        parse_inference_response(&body)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html><head>
  <title>Fallback title | Site</title>
  <meta property="og:title" content="Council approves &amp; funds new bridge">
  <meta name="author" content="By Ana Ruiz and Tom Lee">
  <meta content="2024-03-05T14:30:00Z" property="article:published_time">
  <meta name="keywords" content="bridge, council, budget">
  <meta name="description" content="The council voted 7-2.">
  <script>var tracking = "<p>not text</p>";</script>
</head><body>
  <nav><p>Home</p></nav>
  <article>
    <h1>Council approves new bridge</h1>
    <p>The city council voted <b>7-2</b> on Tuesday.</p>
    <p>Construction starts in May.</p>
  </article>
  <footer><p>Copyright</p></footer>
</body></html>"#;

    #[test]
    fn test_extract_article_text() {
        let article = extract_article(PAGE, "https://www.citynews.example/story");
        assert_eq!(
            article.text,
            "Council approves new bridge\n\nThe city council voted 7-2 on Tuesday.\n\nConstruction starts in May."
        );
    }

    #[test]
    fn test_extract_metadata() {
        let metadata = extract_article(PAGE, "https://www.citynews.example/story").metadata;

        assert_eq!(metadata.title(), Some("Council approves & funds new bridge"));
        assert_eq!(metadata.authors, vec!["Ana Ruiz", "Tom Lee"]);
        assert_eq!(
            metadata.publish_date.map(|d| d.to_rfc3339()).as_deref(),
            Some("2024-03-05T14:30:00+00:00")
        );
        assert_eq!(metadata.keywords, vec!["bridge", "council", "budget"]);
        assert_eq!(metadata.summary.as_deref(), Some("The council voted 7-2."));
        assert_eq!(metadata.source_domain.as_deref(), Some("citynews.example"));
        assert_eq!(metadata.filled_fields(), 6);
    }

    #[test]
    fn test_page_without_paragraphs_falls_back_to_text() {
        let article = extract_article("<html><body><div>Just a line</div></body></html>", "https://x.example");
        assert_eq!(article.text, "Just a line");
        assert!(article.metadata.title().is_none());
    }

    #[test]
    fn test_entities_decode_once() {
        assert_eq!(plain_text("<p>AT&amp;T &lt;b&gt;</p>"), "AT&T <b>");
        assert_eq!(plain_text("write &amp;lt; for a literal"), "write &lt; for a literal");
        assert_eq!(plain_text("&amp;quot;x&amp;quot;"), "&quot;x&quot;");
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-03-05T14:30:00+02:00").is_some());
        assert!(parse_date("2024-03-05").is_some());
        assert!(parse_date("last week").is_none());
    }

    #[test]
    fn test_parse_inference_shapes() {
        let batch = r#"[[{"label":"FAKE","score":0.2},{"label":"REAL","score":0.8}]]"#;
        assert_eq!(parse_inference_response(batch).unwrap(), Classification::new("REAL", 0.8));

        let list = r#"[{"label":"LABEL_0","score":0.9},{"label":"LABEL_1","score":0.1}]"#;
        assert_eq!(parse_inference_response(list).unwrap().label, "LABEL_0");

        let single = r#"{"label":"hate","score":0.6}"#;
        assert_eq!(parse_inference_response(single).unwrap().label, "hate");
    }

    #[test]
    fn test_parse_inference_errors() {
        assert!(parse_inference_response("[]").is_err());
        assert!(parse_inference_response(r#"{"error":"model loading"}"#).is_err());
    }
}

//! Domain reputation table.
//!
//! Lookups read an `Arc` snapshot of the whole map; `replace` swaps in a new
//! map in one step, so a concurrent lookup sees either the old table or the
//! new one, never a mix.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Score for a domain known to publish reliable news.
pub const RELIABLE_SCORE: f32 = 1.0;
/// Score for a domain known to publish fake news.
pub const UNRELIABLE_SCORE: f32 = 0.0;
/// Score for a domain missing from the table.
pub const UNKNOWN_SCORE: f32 = 0.5;

/// Domains treated as reliable when no other table is supplied.
pub const DEFAULT_RELIABLE_DOMAINS: &[&str] = &[
    "reuters.com",
    "apnews.com",
    "bbc.com",
    "bbc.co.uk",
    "bloomberg.com",
    "nytimes.com",
    "wsj.com",
    "washingtonpost.com",
    "economist.com",
    "theguardian.com",
];

/// One domain and its trust score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationEntry {
    pub domain: String,
    pub score: f32,
}

impl ReputationEntry {
    /// Create an entry, normalizing the domain and clamping the score.
    pub fn new(domain: &str, score: f32) -> Option<Self> {
        let domain = normalize_domain(domain)?;
        let score = if score.is_nan() { UNKNOWN_SCORE } else { score.clamp(0.0, 1.0) };
        Some(Self { domain, score })
    }
}

/// How a domain is regarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Standing {
    Reliable,
    Unreliable,
    Mixed(f32),
    Unknown,
}

impl Standing {
    fn from_score(score: f32) -> Self {
        if score >= RELIABLE_SCORE {
            Standing::Reliable
        } else if score <= UNRELIABLE_SCORE {
            Standing::Unreliable
        } else {
            Standing::Mixed(score)
        }
    }

    pub fn score(&self) -> f32 {
        match self {
            Standing::Reliable => RELIABLE_SCORE,
            Standing::Unreliable => UNRELIABLE_SCORE,
            Standing::Mixed(score) => *score,
            Standing::Unknown => UNKNOWN_SCORE,
        }
    }
}

type Snapshot = Arc<HashMap<String, f32>>;

/// Read-mostly mapping from normalized domain to trust score.
#[derive(Debug)]
pub struct ReputationTable {
    entries: RwLock<Snapshot>,
}

impl Default for ReputationTable {
    fn default() -> Self {
        Self::empty().with_reliable(DEFAULT_RELIABLE_DOMAINS.iter().copied())
    }
}

impl ReputationTable {
    /// A table that knows no domains.
    pub fn empty() -> Self {
        Self::from_entries(Vec::new())
    }

    pub fn from_entries(entries: impl IntoIterator<Item = ReputationEntry>) -> Self {
        Self {
            entries: RwLock::new(Arc::new(collect(entries))),
        }
    }

    /// Parse a JSON object of `domain -> score`.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(Self::from_entries(parse_entries(json)?))
    }

    /// Load a JSON object of `domain -> score` from a file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_json_str(&read_file(path.as_ref())?)
    }

    /// Add domains with the reliable score.
    pub fn with_reliable<'a>(self, domains: impl IntoIterator<Item = &'a str>) -> Self {
        self.with_score(domains, RELIABLE_SCORE)
    }

    /// Add domains with the fake-news score.
    pub fn with_unreliable<'a>(self, domains: impl IntoIterator<Item = &'a str>) -> Self {
        self.with_score(domains, UNRELIABLE_SCORE)
    }

    fn with_score<'a>(self, domains: impl IntoIterator<Item = &'a str>, score: f32) -> Self {
        let added = domains
            .into_iter()
            .filter_map(|d| ReputationEntry::new(d, score));
        self.merge(added);
        self
    }

    /// Merge entries from a JSON file over the current table.
    pub fn merge_json_file(&self, path: impl AsRef<Path>) -> ConfigResult<usize> {
        let entries = parse_entries(&read_file(path.as_ref())?)?;
        let count = entries.len();
        self.merge(entries);
        Ok(count)
    }

    /// Current snapshot of the table.
    pub fn snapshot(&self) -> Snapshot {
        match self.entries.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Replace the whole table atomically.
    pub fn replace(&self, entries: impl IntoIterator<Item = ReputationEntry>) {
        self.swap(Arc::new(collect(entries)));
    }

    /// Copy the current table, add `entries`, and swap the copy in.
    pub fn merge(&self, entries: impl IntoIterator<Item = ReputationEntry>) {
        let mut next = (*self.snapshot()).clone();
        next.extend(entries.into_iter().map(|e| (e.domain, e.score)));
        self.swap(Arc::new(next));
    }

    fn swap(&self, next: Snapshot) {
        match self.entries.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Look up a bare domain or host, walking up to parent domains
    /// (`news.bbc.co.uk` → `bbc.co.uk`).
    pub fn standing(&self, domain: &str) -> Standing {
        let Some(domain) = normalize_domain(domain) else {
            return Standing::Unknown;
        };
        let table = self.snapshot();

        let mut candidate = domain.as_str();
        loop {
            if let Some(score) = table.get(candidate) {
                return Standing::from_score(*score);
            }
            match candidate.split_once('.') {
                Some((_, parent)) if parent.contains('.') => candidate = parent,
                _ => return Standing::Unknown,
            }
        }
    }

    /// Look up the host of a URL.
    pub fn standing_for_url(&self, url: &Url) -> Standing {
        url.host_str()
            .map(|host| self.standing(host))
            .unwrap_or(Standing::Unknown)
    }

    /// Trust score for a domain; unknown domains score 0.5.
    pub fn score(&self, domain: &str) -> f32 {
        self.standing(domain).score()
    }
}

fn collect(entries: impl IntoIterator<Item = ReputationEntry>) -> HashMap<String, f32> {
    entries.into_iter().map(|e| (e.domain, e.score)).collect()
}

fn read_file(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::Reputation(Box::new(e)))
}

fn parse_entries(json: &str) -> ConfigResult<Vec<ReputationEntry>> {
    let raw: HashMap<String, f32> =
        serde_json::from_str(json).map_err(|e| ConfigError::Reputation(Box::new(e)))?;
    Ok(raw
        .into_iter()
        .filter_map(|(domain, score)| ReputationEntry::new(&domain, score))
        .collect())
}

/// Lowercase, strip scheme, credentials, port, path and a leading `www.`.
///
/// Accepts either a bare domain (`WWW.Reuters.com`) or a URL
/// (`https://www.reuters.com/world`). Returns `None` for blank input.
pub fn normalize_domain(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let host = match Url::parse(raw) {
        Ok(url) if url.host_str().is_some() => url.host_str().unwrap_or_default().to_string(),
        _ => {
            let without_scheme = raw.split_once("://").map_or(raw, |(_, rest)| rest);
            let authority = without_scheme
                .split(['/', '?', '#'])
                .next()
                .unwrap_or_default();
            let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
            host.split(':').next().unwrap_or_default().to_string()
        }
    };

    let host = host.trim_end_matches('.').to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

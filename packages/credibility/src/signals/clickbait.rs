//! Clickbait signal.
//!
//! Runs a fixed list of sensational-headline patterns over the title and
//! body. The score drops by an equal share for every pattern that fires.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ExtractorResult;
use crate::traits::extractor::{SignalExtractor, SignalInput};
use crate::types::signals::{Signal, SignalScore};

pub const PATTERN_REASON: &str = "Title contains clickbait patterns";
pub const PUNCTUATION_REASON: &str = "Title contains excessive punctuation";
pub const ALL_CAPS_REASON: &str = "Title is in all caps";

lazy_static! {
    static ref CLICKBAIT_PATTERNS: Vec<(&'static str, Regex)> = [
        ("you_wont_believe", r"(?i)you\s+won[’']?t\s+believe"),
        ("shocking", r"(?i)shocking"),
        ("mind_blowing", r"(?i)mind[-\s]?blowing"),
        ("this_is_why", r"(?i)this\s+is\s+why"),
        ("numbered_list", r"(?i)\b\d+\s+(?:ways|things|reasons|facts)\b"),
        ("must_see", r"(?i)must[-\s]?see"),
        ("what_happens_next", r"(?i)what\s+happens\s+next"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).unwrap()))
    .collect();

    static ref EXCESSIVE_PUNCTUATION: Regex = Regex::new(r"[!?]{2,}").unwrap();
}

/// Number of patterns the score is divided over.
pub fn pattern_count() -> usize {
    CLICKBAIT_PATTERNS.len()
}

/// What the clickbait scan found.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickbaitAnalysis {
    /// Names of the patterns that fired
    pub matched: Vec<&'static str>,
    pub total: usize,
    pub excessive_punctuation: bool,
    pub all_caps_title: bool,
}

impl ClickbaitAnalysis {
    /// `1 - matched/total`, clamped into [0, 1].
    pub fn score(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        (1.0 - self.matched.len() as f32 / self.total as f32).clamp(0.0, 1.0)
    }

    /// Pattern matches explain the score; title formatting is reported only
    /// when no pattern fired.
    pub fn reason(&self) -> Option<&'static str> {
        if !self.matched.is_empty() {
            Some(PATTERN_REASON)
        } else if self.excessive_punctuation {
            Some(PUNCTUATION_REASON)
        } else if self.all_caps_title {
            Some(ALL_CAPS_REASON)
        } else {
            None
        }
    }

    pub fn to_signal_score(&self) -> SignalScore {
        let score = SignalScore::new(self.score());
        match self.reason() {
            Some(reason) => score.with_reason(reason),
            None => score,
        }
    }
}

/// Scan a title and body for clickbait markers.
pub fn analyze_clickbait(title: &str, body: &str) -> ClickbaitAnalysis {
    let matched = CLICKBAIT_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(title) || re.is_match(body))
        .map(|(name, _)| *name)
        .collect();

    ClickbaitAnalysis {
        matched,
        total: pattern_count(),
        excessive_punctuation: EXCESSIVE_PUNCTUATION.is_match(title),
        all_caps_title: is_all_caps(title),
    }
}

/// At least two words with letters, and no lowercase letters anywhere.
fn is_all_caps(title: &str) -> bool {
    let lettered_words = title
        .split_whitespace()
        .filter(|w| w.chars().any(char::is_alphabetic))
        .count();
    lettered_words >= 2 && !title.chars().any(char::is_lowercase)
}

#[derive(Debug, Default)]
pub struct ClickbaitExtractor;

impl ClickbaitExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SignalExtractor for ClickbaitExtractor {
    fn signal(&self) -> Signal {
        Signal::Clickbait
    }

    async fn extract(&self, input: &SignalInput) -> ExtractorResult<Option<SignalScore>> {
        let analysis = analyze_clickbait(input.title(), &input.text);
        if !analysis.matched.is_empty() {
            tracing::debug!(patterns = ?analysis.matched, "Clickbait patterns matched");
        }
        Ok(Some(analysis.to_signal_score()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_scores_one() {
        let analysis = analyze_clickbait(
            "City council approves transit budget",
            "The council voted 7-2 on Tuesday to approve the budget.",
        );
        assert!(analysis.matched.is_empty());
        assert_eq!(analysis.score(), 1.0);
        assert_eq!(analysis.reason(), None);
    }

    #[test]
    fn test_shocking_headline() {
        let analysis = analyze_clickbait("SHOCKING!!! You won't believe what happened", "");
        assert_eq!(analysis.matched, vec!["you_wont_believe", "shocking"]);
        assert_eq!(analysis.total, 7);
        assert!((analysis.score() - 5.0 / 7.0).abs() < 1e-6);
        assert_eq!(analysis.reason(), Some(PATTERN_REASON));
        assert!(analysis.excessive_punctuation);
    }

    #[test]
    fn test_every_pattern_drives_score_to_zero() {
        let title = "Shocking: you won't believe this mind-blowing story. This is why \
                     10 reasons are a must see. What happens next?";
        let analysis = analyze_clickbait(title, "");
        assert_eq!(analysis.matched.len(), pattern_count());
        assert_eq!(analysis.score(), 0.0);
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        let analysis = analyze_clickbait("", "7 THINGS you MUST SEE");
        assert_eq!(analysis.matched, vec!["numbered_list", "must_see"]);
    }

    #[test]
    fn test_formatting_reasons_do_not_change_score() {
        let punct = analyze_clickbait("Is this the end??", "");
        assert_eq!(punct.score(), 1.0);
        assert_eq!(punct.reason(), Some(PUNCTUATION_REASON));

        let caps = analyze_clickbait("MARKETS CLOSE LOWER", "");
        assert_eq!(caps.score(), 1.0);
        assert_eq!(caps.reason(), Some(ALL_CAPS_REASON));

        // A lone acronym is not an all-caps headline.
        assert!(!analyze_clickbait("NASA", "").all_caps_title);
    }

    #[tokio::test]
    async fn test_extractor_uses_first_line_as_title() {
        let input = SignalInput::new("You won't believe it\nThe rest of the story.");
        let score = ClickbaitExtractor::new().extract(&input).await.unwrap().unwrap();
        assert!((score.score - 6.0 / 7.0).abs() < 1e-6);
        assert_eq!(score.reason.as_deref(), Some(PATTERN_REASON));
    }
}

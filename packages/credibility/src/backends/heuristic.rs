//! Rule-based capability backends.
//!
//! Small, dependency-free stand-ins for a statistical NLP pipeline, a
//! sentiment model and a fake-news classifier. They are deterministic and
//! fast, which makes them suitable for the CLI and for tests; production
//! deployments inject real models through the same traits.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::error::{ExtractorError, ExtractorResult};
use crate::traits::classifier::{Classification, TextClassifier};
use crate::traits::nlp::{Entity, NlpBackend, NlpDocument, PosTag, Sentence, Token};
use crate::traits::sentiment::SentimentAnalyzer;

lazy_static! {
    static ref TOKEN: Regex = Regex::new(
        r"\d{1,2}:\d{2}(?:[ap]m)?|\d+(?:[.,]\d+)*%?|[\p{L}\p{N}]+(?:['’][\p{L}]+)*|[^\s\p{L}\p{N}]"
    )
    .unwrap();
    static ref CLOCK_TIME: Regex = Regex::new(r"^\d{1,2}:\d{2}(?:[ap]m)?$").unwrap();
    static ref WORD: Regex = Regex::new(r"[\p{L}']+").unwrap();

    static ref SENSATIONAL: Regex = Regex::new(
        r"(?i)\b(?:hoax|bombshell|exposed|miracle|cures?|conspiracy|cover[- ]?up|banned|secret|outrage(?:ous)?|shocking|unbelievable|wake up|sheeple|mainstream media|they don'?t want you to know|what they'?re hiding|100% proof|share before)\b"
    )
    .unwrap();
    static ref SOURCING: Regex = Regex::new(
        r"(?i)\b(?:according to|officials?|said|reported|spokes(?:man|woman|person)|study|researchers|percent|data|confirmed|statement)\b"
    )
    .unwrap();

    static ref VALENCE: HashMap<&'static str, f32> = [
        ("good", 1.9), ("great", 3.1), ("excellent", 3.2), ("amazing", 2.8),
        ("wonderful", 2.7), ("fantastic", 2.6), ("love", 3.2), ("best", 3.2),
        ("happy", 2.7), ("success", 2.7), ("win", 2.8), ("positive", 2.3),
        ("hope", 1.9), ("benefit", 2.0), ("safe", 1.9), ("agree", 1.5),
        ("improve", 1.9), ("support", 1.7), ("praise", 2.6), ("celebrate", 2.7),
        ("bad", -2.5), ("terrible", -2.5), ("awful", -2.0), ("horrible", -2.5),
        ("worst", -3.1), ("hate", -2.7), ("disaster", -3.1), ("crisis", -3.1),
        ("fail", -2.5), ("failure", -2.3), ("fear", -2.2), ("angry", -2.3),
        ("outrage", -2.3), ("shocking", -1.5), ("corrupt", -3.0), ("evil", -3.4),
        ("lie", -1.8), ("lies", -1.8), ("fraud", -3.0), ("danger", -2.4),
        ("dangerous", -2.1), ("kill", -3.7), ("killed", -3.5), ("death", -2.9),
        ("attack", -2.1), ("threat", -2.4), ("destroy", -2.6), ("scandal", -1.9),
        ("disgusting", -2.4), ("toxic", -2.3), ("panic", -2.6), ("collapse", -2.2),
    ]
    .into_iter()
    .collect();

    static ref PRONOUNS: HashSet<&'static str> = [
        "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves",
        "you", "your", "yours", "yourself", "he", "him", "his", "himself", "she",
        "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
        "theirs", "themselves",
    ]
    .into_iter()
    .collect();
    static ref DETERMINERS: HashSet<&'static str> = [
        "the", "a", "an", "this", "that", "these", "those", "every", "each", "some",
        "any", "no", "all", "both",
    ]
    .into_iter()
    .collect();
    static ref ADPOSITIONS: HashSet<&'static str> = [
        "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "about",
        "over", "after", "before", "under", "between", "through", "during", "against",
    ]
    .into_iter()
    .collect();
    static ref ADVERBS: HashSet<&'static str> = [
        "very", "really", "so", "too", "just", "quite", "never", "always", "even",
        "still", "already", "almost", "again", "ever", "much",
    ]
    .into_iter()
    .collect();
    static ref ADJECTIVES: HashSet<&'static str> = [
        "good", "bad", "great", "best", "worst", "big", "huge", "evil", "awful",
        "amazing", "terrible", "horrible", "shocking", "incredible", "unbelievable",
        "disgusting", "outrageous", "wonderful", "fantastic", "insane", "crazy", "new",
    ]
    .into_iter()
    .collect();
    static ref VERBS: HashSet<&'static str> = [
        "is", "are", "was", "were", "be", "been", "being", "has", "have", "had", "do",
        "does", "did", "will", "would", "can", "could", "should", "may", "might",
        "must", "said", "says", "say", "told", "made", "went", "took", "gave",
    ]
    .into_iter()
    .collect();
    static ref NUMBER_WORDS: HashSet<&'static str> = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "twenty", "thirty", "fifty", "hundred", "thousand",
        "million", "billion", "dozen",
    ]
    .into_iter()
    .collect();
    static ref DATE_WORDS: HashSet<&'static str> = [
        "january", "february", "march", "april", "may", "june", "july", "august",
        "september", "october", "november", "december", "monday", "tuesday",
        "wednesday", "thursday", "friday", "saturday", "sunday", "today",
        "yesterday", "tomorrow",
    ]
    .into_iter()
    .collect();
}

const ADVERB_SUFFIX: &str = "ly";
const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ish"];
const VERB_SUFFIXES: &[&str] = &["ed", "ing"];

/// VADER's normalization constant for compound scores.
const COMPOUND_ALPHA: f32 = 15.0;
/// Scale applied to a word's valence when a negator precedes it.
const NEGATION_SCALAR: f32 = -0.74;
const NEGATORS: &[&str] = &["not", "no", "never", "nobody", "nothing", "neither", "nor"];

fn is_terminal(token: &str) -> bool {
    matches!(token, "." | "!" | "?")
}

fn has_suffix(word: &str, suffixes: &[&str]) -> bool {
    suffixes
        .iter()
        .any(|s| word.len() > s.len() + 2 && word.ends_with(s))
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().map_or(false, char::is_uppercase)
}

/// Tag a word from its lowercase form, ignoring capitalization.
fn tag_word(lower: &str) -> PosTag {
    if PRONOUNS.contains(lower) {
        PosTag::Pron
    } else if DETERMINERS.contains(lower) {
        PosTag::Det
    } else if ADPOSITIONS.contains(lower) {
        PosTag::Adp
    } else if NUMBER_WORDS.contains(lower) {
        PosTag::Num
    } else if VERBS.contains(lower) {
        PosTag::Verb
    } else if ADVERBS.contains(lower) {
        PosTag::Adv
    } else if ADJECTIVES.contains(lower) {
        PosTag::Adj
    } else if matches!(lower, "and" | "or" | "but" | "if" | "because" | "while") {
        PosTag::Other
    } else if has_suffix(lower, &[ADVERB_SUFFIX]) {
        PosTag::Adv
    } else if has_suffix(lower, ADJECTIVE_SUFFIXES) {
        PosTag::Adj
    } else if has_suffix(lower, VERB_SUFFIXES) {
        PosTag::Verb
    } else {
        PosTag::Noun
    }
}

fn is_year(word: &str) -> bool {
    word.len() == 4 && word.parse::<u16>().map_or(false, |y| (1800..=2100).contains(&y))
}

/// Heuristic tokenizer, tagger and segmenter.
///
/// Proper nouns are capitalized words that are not sentence-initial (or are
/// sentence-initial and followed by another capitalized word). Runs of
/// proper nouns become `NAME` entities; month and weekday names, years and
/// the numbers next to them become `DATE` entities; clock times are `TIME`.
#[derive(Debug, Clone, Default)]
pub struct HeuristicNlp;

impl HeuristicNlp {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous parse, shared by the trait impl.
    pub fn parse_text(&self, text: &str) -> NlpDocument {
        let words: Vec<&str> = TOKEN.find_iter(text).map(|m| m.as_str()).collect();

        let mut tokens = Vec::with_capacity(words.len());
        let mut sentences = Vec::new();
        let mut sentence_start = 0;

        for (i, word) in words.iter().enumerate() {
            let lower = word.to_lowercase();
            let first_char = word.chars().next().unwrap_or(' ');
            let at_sentence_start = i == sentence_start;

            let token = if !first_char.is_alphanumeric() {
                Token::new(*word, PosTag::Punct)
            } else if CLOCK_TIME.is_match(&lower) {
                Token::new(*word, PosTag::Num).numeric().with_entity("TIME")
            } else if first_char.is_ascii_digit() {
                let token = Token::new(*word, PosTag::Num).numeric();
                if is_year(word) {
                    token.with_entity("DATE")
                } else {
                    token
                }
            } else if DATE_WORDS.contains(lower.as_str()) && (is_capitalized(word) || lower.len() > 3) {
                Token::new(*word, PosTag::Propn).with_entity("DATE")
            } else {
                let tag = tag_word(&lower);
                let proper = tag == PosTag::Noun
                    && is_capitalized(word)
                    && (!at_sentence_start
                        || words.get(i + 1).map_or(false, |next| is_capitalized(next)));
                let token = Token::new(*word, if proper { PosTag::Propn } else { tag });
                if tag == PosTag::Num {
                    token.numeric()
                } else {
                    token
                }
            };
            tokens.push(token);

            let next_is_terminal = words.get(i + 1).map_or(false, |w| is_terminal(w));
            if is_terminal(word) && !next_is_terminal {
                sentences.push(Sentence {
                    start: sentence_start,
                    end: i + 1,
                });
                sentence_start = i + 1;
            }
        }
        if sentence_start < tokens.len() {
            sentences.push(Sentence {
                start: sentence_start,
                end: tokens.len(),
            });
        }

        attach_numbers_to_dates(&mut tokens);
        let entities = collect_entities(&mut tokens);

        NlpDocument {
            tokens,
            entities,
            sentences,
        }
    }
}

/// A number directly before or after a date word ("March 3", "3 March")
/// is part of the date.
fn attach_numbers_to_dates(tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        if !tokens[i].like_num || tokens[i].entity.is_some() {
            continue;
        }
        let neighbor_is_date = [i.checked_sub(1), Some(i + 1)]
            .into_iter()
            .flatten()
            .filter_map(|j| tokens.get(j))
            .any(|t| t.pos == PosTag::Propn && t.is_temporal());
        if neighbor_is_date {
            tokens[i].entity = Some("DATE".to_string());
        }
    }
}

/// Group consecutive DATE/TIME tokens and consecutive proper nouns into
/// entity spans, labelling the proper-noun runs as `NAME`.
fn collect_entities(tokens: &mut [Token]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let label = match (&tokens[i].entity, tokens[i].pos) {
            (Some(label), _) => label.clone(),
            (None, PosTag::Propn) => "NAME".to_string(),
            _ => {
                i += 1;
                continue;
            }
        };

        let start = i;
        while i < tokens.len() && span_label(&tokens[i]).as_deref() == Some(label.as_str()) {
            if tokens[i].entity.is_none() {
                tokens[i].entity = Some(label.clone());
            }
            i += 1;
        }

        let text = tokens[start..i]
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        entities.push(Entity::new(text, label));
    }

    entities
}

fn span_label(token: &Token) -> Option<String> {
    match (&token.entity, token.pos) {
        (Some(label), _) => Some(label.clone()),
        (None, PosTag::Propn) => Some("NAME".to_string()),
        _ => None,
    }
}

#[async_trait]
impl NlpBackend for HeuristicNlp {
    async fn parse(&self, text: &str) -> ExtractorResult<NlpDocument> {
        Ok(self.parse_text(text))
    }
}

/// Lexicon-based polarity, normalized the way VADER normalizes compounds.
#[derive(Debug, Clone, Default)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }

    /// Compound polarity in [-1, 1]; 0.0 when no lexicon word is present.
    pub fn compound(&self, text: &str) -> f32 {
        let words: Vec<String> = WORD
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect();

        let mut sum = 0.0;
        for (i, word) in words.iter().enumerate() {
            let Some(valence) = VALENCE.get(word.as_str()) else {
                continue;
            };
            let negated = words[i.saturating_sub(2)..i]
                .iter()
                .any(|w| NEGATORS.contains(&w.as_str()) || w.ends_with("n't"));
            sum += if negated { valence * NEGATION_SCALAR } else { *valence };
        }

        let compound = sum / (sum * sum + COMPOUND_ALPHA).sqrt();
        compound.clamp(-1.0, 1.0)
    }
}

#[async_trait]
impl SentimentAnalyzer for LexiconSentiment {
    async fn polarity(&self, text: &str) -> ExtractorResult<f32> {
        if text.trim().is_empty() {
            return Err(ExtractorError::EmptyInput);
        }
        Ok(self.compound(text))
    }
}

/// Weighs sensational vocabulary against sourcing language.
///
/// Returns `FAKE` or `REAL` with the probability of the winning label.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Probability that the text is fake.
    pub fn fake_probability(&self, text: &str) -> f32 {
        let sensational = SENSATIONAL.find_iter(text).count() as f32;
        let sourcing = SOURCING.find_iter(text).count() as f32;
        let evidence = sensational - 0.5 * sourcing - 0.5;
        1.0 / (1.0 + (-evidence).exp())
    }
}

#[async_trait]
impl TextClassifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> ExtractorResult<Classification> {
        if text.trim().is_empty() {
            return Err(ExtractorError::EmptyInput);
        }
        let p_fake = self.fake_probability(text);
        Ok(if p_fake >= 0.5 {
            Classification::new("FAKE", p_fake)
        } else {
            Classification::new("REAL", 1.0 - p_fake)
        })
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

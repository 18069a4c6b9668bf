//! Property tests for the pure scoring functions.

use credibility::reputation::DEFAULT_RELIABLE_DOMAINS;
use credibility::scoring::aggregate;
use credibility::signals::analyze_clickbait;
use credibility::signals::clickbait::pattern_count;
use credibility::{
    Reliability, ReputationTable, Signal, SignalScore, SignalScores, SignalWeights,
    VerificationStatus,
};
use proptest::prelude::*;

/// One phrase per clickbait pattern, each matching only its own pattern.
const PHRASES: [&str; 7] = [
    "you won't believe",
    "shocking",
    "mind-blowing",
    "this is why",
    "7 reasons",
    "must-see",
    "what happens next",
];

fn scores_from(values: &[Option<f32>]) -> SignalScores {
    let mut scores = SignalScores::new();
    for (signal, value) in Signal::ALL.iter().zip(values) {
        if let Some(v) = value {
            scores.set(*signal, SignalScore::new(*v));
        }
    }
    scores
}

fn title_from(selected: &[bool]) -> String {
    PHRASES
        .iter()
        .zip(selected)
        .filter(|(_, on)| **on)
        .map(|(p, _)| *p)
        .collect::<Vec<_>>()
        .join(" ... ")
}

proptest! {
    #[test]
    fn aggregate_is_renormalized_weighted_mean(
        values in prop::collection::vec(prop::option::of(0.0f32..=1.0), 6)
    ) {
        prop_assume!(values.iter().any(Option::is_some));
        let weights = SignalWeights::default();
        let result = aggregate(&scores_from(&values), &weights).unwrap();

        let (num, den) = Signal::ALL
            .iter()
            .zip(&values)
            .filter_map(|(s, v)| v.map(|v| (v * weights.get(*s), weights.get(*s))))
            .fold((0.0f32, 0.0f32), |(n, d), (a, b)| (n + a, d + b));

        prop_assert!((0.0..=1.0).contains(&result.score));
        prop_assert!((result.score - num / den).abs() < 1e-5);

        let effective: f32 = result.weights.iter().map(|(_, w)| w).sum();
        prop_assert!((effective - 1.0).abs() < 1e-5);
    }

    #[test]
    fn omitting_a_signal_moves_score_by_at_most_its_weight(
        values in prop::collection::vec(0.0f32..=1.0, 6),
        dropped in 0usize..6
    ) {
        let full: Vec<Option<f32>> = values.iter().copied().map(Some).collect();
        let mut partial = full.clone();
        partial[dropped] = None;

        let weights = SignalWeights::default();
        let with_all = aggregate(&scores_from(&full), &weights).unwrap();
        let without = aggregate(&scores_from(&partial), &weights).unwrap();

        let bound = with_all.weight_of(Signal::ALL[dropped]).unwrap();
        prop_assert!((0.0..=1.0).contains(&without.score));
        prop_assert!((with_all.score - without.score).abs() <= bound + 1e-5);
    }

    #[test]
    fn status_is_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(VerificationStatus::from_score(low) <= VerificationStatus::from_score(high));
    }

    #[test]
    fn binary_verdict_agrees_with_status(score in 0.0f32..=1.0) {
        prop_assert_eq!(
            VerificationStatus::from_score(score).reliability(),
            Reliability::from_score(score)
        );
    }

    #[test]
    fn signal_scores_are_clamped(raw in any::<f32>()) {
        let score = SignalScore::new(raw).score;
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn clickbait_score_never_rises_with_more_patterns(
        selected in prop::collection::vec(any::<bool>(), 7),
        extra in 0usize..7
    ) {
        let mut more = selected.clone();
        more[extra] = true;

        let base = analyze_clickbait(&title_from(&selected), "");
        let worse = analyze_clickbait(&title_from(&more), "");

        let expected = selected.iter().filter(|on| **on).count();
        prop_assert_eq!(base.matched.len(), expected);
        prop_assert!(worse.score() <= base.score());
    }

    #[test]
    fn reliable_domains_score_one_with_any_prefix(
        domain in prop::sample::select(DEFAULT_RELIABLE_DOMAINS.to_vec()),
        prefix in prop::sample::select(vec!["", "www.", "http://", "https://", "https://www.", "HTTP://WWW."]),
        path in prop::sample::select(vec!["", "/", "/world/story-1?ref=home"])
    ) {
        let table = ReputationTable::default();
        let raw = format!("{}{}{}", prefix, domain, path);
        prop_assert_eq!(table.score(&raw), 1.0);
    }
}

#[test]
fn clickbait_extremes() {
    assert_eq!(pattern_count(), PHRASES.len());
    assert_eq!(analyze_clickbait("Council approves budget", "").score(), 1.0);
    assert_eq!(analyze_clickbait(&title_from(&[true; 7]), "").score(), 0.0);
}

#[test]
fn status_boundaries() {
    assert_eq!(VerificationStatus::from_score(0.60), VerificationStatus::LikelyTrue);
    assert_eq!(Reliability::from_score(0.60), Reliability::Reliable);
    assert_eq!(VerificationStatus::from_score(0.5999), VerificationStatus::Uncertain);
}

#[test]
fn unknown_domain_is_exactly_neutral() {
    assert_eq!(ReputationTable::default().score("https://nowhere.example/a"), 0.5);
}

//! Status classification.
//!
//! Bands are closed on their lower bound and evaluated high to low, so a
//! score of exactly 0.60 is `LikelyTrue` and never `Uncertain`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of the `Verified` band.
pub const VERIFIED_THRESHOLD: f32 = 0.80;
/// Lower bound of the `LikelyTrue` band, and of the binary `Reliable` verdict.
pub const RELIABLE_THRESHOLD: f32 = 0.60;
/// Lower bound of the `Uncertain` band.
pub const UNCERTAIN_THRESHOLD: f32 = 0.40;
/// Lower bound of the `LikelyFalse` band.
pub const LIKELY_FALSE_THRESHOLD: f32 = 0.20;

/// Five-level categorical verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Misinformation,
    LikelyFalse,
    Uncertain,
    LikelyTrue,
    Verified,
}

impl VerificationStatus {
    /// Map a reliability score to its band.
    pub fn from_score(score: f32) -> Self {
        if score >= VERIFIED_THRESHOLD {
            Self::Verified
        } else if score >= RELIABLE_THRESHOLD {
            Self::LikelyTrue
        } else if score >= UNCERTAIN_THRESHOLD {
            Self::Uncertain
        } else if score >= LIKELY_FALSE_THRESHOLD {
            Self::LikelyFalse
        } else {
            Self::Misinformation
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "VERIFIED",
            Self::LikelyTrue => "LIKELY_TRUE",
            Self::Uncertain => "UNCERTAIN",
            Self::LikelyFalse => "LIKELY_FALSE",
            Self::Misinformation => "MISINFORMATION",
        }
    }

    /// Collapse into the binary verdict.
    pub fn reliability(&self) -> Reliability {
        if *self >= Self::LikelyTrue {
            Reliability::Reliable
        } else {
            Reliability::Unreliable
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-level verdict for callers that need a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reliability {
    Reliable,
    Unreliable,
}

impl Reliability {
    pub fn from_score(score: f32) -> Self {
        if score >= RELIABLE_THRESHOLD {
            Self::Reliable
        } else {
            Self::Unreliable
        }
    }

    pub fn is_reliable(&self) -> bool {
        matches!(self, Self::Reliable)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reliable => "reliable",
            Self::Unreliable => "unreliable",
        }
    }
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

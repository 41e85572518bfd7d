//! Result types shared across the analysis and breach-check paths.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::lexical::CharacterComposition;

/// Input validation errors for [`analyze`](crate::analyze) and the breach check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("password must not be empty")]
    EmptyInput,
}

/// Strength band derived from the numeric score.
///
/// Ordered: `VeryWeak < Weak < Medium < Strong < VeryStrong`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    /// Maps a 0-100 score onto its band (cutoffs at 20/40/60/80).
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => StrengthLevel::VeryStrong,
            60..=79 => StrengthLevel::Strong,
            40..=59 => StrengthLevel::Medium,
            20..=39 => StrengthLevel::Weak,
            _ => StrengthLevel::VeryWeak,
        }
    }

    /// Maps an advanced-backend ordinal (0-4) directly onto a band.
    pub fn from_ordinal(ordinal: u8) -> Self {
        match ordinal {
            4.. => StrengthLevel::VeryStrong,
            3 => StrengthLevel::Strong,
            2 => StrengthLevel::Medium,
            1 => StrengthLevel::Weak,
            0 => StrengthLevel::VeryWeak,
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthLevel::VeryWeak => write!(f, "Very Weak"),
            StrengthLevel::Weak => write!(f, "Weak"),
            StrengthLevel::Medium => write!(f, "Medium"),
            StrengthLevel::Strong => write!(f, "Strong"),
            StrengthLevel::VeryStrong => write!(f, "Very Strong"),
        }
    }
}

/// A weakness detected in a password.
///
/// Issues are reported in a fixed order: repeated characters, sequential
/// characters, keyboard patterns, dictionary words, common-password match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SecurityIssue {
    RepeatedCharacters,
    SequentialCharacters,
    KeyboardPattern,
    DictionaryWord(String),
    CommonPassword,
}

impl fmt::Display for SecurityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityIssue::RepeatedCharacters => write!(f, "Contains repeated characters"),
            SecurityIssue::SequentialCharacters => write!(f, "Contains sequential characters"),
            SecurityIssue::KeyboardPattern => write!(f, "Contains keyboard patterns"),
            SecurityIssue::DictionaryWord(word) => {
                write!(f, "Contains dictionary word: '{word}'")
            }
            SecurityIssue::CommonPassword => write!(f, "Password is in common passwords list"),
        }
    }
}

/// Crack-time estimates for the four standard attack scenarios, as reported
/// by an advanced backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioCrackTimes {
    pub online_throttled: String,
    pub online_unthrottled: String,
    pub offline_slow: String,
    pub offline_fast: String,
}

/// Raw figures from the advanced backend, carried alongside the normalized
/// score when that strategy was used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendDetail {
    /// The backend's own 0-4 ordinal judgment.
    pub ordinal: u8,
    /// Estimated number of guesses needed to crack the password.
    pub guesses: u64,
    pub crack_times: ScenarioCrackTimes,
}

/// Outcome of a strength analysis. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Composite score, always within 0-100.
    pub score: u8,
    pub strength: StrengthLevel,
    pub entropy_bits: f64,
    pub unique_char_ratio: f64,
    /// Password length in characters.
    pub length: usize,
    pub composition: CharacterComposition,
    pub issues: Vec<SecurityIssue>,
    /// Deduplicated improvement suggestions, first-seen order.
    pub suggestions: Vec<String>,
    /// Present only when the advanced backend produced this result.
    pub backend: Option<BackendDetail>,
}

/// Risk band derived from how often a password appears in breach corpora.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    Safe,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Buckets a breach count: 0 / <10 / <100 / <1000 / >=1000.
    pub fn from_count(count: u64) -> Self {
        match count {
            0 => RiskLevel::Safe,
            1..=9 => RiskLevel::Low,
            10..=99 => RiskLevel::Medium,
            100..=999 => RiskLevel::High,
            _ => RiskLevel::VeryHigh,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Safe => write!(f, "Safe"),
            RiskLevel::Low => write!(f, "Low Risk"),
            RiskLevel::Medium => write!(f, "Medium Risk"),
            RiskLevel::High => write!(f, "High Risk"),
            RiskLevel::VeryHigh => write!(f, "Very High Risk"),
        }
    }
}

/// Outcome of a breach-database lookup. Never cached across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreachResult {
    pub is_compromised: bool,
    /// How many times the password appeared in known breaches.
    pub breach_count: u64,
    pub risk_level: RiskLevel,
    pub recommendation: String,
}

impl BreachResult {
    /// Derives the full result from a breach count.
    pub fn from_count(count: u64) -> Self {
        let recommendation = if count == 0 {
            "This password appears safe, but consider using a unique password for each account."
        } else if count < 10 {
            "This password has been compromised. Consider changing it immediately."
        } else if count < 100 {
            "This password is commonly breached. Change it immediately and use a password manager."
        } else {
            "This password is extremely common in breaches. Never use this password anywhere!"
        };

        BreachResult {
            is_compromised: count > 0,
            breach_count: count,
            risk_level: RiskLevel::from_count(count),
            recommendation: recommendation.to_string(),
        }
    }
}

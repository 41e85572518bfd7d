//! Score composer - main analysis logic.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashSet;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::backend::AdvancedBackend;
use crate::entropy::entropy_bits;
use crate::lexical::{self, CharacterComposition};
use crate::sections::detect_issues;
use crate::types::{AnalysisResult, BackendDetail, InputError, SecurityIssue, StrengthLevel};

/// How scores are produced. Fixed when the analyzer is constructed; never
/// re-evaluated mid-session.
enum ScoringStrategy {
    Builtin,
    Backend(Box<dyn AdvancedBackend>),
}

/// Password strength analyzer.
///
/// Holds the scoring strategy selected at construction: the built-in
/// additive algorithm, or an advanced backend whose output is normalized
/// onto the same 0-100 scale.
pub struct PasswordAnalyzer {
    strategy: ScoringStrategy,
}

impl Default for PasswordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordAnalyzer {
    /// Analyzer using the built-in scoring algorithm.
    pub fn new() -> Self {
        PasswordAnalyzer {
            strategy: ScoringStrategy::Builtin,
        }
    }

    /// Analyzer delegating to an advanced backend.
    pub fn with_backend(backend: Box<dyn AdvancedBackend>) -> Self {
        PasswordAnalyzer {
            strategy: ScoringStrategy::Backend(backend),
        }
    }

    /// Analyzer delegating to the `zxcvbn` backend.
    #[cfg(feature = "zxcvbn")]
    pub fn with_zxcvbn() -> Self {
        Self::with_backend(Box::new(crate::backend::ZxcvbnBackend))
    }

    /// Analyzes a password and returns a structured result.
    ///
    /// # Errors
    /// [`InputError::EmptyInput`] when the password is empty; never fails
    /// otherwise.
    pub fn analyze(&self, password: &SecretString) -> Result<AnalysisResult, InputError> {
        let pwd = password.expose_secret();
        if pwd.is_empty() {
            return Err(InputError::EmptyInput);
        }

        Ok(match &self.strategy {
            ScoringStrategy::Builtin => score_builtin(pwd),
            ScoringStrategy::Backend(backend) => score_with_backend(backend.as_ref(), pwd),
        })
    }

    /// Async version that sends the analysis result via channel.
    ///
    /// Debounces briefly before analyzing so interactive callers can issue
    /// one call per keystroke; a cancellation before the debounce elapses
    /// drops the analysis without sending.
    #[cfg(feature = "async")]
    pub async fn analyze_tx(
        &self,
        password: &SecretString,
        token: CancellationToken,
        tx: mpsc::Sender<Result<AnalysisResult, InputError>>,
    ) {
        use std::time::Duration;

        #[cfg(feature = "tracing")]
        tracing::info!("analysis is about to start...");

        tokio::time::sleep(Duration::from_millis(300)).await;
        if token.is_cancelled() {
            return;
        }

        if tx.send(self.analyze(password)).await.is_err() {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to send analysis result");
        }
    }
}

/// Analyzes a password with the built-in scoring algorithm.
///
/// Convenience wrapper over [`PasswordAnalyzer::new`].
pub fn analyze(password: &SecretString) -> Result<AnalysisResult, InputError> {
    PasswordAnalyzer::new().analyze(password)
}

/// Diversity points for the number of character classes present (0-25).
pub(crate) fn diversity_points(class_count: u8) -> i32 {
    match class_count {
        4.. => 25,
        3 => 20,
        2 => 15,
        1 => 10,
        0 => 0,
    }
}

fn push_missing_class_suggestions(
    composition: &CharacterComposition,
    suggestions: &mut Vec<String>,
) {
    if !composition.has_lowercase {
        suggestions.push("Add lowercase letters".to_string());
    }
    if !composition.has_uppercase {
        suggestions.push("Add uppercase letters".to_string());
    }
    if !composition.has_digit {
        suggestions.push("Add numbers".to_string());
    }
    if !composition.has_symbol {
        suggestions.push("Add special characters".to_string());
    }
}

fn suggestion_for(issue: &SecurityIssue) -> &'static str {
    match issue {
        SecurityIssue::RepeatedCharacters => "Avoid repeating the same character",
        SecurityIssue::SequentialCharacters => "Avoid sequential characters (123, abc)",
        SecurityIssue::KeyboardPattern => "Avoid keyboard patterns (qwerty, asdf)",
        SecurityIssue::DictionaryWord(_) => "Avoid using dictionary words",
        SecurityIssue::CommonPassword => "This password is too common - choose a unique one",
    }
}

fn dedup_preserving_order(suggestions: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Built-in additive point budget: length, diversity, entropy and
/// uniqueness credits minus a bounded pattern penalty, clamped to 0-100.
fn score_builtin(pwd: &str) -> AnalysisResult {
    let profile = lexical::profile(pwd);
    let mut score: i32 = 0;
    let mut suggestions: Vec<String> = Vec::new();

    // Length (0-30 points)
    score += match profile.length {
        16.. => 30,
        12..=15 => 25,
        8..=11 => 20,
        6..=7 => 15,
        4..=5 => 10,
        _ => 5,
    };
    if profile.length < 8 {
        suggestions.push("Use at least 8 characters".to_string());
        suggestions.push("Increase password length for better security".to_string());
    }

    // Character diversity (0-25 points)
    score += diversity_points(profile.composition.class_count());
    push_missing_class_suggestions(&profile.composition, &mut suggestions);

    // Entropy (0-25 points)
    let bits = entropy_bits(profile.length, profile.charset_size);
    score += if bits >= 70.0 {
        25
    } else if bits >= 60.0 {
        20
    } else if bits >= 50.0 {
        15
    } else if bits >= 40.0 {
        10
    } else {
        5
    };

    // Pattern and corpus penalties (bounded deduction)
    let issues = detect_issues(pwd);
    score -= (issues.len() as i32 * 7).min(25);
    for issue in &issues {
        suggestions.push(suggestion_for(issue).to_string());
    }

    // Uniqueness bonus (0-20 points)
    score += if profile.unique_char_ratio >= 0.8 {
        20
    } else if profile.unique_char_ratio >= 0.6 {
        15
    } else if profile.unique_char_ratio >= 0.4 {
        10
    } else {
        suggestions.push("Use more unique characters".to_string());
        5
    };

    let score = score.clamp(0, 100) as u8;

    AnalysisResult {
        score,
        strength: StrengthLevel::from_score(score),
        entropy_bits: bits,
        unique_char_ratio: profile.unique_char_ratio,
        length: profile.length,
        composition: profile.composition,
        issues,
        suggestions: dedup_preserving_order(suggestions),
        backend: None,
    }
}

/// Normalizes an advanced backend's report onto the 0-100 scale.
///
/// The numeric score adds length and entropy adjustments to the mapped
/// ordinal; the strength label comes from the ordinal alone, so the two can
/// legitimately disagree about the band.
fn score_with_backend(backend: &dyn AdvancedBackend, pwd: &str) -> AnalysisResult {
    let profile = lexical::profile(pwd);
    let report = backend.assess(pwd);

    let base: f64 = match report.ordinal {
        0 => 10.0,
        1 => 25.0,
        2 => 50.0,
        3 => 75.0,
        4 => 95.0,
        _ => 10.0,
    };
    let length_bonus = ((profile.length * 2) as f64).min(20.0);
    let entropy_bonus = (report.entropy_bits / 4.0).min(15.0);
    let score = (base + length_bonus + entropy_bonus).min(100.0) as u8;

    let mut suggestions: Vec<String> = Vec::new();
    if let Some(warning) = &report.warning {
        suggestions.push(warning.clone());
    }
    suggestions.extend(report.suggestions.iter().cloned());
    push_missing_class_suggestions(&profile.composition, &mut suggestions);
    if profile.length < 8 {
        suggestions.push("Use at least 8 characters".to_string());
    }
    if profile.length < 12 {
        suggestions.push("Consider using 12+ characters for better security".to_string());
    }

    AnalysisResult {
        score,
        strength: StrengthLevel::from_ordinal(report.ordinal),
        entropy_bits: entropy_bits(profile.length, profile.charset_size),
        unique_char_ratio: profile.unique_char_ratio,
        length: profile.length,
        composition: profile.composition,
        issues: detect_issues(pwd),
        suggestions: dedup_preserving_order(suggestions),
        backend: Some(BackendDetail {
            ordinal: report.ordinal,
            guesses: report.guesses,
            crack_times: report.crack_times,
        }),
    }
}

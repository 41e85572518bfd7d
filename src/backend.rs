//! Advanced analysis backend seam.
//!
//! The composer can delegate scoring to an external pattern-matching
//! analyzer. The backend is chosen once at construction; the built-in
//! algorithm remains the guaranteed fallback.

use crate::types::ScenarioCrackTimes;

/// What an advanced backend reports for one password.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReport {
    /// Categorical judgment on the backend's own 0-4 scale.
    pub ordinal: u8,
    /// Estimated guesses needed to crack the password.
    pub guesses: u64,
    /// Attack-aware entropy estimate in bits.
    pub entropy_bits: f64,
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
    /// Human-readable crack times for the four standard attack scenarios.
    pub crack_times: ScenarioCrackTimes,
}

/// An external password-strength analyzer.
///
/// Implementations must be pure with respect to process state and safe to
/// call from concurrent analyses.
pub trait AdvancedBackend: Send + Sync {
    fn assess(&self, password: &str) -> BackendReport;
}

/// Backend backed by the `zxcvbn` pattern-matching analyzer.
#[cfg(feature = "zxcvbn")]
#[derive(Debug, Default)]
pub struct ZxcvbnBackend;

#[cfg(feature = "zxcvbn")]
impl AdvancedBackend for ZxcvbnBackend {
    fn assess(&self, password: &str) -> BackendReport {
        let estimate = match zxcvbn::zxcvbn(password, &[]) {
            Ok(estimate) => estimate,
            // Only reachable for empty input, which the composer rejects
            // before delegating.
            Err(_) => {
                return BackendReport {
                    ordinal: 0,
                    guesses: 0,
                    entropy_bits: 0.0,
                    warning: None,
                    suggestions: Vec::new(),
                    crack_times: ScenarioCrackTimes {
                        online_throttled: "unknown".to_string(),
                        online_unthrottled: "unknown".to_string(),
                        offline_slow: "unknown".to_string(),
                        offline_fast: "unknown".to_string(),
                    },
                };
            }
        };

        let crack = estimate.crack_times();
        let crack_times = ScenarioCrackTimes {
            online_throttled: crack.online_throttling_100_per_hour().to_string(),
            online_unthrottled: crack.online_no_throttling_10_per_second().to_string(),
            offline_slow: crack.offline_slow_hashing_1e4_per_second().to_string(),
            offline_fast: crack.offline_fast_hashing_1e10_per_second().to_string(),
        };

        let feedback = estimate.feedback().as_ref();

        BackendReport {
            ordinal: estimate.score(),
            guesses: estimate.guesses(),
            // The analyzer reports guess counts; convert log10 guesses to bits.
            entropy_bits: estimate.guesses_log10() * std::f64::consts::LOG2_10,
            warning: feedback.and_then(|f| f.warning()).map(|w| w.to_string()),
            suggestions: feedback
                .map(|f| f.suggestions().iter().map(|s| s.to_string()).collect())
                .unwrap_or_default(),
            crack_times,
        }
    }
}

#[cfg(all(test, feature = "zxcvbn"))]
mod tests {
    use super::*;

    #[test]
    fn test_zxcvbn_scores_weak_password_low() {
        let report = ZxcvbnBackend.assess("password");
        assert!(report.ordinal <= 1);
        assert!(report.guesses > 0);
    }

    #[test]
    fn test_zxcvbn_scores_passphrase_high() {
        let report = ZxcvbnBackend.assess("correct horse battery staple rosebud");
        assert!(report.ordinal >= 3);
        assert!(report.entropy_bits > 0.0);
        assert!(!report.crack_times.offline_fast.is_empty());
    }
}

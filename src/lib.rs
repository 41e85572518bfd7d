//! Password strength auditing library
//!
//! This library scores candidate passwords and checks whether they have
//! appeared in public credential-breach corpora, using the k-anonymity
//! range protocol so the password never leaves the process.
//!
//! # Features
//!
//! - `breach` (default): breach-exposure lookups against the Pwned
//!   Passwords range API (pulls in `async`)
//! - `async`: async helpers with cancellation support
//! - `zxcvbn`: advanced analysis backend backed by the `zxcvbn` crate
//! - `tracing`: logging via the tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_COMMON_PASSWORDS_PATH`: custom path to a common-password list
//!   (default: `./assets/common_passwords.txt`)
//! - `PWD_DICTIONARY_WORDS_PATH`: custom path to a dictionary word list
//!   (default: `./assets/dictionary_words.txt`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_audit::{analyze, init_corpora};
//! use secrecy::SecretString;
//!
//! // Load corpora once at startup
//! init_corpora().expect("Failed to load corpora");
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let result = analyze(&password).expect("non-empty password");
//!
//! println!("Score: {}/100", result.score);
//! println!("Strength: {}", result.strength);
//! for suggestion in &result.suggestions {
//!     println!("- {suggestion}");
//! }
//! ```

// Internal modules
mod analyzer;
mod backend;
mod corpus;
mod entropy;
mod lexical;
mod sections;
mod types;

#[cfg(feature = "breach")]
mod breach;

// Public API
pub use analyzer::{PasswordAnalyzer, analyze};
pub use backend::{AdvancedBackend, BackendReport};
pub use corpus::{CorpusError, init_corpora, init_corpora_from_paths};
pub use entropy::{CrackTime, GUESSES_PER_SECOND, entropy_bits, estimate_crack_time};
pub use lexical::{CharacterComposition, LexicalProfile, profile};
pub use sections::detect_issues;
pub use types::{
    AnalysisResult, BackendDetail, BreachResult, InputError, RiskLevel, ScenarioCrackTimes,
    SecurityIssue, StrengthLevel,
};

#[cfg(feature = "zxcvbn")]
pub use backend::ZxcvbnBackend;

#[cfg(feature = "breach")]
pub use breach::{API_BASE, BreachChecker, BreachError, BreachStatus};

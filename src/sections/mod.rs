//! Weak-pattern detection sections
//!
//! Each section looks for one category of weakness. All sections run on
//! every password; none short-circuits another.

mod blacklist;
mod dictionary;
mod keyboard;
mod repeats;
mod sequence;

pub use blacklist::common_password;
pub use dictionary::dictionary_words;
pub use keyboard::keyboard_pattern;
pub use repeats::repeated_characters;
pub use sequence::sequential_characters;

use crate::types::SecurityIssue;

/// Runs every detection section and collects the issues found, in the
/// fixed order: repeats, sequences, keyboard patterns, dictionary words,
/// common-password match.
pub fn detect_issues(password: &str) -> Vec<SecurityIssue> {
    let lower = password.to_lowercase();

    let mut issues = Vec::new();
    issues.extend(repeated_characters(password));
    issues.extend(sequential_characters(&lower));
    issues.extend(keyboard_pattern(&lower));
    issues.extend(dictionary_words(&lower));
    issues.extend(common_password(&lower));
    issues
}

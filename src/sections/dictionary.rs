//! Dictionary-word section - flags embedded dictionary words.

use crate::corpus::dictionary_hits;
use crate::types::SecurityIssue;

/// Flags every dictionary word longer than 3 characters that appears as a
/// substring of the password, one issue per word.
///
/// Expects the already lower-cased password. Unlike the other sections this
/// one does not short-circuit: layered passwords like "password" produce a
/// hit for each embedded word.
pub fn dictionary_words(lower: &str) -> Vec<SecurityIssue> {
    dictionary_hits(lower)
        .into_iter()
        .map(SecurityIssue::DictionaryWord)
        .collect()
}

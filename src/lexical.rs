//! Lexical feature extraction - character classes, charset size, uniqueness.

use serde::Serialize;
use std::collections::HashSet;

/// Which character classes appear in a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharacterComposition {
    pub has_lowercase: bool,
    pub has_uppercase: bool,
    pub has_digit: bool,
    /// Anything outside ASCII alphanumerics, whitespace included.
    pub has_symbol: bool,
}

impl CharacterComposition {
    pub fn of(password: &str) -> Self {
        CharacterComposition {
            has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
            has_symbol: password.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }

    /// How many of the four classes are present (0-4).
    pub fn class_count(&self) -> u8 {
        [
            self.has_lowercase,
            self.has_uppercase,
            self.has_digit,
            self.has_symbol,
        ]
        .iter()
        .filter(|&&present| present)
        .count() as u8
    }
}

/// Lexical features of a single password.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexicalProfile {
    pub composition: CharacterComposition,
    /// Size of the smallest conventional alphabet covering the password.
    /// Each class contributes once: 26 + 26 + 10 + 32.
    pub charset_size: u32,
    /// Length in characters, not bytes.
    pub length: usize,
    pub unique_chars: usize,
    /// Distinct characters divided by length.
    pub unique_char_ratio: f64,
}

/// Extracts the lexical profile of a non-empty password.
pub fn profile(password: &str) -> LexicalProfile {
    let composition = CharacterComposition::of(password);

    let mut charset_size = 0u32;
    if composition.has_lowercase {
        charset_size += 26;
    }
    if composition.has_uppercase {
        charset_size += 26;
    }
    if composition.has_digit {
        charset_size += 10;
    }
    if composition.has_symbol {
        charset_size += 32;
    }

    let length = password.chars().count();
    let unique_chars = password.chars().collect::<HashSet<char>>().len();
    let unique_char_ratio = if length == 0 {
        0.0
    } else {
        unique_chars as f64 / length as f64
    };

    LexicalProfile {
        composition,
        charset_size,
        length,
        unique_chars,
        unique_char_ratio,
    }
}

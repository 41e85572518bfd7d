//! Keyboard-pattern section - flags adjacent-key runs.

use crate::types::SecurityIssue;

/// Adjacent-key runs on a QWERTY layout, longest variants first.
const KEYBOARD_RUNS: &[&str] = &[
    "qwertyuiop",
    "asdfghjkl",
    "zxcvbnm",
    "1qaz2wsx",
    "qwerty",
    "asdf",
    "zxcv",
    "1234",
    "1qaz",
    "2wsx",
    "3edc",
];

/// Flags the first adjacent-key run found as a substring.
///
/// Expects the already lower-cased password. Reports at most one issue.
pub fn keyboard_pattern(lower: &str) -> Option<SecurityIssue> {
    KEYBOARD_RUNS
        .iter()
        .any(|run| lower.contains(run))
        .then_some(SecurityIssue::KeyboardPattern)
}

//! Common-password section - exact match against the breach-derived list.

use crate::corpus::is_common_password;
use crate::types::SecurityIssue;

/// Flags passwords that appear verbatim in the common-password corpus.
///
/// Expects the already lower-cased password; the corpus is stored
/// lower-cased, so the membership test is case-insensitive overall.
pub fn common_password(lower: &str) -> Option<SecurityIssue> {
    is_common_password(lower).then_some(SecurityIssue::CommonPassword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_common_password_hit() {
        crate::corpus::reset_corpora_for_testing();
        assert_eq!(
            common_password("letmein"),
            Some(SecurityIssue::CommonPassword)
        );
    }

    #[test]
    #[serial]
    fn test_substrings_do_not_match() {
        crate::corpus::reset_corpora_for_testing();
        // Membership is exact, not containment.
        assert_eq!(common_password("letmein2024extra"), None);
    }

    #[test]
    #[serial]
    fn test_unlisted_password() {
        crate::corpus::reset_corpora_for_testing();
        assert_eq!(common_password("kh8#mqz!vr2p"), None);
    }
}

//! Normalized comparison of a submitted answer against the stored one.

/// Case-insensitive, surrounding-whitespace-insensitive equality.
///
/// Both sides are trimmed and lowercased, then compared exactly. No
/// punctuation stripping and no locale-aware folding; two empty strings
/// match. A missing submission is the caller's job to default to `""`.
#[must_use]
pub fn answers_match(submitted: &str, expected: &str) -> bool {
    submitted.trim().to_lowercase() == expected.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_case_and_surrounding_whitespace() {
        assert!(answers_match("  Paris  ", "paris"));
        assert!(answers_match("PARIS", " Paris\n"));
    }

    #[test]
    fn different_answers_do_not_match() {
        assert!(!answers_match("Paris", "France"));
    }

    #[test]
    fn empty_matches_empty() {
        assert!(answers_match("", ""));
        assert!(answers_match("   ", ""));
    }

    #[test]
    fn inner_whitespace_is_significant() {
        assert!(!answers_match("NewYork", "New York"));
    }
}

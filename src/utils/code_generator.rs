//! Short code generation and validation.

use rand::{Rng, distr::Alphanumeric};

/// Bounds for a valid code, generated or user-supplied.
pub const CODE_MIN_LENGTH: usize = 6;
pub const CODE_MAX_LENGTH: usize = 8;

/// Length of auto-generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Generates a random code of the given length from the 62-character
/// alphabet `[A-Za-z0-9]`.
///
/// Not cryptographically secure, and doesn't need to be: collisions are
/// caught by the uniqueness check in
/// [`crate::application::services::LinkService`], not avoided by entropy.
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns true iff `code` is 6-8 ASCII letters and digits.
pub fn is_valid_code(code: &str) -> bool {
    (CODE_MIN_LENGTH..=CODE_MAX_LENGTH).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_requested_length() {
        assert_eq!(generate_code(6).len(), 6);
        assert_eq!(generate_code(8).len(), 8);
    }

    #[test]
    fn test_generate_code_stays_in_alphabet() {
        for _ in 0..100 {
            let code = generate_code(GENERATED_CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generated_codes_pass_validation() {
        for _ in 0..100 {
            assert!(is_valid_code(&generate_code(GENERATED_CODE_LENGTH)));
        }
    }

    #[test]
    fn test_generate_code_rarely_repeats() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code(GENERATED_CODE_LENGTH));
        }

        // 1000 draws from a 62^6 space should essentially never collide.
        assert!(codes.len() > 990);
    }

    #[test]
    fn test_valid_code_shapes() {
        assert!(is_valid_code("abc123"));
        assert!(is_valid_code("ABCDEF"));
        assert!(is_valid_code("1234567"));
        assert!(is_valid_code("AbCd1234"));
    }

    #[test]
    fn test_code_too_short() {
        assert!(!is_valid_code("abc12"));
        assert!(!is_valid_code("a"));
    }

    #[test]
    fn test_code_too_long() {
        assert!(!is_valid_code("abc123456"));
    }

    #[test]
    fn test_code_empty() {
        assert!(!is_valid_code(""));
    }

    #[test]
    fn test_code_with_punctuation() {
        assert!(!is_valid_code("abc-12"));
        assert!(!is_valid_code("abc_123"));
        assert!(!is_valid_code("abc 12"));
        assert!(!is_valid_code("abc12!"));
    }

    #[test]
    fn test_code_with_non_ascii() {
        assert!(!is_valid_code("abcd1é"));
    }
}

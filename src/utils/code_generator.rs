//! Short code generation and validation utilities.
//!
//! Generated codes are drawn from an unambiguous alphanumeric alphabet so a
//! code read off a poster or spoken aloud survives the trip. Validation for
//! custom user-provided codes enforces the same character class.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Alphanumeric alphabet minus the characters that are easy to confuse
/// (`0 O 1 l I`).
pub const SAFE_ALPHABET: &[u8] =
    b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789";

/// Maximum length accepted for any short code, generated or custom.
pub const MAX_CODE_LENGTH: usize = 20;

/// Codes reserved for system endpoints to prevent routing conflicts.
const RESERVED_CODES: &[&str] = &["api", "admin", "stats", "health", "dashboard", "go"];

/// Generates a random short code of the given length from [`SAFE_ALPHABET`].
///
/// With the default length of 6 the code space holds 57^6 ≈ 3.4 * 10^10
/// values, so collisions stay rare until a domain accumulates millions of
/// links; the allocator handles the remainder with bounded retry.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| SAFE_ALPHABET[rng.random_range(0..SAFE_ALPHABET.len())] as char)
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 1 to [`MAX_CODE_LENGTH`] characters
/// - Allowed characters: [`SAFE_ALPHABET`] only
/// - Cannot be a reserved system code
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.len() > MAX_CODE_LENGTH {
        return Err(AppError::bad_request(
            format!("Custom code must be 1-{} characters", MAX_CODE_LENGTH),
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code.bytes().all(|b| SAFE_ALPHABET.contains(&b)) {
        return Err(AppError::bad_request(
            "Custom code may only contain unambiguous letters and digits (0, O, 1, l, I excluded)",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_requested_length() {
        assert_eq!(generate_code(6).len(), 6);
        assert_eq!(generate_code(12).len(), 12);
    }

    #[test]
    fn test_generate_code_uses_safe_alphabet_only() {
        let code = generate_code(64);
        assert!(code.bytes().all(|b| SAFE_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generate_code_avoids_ambiguous_characters() {
        for _ in 0..100 {
            let code = generate_code(20);
            assert!(!code.contains(['0', 'O', '1', 'l', 'I']));
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code(8));
        }

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_validate_single_character() {
        assert!(validate_custom_code("a").is_ok());
    }

    #[test]
    fn test_validate_maximum_length() {
        let code: String = "a".repeat(MAX_CODE_LENGTH);
        assert!(validate_custom_code(&code).is_ok());
    }

    #[test]
    fn test_validate_mixed_case_and_digits() {
        assert!(validate_custom_code("Promo2025").is_ok());
    }

    #[test]
    fn test_validate_empty() {
        assert!(validate_custom_code("").is_err());
    }

    #[test]
    fn test_validate_too_long() {
        let code: String = "a".repeat(MAX_CODE_LENGTH + 1);
        assert!(validate_custom_code(&code).is_err());
    }

    #[test]
    fn test_validate_rejects_ambiguous_characters() {
        assert!(validate_custom_code("hello1").is_err());
        assert!(validate_custom_code("zer0").is_err());
        assert!(validate_custom_code("lol").is_err());
    }

    #[test]
    fn test_validate_rejects_special_characters() {
        assert!(validate_custom_code("my-code").is_err());
        assert!(validate_custom_code("my_code").is_err());
        assert!(validate_custom_code("code!").is_err());
    }

    #[test]
    fn test_validate_rejects_reserved_codes() {
        for reserved in ["api", "admin", "stats", "health", "dashboard", "go"] {
            let result = validate_custom_code(reserved);
            assert!(result.is_err(), "{reserved} should be reserved");
            assert!(result.unwrap_err().to_string().contains("reserved"));
        }
    }
}

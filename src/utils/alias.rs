//! Short code generation, normalization, and validation.
//!
//! Random codes are 6 lowercase base-36 characters. User-supplied aliases
//! and captions are normalized into the short-code alphabet before the
//! allocator consults the store.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of randomly generated short codes.
pub const RANDOM_CODE_LENGTH: usize = 6;

/// Alphabet for randomly generated codes (base 36, lowercase).
const CODE_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Codes that collide with service routes and cannot be used as aliases.
const RESERVED_CODES: &[&str] = &["api", "health"];

/// Accepted short-code format.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9-]{2,50}$").unwrap());

/// One or more whitespace characters.
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Everything a caption-derived alias must drop.
static NON_ALIAS_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").unwrap());

/// Generates a random 6-character lowercase base-36 short code.
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..RANDOM_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect()
}

/// Normalizes a user-supplied custom alias: trims surrounding whitespace and
/// collapses internal whitespace runs to single hyphens.
///
/// Returns an empty string for blank input; the allocator treats that as "no
/// alias requested" and falls back to random generation.
pub fn normalize_alias(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw.trim(), "-").into_owned()
}

/// Derives a deterministic alias from a bulk caption: lowercase, trim, strip
/// characters outside `[a-z0-9\s-]`, collapse whitespace runs to hyphens.
pub fn derive_alias(caption: &str) -> String {
    let lowered = caption.to_lowercase();
    let stripped = NON_ALIAS_CHARS.replace_all(lowered.trim(), "");
    WHITESPACE_RUN
        .replace_all(stripped.trim(), "-")
        .into_owned()
}

/// Validates a short code against the accepted format and the reserved list.
///
/// # Errors
///
/// Returns [`AppError::InvalidFormat`] when the code is outside
/// `[a-zA-Z0-9-]{2,50}` or shadows a service route.
pub fn validate_alias(code: &str) -> Result<(), AppError> {
    if !ALIAS_REGEX.is_match(code) {
        return Err(AppError::invalid_format(
            "Alias must be 2-50 characters of letters, digits, and hyphens",
            json!({ "alias": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::invalid_format(
            "This alias is reserved",
            json!({ "alias": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), RANDOM_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_lowercase_base36() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "unexpected character in {code}"
            );
        }
    }

    #[test]
    fn test_generate_code_mostly_unique() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code());
        }

        // 36^6 possibilities; a birthday collision in 1000 draws is ~1e-5.
        assert!(codes.len() >= 999);
    }

    #[test]
    fn test_generated_codes_pass_validation() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(validate_alias(&code).is_ok(), "generated {code} rejected");
        }
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_alias("  my-alias  "), "my-alias");
    }

    #[test]
    fn test_normalize_collapses_whitespace_to_hyphens() {
        assert_eq!(normalize_alias("my cool   alias"), "my-cool-alias");
        assert_eq!(normalize_alias("tab\tseparated"), "tab-separated");
    }

    #[test]
    fn test_normalize_blank_is_empty() {
        assert_eq!(normalize_alias("   "), "");
        assert_eq!(normalize_alias(""), "");
    }

    #[test]
    fn test_derive_alias_spec_example() {
        assert_eq!(derive_alias("My Post"), "my-post");
    }

    #[test]
    fn test_derive_alias_strips_punctuation() {
        assert_eq!(
            derive_alias("Compound Exercise Benefits!"),
            "compound-exercise-benefits"
        );
        assert_eq!(derive_alias("Q&A: Rust (2024)"), "qa-rust-2024");
    }

    #[test]
    fn test_derive_alias_collapses_runs() {
        assert_eq!(derive_alias("  a   b\t c "), "a-b-c");
    }

    #[test]
    fn test_derive_alias_keeps_existing_hyphens() {
        assert_eq!(derive_alias("pre-made plan"), "pre-made-plan");
    }

    #[test]
    fn test_derive_alias_symbols_only_is_empty() {
        assert_eq!(derive_alias("!!!"), "");
    }

    #[test]
    fn test_validate_accepts_spec_format() {
        assert!(validate_alias("ab").is_ok());
        assert!(validate_alias("My-Post-2024").is_ok());
        assert!(validate_alias(&"a".repeat(50)).is_ok());
    }

    #[test]
    fn test_validate_rejects_too_short() {
        assert!(validate_alias("a").is_err());
        assert!(validate_alias("").is_err());
    }

    #[test]
    fn test_validate_rejects_too_long() {
        assert!(validate_alias(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_characters() {
        assert!(validate_alias("my alias").is_err());
        assert!(validate_alias("my_alias").is_err());
        assert!(validate_alias("café").is_err());
    }

    #[test]
    fn test_validate_rejects_reserved() {
        for &reserved in RESERVED_CODES {
            assert!(
                validate_alias(reserved).is_err(),
                "reserved code '{reserved}' should be rejected"
            );
        }
    }
}

//! Destination URL validation.
//!
//! The submitted URL is validated but stored as-is (trimmed only), so a
//! resolved link returns exactly the string its creator supplied.

use url::Url;

/// Errors that can occur while validating a destination URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS destinations are allowed")]
    UnsupportedProtocol,
}

/// Validates that `input` parses as an absolute http(s) URL.
///
/// Returns the trimmed input string unchanged on success; no normalization
/// is applied to the stored destination.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for strings that do not
/// parse as absolute URLs, and [`UrlValidationError::UnsupportedProtocol`]
/// for schemes other than `http`/`https` (blocks `javascript:`, `data:`,
/// `file:`, and friends as redirect destinations).
pub fn validate_original_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    let url =
        Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_https() {
        let result = validate_original_url("https://example.com/a");
        assert_eq!(result.unwrap(), "https://example.com/a");
    }

    #[test]
    fn test_valid_http() {
        assert!(validate_original_url("http://example.com").is_ok());
    }

    #[test]
    fn test_input_returned_unchanged() {
        // No normalization: host case, default port, and fragment survive.
        let raw = "https://EXAMPLE.com:443/Path?q=1#frag";
        assert_eq!(validate_original_url(raw).unwrap(), raw);
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(
            validate_original_url("  https://example.com  ").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_relative_url_rejected() {
        let result = validate_original_url("/just/a/path");
        assert!(matches!(
            result.unwrap_err(),
            UrlValidationError::InvalidFormat(_)
        ));
    }

    #[test]
    fn test_not_a_url_rejected() {
        assert!(validate_original_url("not-a-url").is_err());
        assert!(validate_original_url("").is_err());
    }

    #[test]
    fn test_javascript_scheme_rejected() {
        let result = validate_original_url("javascript:alert(1)");
        assert!(matches!(
            result.unwrap_err(),
            UrlValidationError::UnsupportedProtocol
        ));
    }

    #[test]
    fn test_ftp_scheme_rejected() {
        assert!(matches!(
            validate_original_url("ftp://example.com/f").unwrap_err(),
            UrlValidationError::UnsupportedProtocol
        ));
    }

    #[test]
    fn test_query_params_preserved() {
        let raw = "https://example.com/search?q=rust&lang=en";
        assert_eq!(validate_original_url(raw).unwrap(), raw);
    }
}

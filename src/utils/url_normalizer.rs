//! URL normalization and validation.

use url::Url;

/// Coerces user input towards an absolute http(s) URL.
///
/// Trims surrounding whitespace and prepends `https://` when no http(s)
/// scheme is present. A best-effort convenience transform: casing, trailing
/// slashes and query strings are left untouched. Validation happens
/// separately, on the normalized result, via [`is_valid_url`].
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Returns true iff `url` parses as an absolute URL with an `http` or
/// `https` scheme.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prepends_https() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
    }

    #[test]
    fn test_normalize_keeps_http() {
        assert_eq!(normalize_url("http://x.com"), "http://x.com");
    }

    #[test]
    fn test_normalize_keeps_https() {
        assert_eq!(normalize_url("https://x.com/path?q=1"), "https://x.com/path?q=1");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_url("  http://x.com  "), "http://x.com");
        assert_eq!(normalize_url("\texample.com\n"), "https://example.com");
    }

    #[test]
    fn test_normalize_does_not_touch_casing_or_slashes() {
        assert_eq!(normalize_url("https://Example.COM/"), "https://Example.COM/");
        assert_eq!(normalize_url("http://x.com/a/"), "http://x.com/a/");
    }

    #[test]
    fn test_valid_http_and_https() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/path?q=1"));
    }

    #[test]
    fn test_invalid_scheme() {
        assert!(!is_valid_url("ftp://x.com"));
        assert!(!is_valid_url("javascript:alert(1)"));
        assert!(!is_valid_url("mailto:test@example.com"));
    }

    #[test]
    fn test_invalid_syntax() {
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("https://not a url"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_relative_path_is_invalid() {
        assert!(!is_valid_url("/just/a/path"));
    }

    #[test]
    fn test_scheme_less_input_valid_after_normalization() {
        let normalized = normalize_url("example.com/page");
        assert!(is_valid_url(&normalized));
    }
}

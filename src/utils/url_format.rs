//! Syntactic URL checks.
//!
//! A URL is well-formed when it is free of control characters, parses, uses
//! `http` or `https`, and names a host. Nothing is rewritten: the stored
//! redirect target is the submitted string, byte for byte.

use url::Url;
use validator::ValidateLength;

use crate::domain::url_validator::UrlRejection;

/// True if `input` has at most `max` characters.
pub fn within_length(input: &str, max: usize) -> bool {
    input.validate_length(None, Some(max as u64), None)
}

/// Parses `input` as an absolute http(s) URL with a host.
///
/// The URL parser silently drops tabs and newlines, so input containing
/// control characters is refused up front; otherwise the checked URL and
/// the stored one would differ.
///
/// # Errors
///
/// Returns [`UrlRejection::InvalidFormat`] for anything else, including
/// `javascript:`, `data:`, `mailto:` and scheme-less input.
pub fn parse_http_url(input: &str) -> Result<Url, UrlRejection> {
    if input.trim() != input || input.chars().any(char::is_control) {
        return Err(UrlRejection::InvalidFormat);
    }

    let url = Url::parse(input).map_err(|_| UrlRejection::InvalidFormat)?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlRejection::InvalidFormat),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlRejection::InvalidFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_https() {
        let url = parse_http_url("https://example.com/page").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/page");
    }

    #[test]
    fn test_parse_http_with_port_and_query() {
        let url = parse_http_url("http://example.com:8080/search?q=rust").unwrap();
        assert_eq!(url.port(), Some(8080));
        assert_eq!(url.query(), Some("q=rust"));
    }

    #[test]
    fn test_parse_ip_literal() {
        assert!(parse_http_url("http://93.184.216.34/").is_ok());
        assert!(parse_http_url("http://[2606:4700:4700::1111]/").is_ok());
    }

    #[test]
    fn test_reject_not_a_url() {
        assert_eq!(
            parse_http_url("not a valid url"),
            Err(UrlRejection::InvalidFormat)
        );
    }

    #[test]
    fn test_reject_empty_string() {
        assert_eq!(parse_http_url(""), Err(UrlRejection::InvalidFormat));
    }

    #[test]
    fn test_reject_missing_scheme() {
        assert_eq!(
            parse_http_url("example.com/page"),
            Err(UrlRejection::InvalidFormat)
        );
    }

    #[test]
    fn test_reject_other_schemes() {
        for input in [
            "ftp://example.com/file.txt",
            "file:///etc/passwd",
            "javascript:alert('xss')",
            "data:text/plain,Hello",
            "mailto:test@example.com",
        ] {
            assert_eq!(
                parse_http_url(input),
                Err(UrlRejection::InvalidFormat),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_reject_surrounding_whitespace() {
        assert_eq!(
            parse_http_url(" https://example.com"),
            Err(UrlRejection::InvalidFormat)
        );
    }

    #[test]
    fn test_reject_embedded_control_characters() {
        for input in [
            "https://example.com/a\nb",
            "https://example.com/a\tb",
            "https://exam\rple.com/",
            "https://example.com/\u{7f}",
        ] {
            assert_eq!(
                parse_http_url(input),
                Err(UrlRejection::InvalidFormat),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_within_length_counts_characters() {
        assert!(within_length("https://example.com", 19));
        assert!(!within_length("https://example.com", 18));
        assert!(within_length("https://example.com/é", 21));
    }
}

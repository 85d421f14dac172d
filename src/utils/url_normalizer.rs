//! Destination URL validation and normalization.
//!
//! Destinations are validated once at the engine boundary, before a link is
//! persisted; the redirect path serves them verbatim.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Normalizes a destination URL to a canonical form.
///
/// # Normalization Rules
///
/// 1. **Protocol**: Only HTTP and HTTPS are allowed
/// 2. **Hostname**: Converted to lowercase
/// 3. **Default ports**: Removed (80 for HTTP, 443 for HTTPS)
/// 4. **Path, query, fragment**: Preserved as-is; a fragment routes inside
///    the destination page and must survive the redirect
///
/// # Security
///
/// Rejects dangerous schemes like `javascript:`, `data:`, `file:`.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed URLs.
/// Returns [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url =
        Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if let Some(host) = url.host_str() {
        let host_lowercase = host.to_ascii_lowercase();
        url.set_host(Some(&host_lowercase)).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to set normalized host".to_string())
        })?;
    }

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        url.set_port(None).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_simple_https() {
        assert_eq!(
            normalize_url("https://example.com").unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_normalize_uppercase_host() {
        assert_eq!(
            normalize_url("https://EXAMPLE.COM/Path").unwrap(),
            "https://example.com/Path"
        );
    }

    #[test]
    fn test_normalize_strips_default_ports() {
        assert_eq!(
            normalize_url("https://example.com:443/x").unwrap(),
            "https://example.com/x"
        );
        assert_eq!(
            normalize_url("http://example.com:80/x").unwrap(),
            "http://example.com/x"
        );
    }

    #[test]
    fn test_normalize_keeps_custom_port() {
        assert_eq!(
            normalize_url("https://example.com:8443/x").unwrap(),
            "https://example.com:8443/x"
        );
    }

    #[test]
    fn test_normalize_preserves_query_and_fragment() {
        assert_eq!(
            normalize_url("https://example.com/docs?v=2#install").unwrap(),
            "https://example.com/docs?v=2#install"
        );
    }

    #[test]
    fn test_rejects_invalid_format() {
        assert!(matches!(
            normalize_url("not-a-url"),
            Err(UrlNormalizationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        for input in ["javascript:alert(1)", "data:text/html,x", "file:///etc/passwd"] {
            assert!(matches!(
                normalize_url(input),
                Err(UrlNormalizationError::UnsupportedProtocol)
            ));
        }
    }
}

//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Whether `value` parses as an absolute `http` or `https` URL with a host.
pub fn is_web_url(value: &str) -> bool {
    url::Url::parse(value)
        .is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https") && parsed.has_host())
}

/// Truncate text to at most 180 characters for log and error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" https://example.com ".to_string())),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn is_web_url_needs_http_scheme_and_host() {
        assert!(is_web_url("http://localhost:8080/app"));
        assert!(is_web_url("HTTPS://Shop.Test"));
        assert!(!is_web_url("file:///srv/index.html"));
        assert!(!is_web_url("shop.test/home"));
        assert!(!is_web_url("https://"));
    }

    #[test]
    fn compact_text_trims_and_truncates() {
        let long = format!("  {}  ", "a".repeat(400));
        assert_eq!(compact_text(&long).len(), 180);
        assert_eq!(compact_text(" short "), "short");
    }
}

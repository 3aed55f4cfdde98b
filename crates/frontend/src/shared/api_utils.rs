//! API utilities for dashboard-server communication
//!
//! The dashboard is served by the same server that answers the detail API,
//! so the page origin is the default base.

/// Origin of the current page, e.g. "https://trade.example:5000".
///
/// Returns an empty string when no window is available; URLs built on it are
/// then relative to the page.
pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Configured base URL, or the page origin.
pub fn api_base(configured: Option<&str>) -> String {
    match configured {
        Some(base) if !base.trim().is_empty() => base.trim().to_string(),
        _ => page_origin(),
    }
}

/// Join a base URL and an API path ("/api/...").
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::api_url;
/// assert_eq!(api_url("http://127.0.0.1:5000/", "/api/webhook/3"), "http://127.0.0.1:5000/api/webhook/3");
/// ```
pub fn api_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_joins_slashes() {
        assert_eq!(api_url("http://h", "/api/webhook/1"), "http://h/api/webhook/1");
        assert_eq!(api_url("http://h/", "api/webhook/1"), "http://h/api/webhook/1");
        assert_eq!(api_url("", "/api/webhook/1"), "/api/webhook/1");
    }

    #[test]
    fn test_configured_base_wins() {
        assert_eq!(api_base(Some(" http://10.0.0.2:5000 ")), "http://10.0.0.2:5000");
    }
}

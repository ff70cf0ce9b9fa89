//! API utilities for talking to the delivery service
//!
//! Provides helper functions for constructing API URLs.

use super::config::{config, ApiConfig};

/// Get the base URL for API requests
///
/// Uses `api.base_url` when configured. Otherwise the base is built from the
/// current window location and `api.port`, e.g. "http://localhost:5000".
/// Returns an empty string (relative URLs) if no window is available.
pub fn api_base() -> String {
    let location = web_sys::window().map(|w| {
        let location = w.location();
        let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
        let hostname = location
            .hostname()
            .unwrap_or_else(|_| "127.0.0.1".to_string());
        (protocol, hostname)
    });
    resolve_base(&config().api, location)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/deliveries");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

pub(crate) fn resolve_base(api: &ApiConfig, location: Option<(String, String)>) -> String {
    let configured = api.base_url.trim().trim_end_matches('/');
    if !configured.is_empty() {
        return configured.to_string();
    }
    match location {
        Some((protocol, hostname)) => format!("{}//{}:{}", protocol, hostname, api.port),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str, port: u16) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            port,
        }
    }

    #[test]
    fn test_configured_base_wins() {
        let location = Some(("https:".to_string(), "dash.example".to_string()));
        assert_eq!(
            resolve_base(&api("http://api.example/", 5000), location),
            "http://api.example"
        );
    }

    #[test]
    fn test_base_from_location() {
        let location = Some(("https:".to_string(), "dash.example".to_string()));
        assert_eq!(resolve_base(&api("", 5000), location), "https://dash.example:5000");
    }

    #[test]
    fn test_no_window_means_relative() {
        assert_eq!(resolve_base(&api(" ", 8080), None), "");
    }
}

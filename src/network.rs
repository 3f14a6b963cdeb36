//! Base URL constants and environment lookup.

/// Base URL used when neither the builder nor the environment supplies one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding [`DEFAULT_API_URL`].
pub const API_URL_ENV: &str = "API_URL";

/// Resolve the base URL through an arbitrary variable lookup.
///
/// An unset or empty `API_URL` falls back to [`DEFAULT_API_URL`].
pub fn api_url_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup(API_URL_ENV)
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

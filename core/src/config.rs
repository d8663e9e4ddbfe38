//! Client configuration.
//!
//! # Design
//! The base URL is an explicit value passed to `Session` construction
//! instead of process-wide state. "Configure once, use everywhere" still
//! works: build one `Config` and hand it to every session. No URL
//! validation happens here; a malformed base URL surfaces as a transport
//! failure when a request is dispatched.

/// Fallback base URL used when no configuration is supplied.
pub const DEFAULT_API_URL: &str = "https://contentbird.herokuapp.com";

/// Where the client sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    api_url: String,
}

impl Config {
    /// Create a configuration for the given base URL. A trailing `/` is
    /// trimmed so path concatenation never produces a double slash.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

//! Request assembly.
//!
//! # Design
//! `build_request` is a pure function from a logical call to an
//! [`HttpRequest`] descriptor: no I/O, no failure path. Malformed inputs
//! (say, a garbage base URL) pass straight through and surface when the
//! descriptor is dispatched. Header order is fixed and observable in the
//! dry-run rendering: `Accept`, `Accept-Language`, `CB-KEY`, `CB-SECRET`.

use crate::config::Config;
use crate::http::{HttpMethod, HttpRequest};

/// Per-call options forwarded to the API.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Context filters, comma-joined into the `context` query parameter.
    /// An empty list omits the parameter entirely.
    pub context: Vec<String>,
    /// Page number for paginated endpoints; `None` omits the parameter.
    pub page: Option<u32>,
    /// Dry-run switch: render the equivalent curl invocation instead of
    /// performing the call.
    pub only_curl: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context<I, S>(mut self, context: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context = context.into_iter().map(Into::into).collect();
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn only_curl(mut self) -> Self {
        self.only_curl = true;
        self
    }
}

/// Assemble the descriptor for one call.
///
/// `Accept-Language` is always present: it carries the locale when the
/// session has one and is sent empty otherwise. The body is attached later
/// by the session (POST only), after the dry-run short-circuit.
pub(crate) fn build_request(
    config: &Config,
    key: &str,
    secret: &str,
    locale: Option<&str>,
    method: HttpMethod,
    path: &str,
    options: &Options,
) -> HttpRequest {
    let mut query = Vec::new();
    if !options.context.is_empty() {
        query.push(("context".to_string(), options.context.join(",")));
    }
    if let Some(page) = options.page {
        query.push(("page".to_string(), page.to_string()));
    }

    let headers = vec![
        ("Accept".to_string(), "application/json".to_string()),
        (
            "Accept-Language".to_string(),
            locale.unwrap_or_default().to_string(),
        ),
        ("CB-KEY".to_string(), key.to_string()),
        ("CB-SECRET".to_string(), secret.to_string()),
    ];

    HttpRequest {
        method,
        url: format!("{}{}", config.api_url(), path),
        query,
        headers,
        body: None,
    }
}

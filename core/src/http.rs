//! HTTP descriptor types for the request pipeline.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! request builder produces `HttpRequest` values and the response
//! interpreter consumes `HttpResponse` values; only the transport module
//! touches the network in between. Keeping the descriptor inert makes
//! request assembly fully testable without I/O, and is also what lets
//! dry-run mode render a request it never sends.
//!
//! All fields use owned types (`String`, `Vec`) so descriptors can be
//! moved across the pipeline without lifetime concerns.

use url::form_urlencoded;

/// HTTP method for a request. The API surface only ever issues GET and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `query` and `headers` are ordered; the order is observable in the
/// dry-run rendering and kept stable by the builder.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Base URL plus path, without the query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// JSON text attached to POST requests; `None` for GET.
    pub body: Option<String>,
}

impl HttpRequest {
    /// The fully qualified URL with the form-urlencoded query string
    /// appended. No `?` is emitted when there are no query parameters.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.query {
            serializer.append_pair(name, value);
        }
        format!("{}?{}", self.url, serializer.finish())
    }
}

/// An HTTP response described as plain data, produced by the transport and
/// consumed by the response interpreter.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

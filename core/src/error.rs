//! Error types for the content API client.
//!
//! # Design
//! Each failure classification gets its own variant so raising-mode callers
//! can discriminate with a plain `match`; there is no generic catch-all
//! kind. `NotFound`, `Application` and `Forbidden` carry the normalized
//! response body; the API puts its human-readable message there and callers
//! frequently want it. `into_payload` is the tuple-mode half of the
//! contract: every variant folds into a `(false, payload)`-shaped payload,
//! so nothing escapes a tuple-mode call as an error.

use thiserror::Error;

use crate::payload::Payload;

/// Failure classifications for one API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not complete within the timeout bounds.
    #[error("API did not respond within the timeout")]
    Timeout,

    /// The server replied 404; the payload is the parsed response body.
    #[error("resource not found")]
    NotFound(Payload),

    /// The server replied 500; the payload is the parsed response body.
    #[error("remote application error")]
    Application(Payload),

    /// The server replied 403; the payload is the parsed response body.
    #[error("credentials rejected by the API")]
    Forbidden(Payload),

    /// A classified response body was not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Parsing(String),

    /// The request payload could not be serialized to JSON.
    #[error("request body could not be serialized: {0}")]
    Serialization(String),

    /// The request failed below HTTP level (DNS, refused connection, ...).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server replied with a status the interpreter does not map.
    #[error("unhandled HTTP status {0}")]
    UnmappedStatus(u16),
}

impl ApiError {
    /// Fold the failure into the payload a tuple-mode call reports.
    ///
    /// Classifications that carry a response body pass it through; the
    /// timeout payload is the fixed `{message: "Timeout"}`; everything else
    /// synthesizes a `{message: ...}` object from the error display.
    pub fn into_payload(self) -> Payload {
        match self {
            ApiError::Timeout => Payload::message("Timeout"),
            ApiError::NotFound(payload)
            | ApiError::Application(payload)
            | ApiError::Forbidden(payload) => payload,
            other => Payload::message(other.to_string()),
        }
    }
}

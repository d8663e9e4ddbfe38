//! Response interpretation.
//!
//! # Design
//! One status table maps the transport outcome onto the error taxonomy.
//! 200, 404, 500 and 403 all parse and normalize the body: the API puts
//! its message there on failures too. 403 has its own classification even
//! though the service historically documented only 404 and 500; every
//! other status is reported as `UnmappedStatus` rather than falling
//! through silently.

use tracing::warn;

use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::payload::{normalize, Payload};

/// Classify one response.
pub(crate) fn interpret(response: HttpResponse) -> Result<Payload, ApiError> {
    let HttpResponse { status, body } = response;
    match status {
        200 => parse(&body),
        404 => Err(ApiError::NotFound(parse(&body)?)),
        500 => Err(ApiError::Application(parse(&body)?)),
        403 => Err(ApiError::Forbidden(parse(&body)?)),
        other => {
            warn!(status = other, "unmapped HTTP status from the API");
            Err(ApiError::UnmappedStatus(other))
        }
    }
}

fn parse(body: &str) -> Result<Payload, ApiError> {
    let value = serde_json::from_str(body).map_err(|e| ApiError::Parsing(e.to_string()))?;
    Ok(normalize(value))
}

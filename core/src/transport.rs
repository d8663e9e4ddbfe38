//! Request dispatch.
//!
//! # Design
//! Every call gets a fresh ureq agent: no pooling, no reuse, one binding
//! per one-shot request. Non-2xx statuses are returned as data
//! (`http_status_as_error(false)`) so classification stays in the response
//! interpreter. Timeout expiry is the only transport failure with its own
//! classification; everything else below HTTP level folds into
//! `ApiError::Transport`.
//!
//! `curl_command` is the dry-run half: it renders the descriptor as a
//! reproducible shell invocation and never touches the network.

use std::time::Duration;

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Connection (open) timeout.
const OPEN_TIMEOUT: Duration = Duration::from_secs(2);
/// Total request timeout.
const TOTAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Execute a descriptor against the network.
pub(crate) fn dispatch(request: &HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_connect(Some(OPEN_TIMEOUT))
        .timeout_global(Some(TOTAL_TIMEOUT))
        .build()
        .new_agent();

    let url = request.full_url();
    debug!(method = request.method.as_str(), %url, "dispatching API request");

    let result = match request.method {
        HttpMethod::Get => {
            let mut call = agent.get(&url);
            for (name, value) in &request.headers {
                call = call.header(name.as_str(), value.as_str());
            }
            call.call()
        }
        HttpMethod::Post => {
            let mut call = agent.post(&url).content_type("application/json");
            for (name, value) in &request.headers {
                call = call.header(name.as_str(), value.as_str());
            }
            match &request.body {
                Some(body) => call.send(body.as_bytes()),
                None => call.send_empty(),
            }
        }
    };

    let mut response = result.map_err(classify_transport_error)?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(classify_transport_error)?;

    debug!(status, "API response received");
    Ok(HttpResponse { status, body })
}

fn classify_transport_error(error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::Timeout(_) => ApiError::Timeout,
        ureq::Error::Io(io) if io.kind() == std::io::ErrorKind::TimedOut => ApiError::Timeout,
        other => ApiError::Transport(other.to_string()),
    }
}

/// Render the shell command equivalent to dispatching `request`: method,
/// fully qualified URL, and every header in descriptor order.
pub(crate) fn curl_command(request: &HttpRequest) -> String {
    let mut command = format!("curl -X {} '{}'", request.method.as_str(), request.full_url());
    for (name, value) in &request.headers {
        command.push_str(&format!(" -H '{name}:{value}'"));
    }
    command.push_str(" -i");
    command
}

//! Credentialed session facade.
//!
//! # Design
//! A [`Session`] owns one credential pair, an optional locale, and its
//! injected [`Config`]. The error-handling convention is part of the type:
//! `Session<Raising>` (the default) returns `Result<Payload, ApiError>`,
//! `Session<Tupled>` returns `(bool, Payload)` and never lets a failure
//! escape. The convention is fixed at construction and rendered by the
//! sealed [`ErrorMode`] strategy, so each mode's return shape is checked
//! at compile time.
//!
//! Endpoint methods are thin path templates over [`Session::api_get`] /
//! [`Session::api_post`], which wire the pipeline: build the descriptor,
//! short-circuit to the curl rendering in dry-run mode, otherwise dispatch
//! and interpret.

use std::marker::PhantomData;

use serde::Serialize;

use crate::config::Config;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::payload::Payload;
use crate::request::{build_request, Options};
use crate::response::interpret;
use crate::transport::{curl_command, dispatch};

mod sealed {
    pub trait Sealed {}
}

/// How one call's outcome is presented to the caller.
///
/// Implemented only by [`Raising`] and [`Tupled`].
pub trait ErrorMode: sealed::Sealed {
    type Output;

    fn render(result: Result<Payload, ApiError>) -> Self::Output;
}

/// Failures become typed [`ApiError`]s; successes return the payload.
#[derive(Debug, Clone, Copy)]
pub enum Raising {}

/// Every call returns `(ok, payload)`; failures fold into
/// `(false, payload)` and nothing escapes as an error.
#[derive(Debug, Clone, Copy)]
pub enum Tupled {}

impl sealed::Sealed for Raising {}
impl sealed::Sealed for Tupled {}

impl ErrorMode for Raising {
    type Output = Result<Payload, ApiError>;

    fn render(result: Result<Payload, ApiError>) -> Self::Output {
        result
    }
}

impl ErrorMode for Tupled {
    type Output = (bool, Payload);

    fn render(result: Result<Payload, ApiError>) -> Self::Output {
        match result {
            Ok(payload) => (true, payload),
            Err(error) => (false, error.into_payload()),
        }
    }
}

/// POST envelope: the API expects creation parameters under `content`.
#[derive(Serialize)]
struct ContentEnvelope<T: Serialize> {
    content: T,
}

/// A credentialed client handle for the content API.
///
/// Immutable after construction; sessions are cheap to clone and share no
/// mutable state, so concurrent calls from different sessions (or clones)
/// are independent.
#[derive(Clone)]
pub struct Session<M: ErrorMode = Raising> {
    config: Config,
    key: String,
    secret: String,
    locale: Option<String>,
    mode: PhantomData<M>,
}

impl<M: ErrorMode> Session<M> {
    pub fn new(config: Config, key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            config,
            key: key.into(),
            secret: secret.into(),
            locale: None,
            mode: PhantomData,
        }
    }

    /// Set the locale sent as `Accept-Language`.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    // Endpoint surface. Retrieval is GET; creation is POST with the
    // parameters wrapped under a `content` key.

    pub fn home_contents(&self, options: Options) -> M::Output {
        self.api_get("/api/home/contents", options)
    }

    pub fn section_contents(&self, section: &str, options: Options) -> M::Output {
        self.api_get(&format!("/api/sections/{section}/contents"), options)
    }

    pub fn section_content(&self, section: &str, content: &str, options: Options) -> M::Output {
        self.api_get(&format!("/api/sections/{section}/contents/{content}"), options)
    }

    pub fn new_section_content(&self, section: &str, options: Options) -> M::Output {
        self.api_get(&format!("/api/sections/{section}/contents/new"), options)
    }

    pub fn create_section_content(
        &self,
        section: &str,
        params: impl Serialize,
        options: Options,
    ) -> M::Output {
        self.api_post(
            &format!("/api/sections/{section}/contents"),
            ContentEnvelope { content: params },
            options,
        )
    }

    pub fn contents(&self, options: Options) -> M::Output {
        self.api_get("/api/contents", options)
    }

    pub fn content(&self, content: &str, options: Options) -> M::Output {
        self.api_get(&format!("/api/contents/{content}"), options)
    }

    /// GET an arbitrary API path. Escape hatch for endpoints without a
    /// dedicated method.
    pub fn api_get(&self, path: &str, options: Options) -> M::Output {
        M::render(self.call(HttpMethod::Get, path, Ok(None), &options))
    }

    /// POST an arbitrary API path with a JSON body.
    pub fn api_post(&self, path: &str, form: impl Serialize, options: Options) -> M::Output {
        let body = serde_json::to_string(&form)
            .map(Some)
            .map_err(|e| ApiError::Serialization(e.to_string()));
        M::render(self.call(HttpMethod::Post, path, body, &options))
    }

    /// The pipeline for one call. The dry-run check runs before the body
    /// result is consulted, so `only_curl` succeeds even when
    /// serialization failed.
    fn call(
        &self,
        method: HttpMethod,
        path: &str,
        body: Result<Option<String>, ApiError>,
        options: &Options,
    ) -> Result<Payload, ApiError> {
        let mut request = build_request(
            &self.config,
            &self.key,
            &self.secret,
            self.locale.as_deref(),
            method,
            path,
            options,
        );
        if options.only_curl {
            return Ok(Payload::String(curl_command(&request)));
        }
        request.body = body?;
        interpret(dispatch(&request)?)
    }
}

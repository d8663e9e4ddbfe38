//! Synchronous, credentialed client for the ContentBird content API.
//!
//! # Overview
//! A [`Session`] issues one-shot GET/POST calls against a configured base
//! URL, authenticating with `CB-KEY` / `CB-SECRET` headers and forwarding
//! `context` / `page` options as query parameters. Response bodies are
//! parsed and normalized into [`Payload`] trees with canonical keys.
//!
//! # Design
//! - The pipeline is build → dispatch → interpret: `request` assembles a
//!   plain-data [`HttpRequest`], `transport` executes it with fixed
//!   timeout bounds (2 s connect, 5 s total), `response` classifies the
//!   outcome.
//! - The error-handling convention is chosen at construction time through
//!   the session's type parameter: [`Raising`] returns
//!   `Result<Payload, ApiError>`, [`Tupled`] returns `(bool, Payload)`.
//! - Dry-run (`only_curl`) renders the equivalent curl invocation instead
//!   of dispatching, and never fails.
//! - No caching, retries, rate limiting, or connection pooling: every call
//!   is an independent request on a fresh agent.

pub mod config;
pub mod error;
pub mod http;
pub mod payload;
pub mod session;

mod request;
mod response;
mod transport;

pub use config::{Config, DEFAULT_API_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use payload::{normalize, Key, Payload};
pub use request::Options;
pub use session::{ErrorMode, Raising, Session, Tupled};

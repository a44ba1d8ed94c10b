//! Small async HTTP client for a JSON API behind a configurable host.
//!
//! # Overview
//! `FetchUtility` turns an endpoint plus optional query parameters into a
//! URL, attaches method-specific headers, performs one request through a
//! `Transport`, and returns parsed JSON (or the raw response for CSV).
//!
//! # Design
//! - URL building (`url`) and header/body building (`config`) are pure and
//!   tested without a network.
//! - The network call sits behind the `Transport` trait; `ReqwestTransport`
//!   is the default, tests substitute an in-memory one.
//! - Failures are reported to an `ErrorLogger` and returned as `FetchError`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod query;
pub mod transport;
pub mod url;

pub use client::{FetchUtility, Payload, RequestParams, RequestUtility, HOST_ENV_VAR};
pub use config::{AcceptType, RequestConfig};
pub use error::FetchError;
pub use http::{CachePolicy, Headers, HttpMethod, HttpResponse};
pub use logger::{ErrorLogger, LogErrorLogger};
pub use query::QueryParams;
pub use transport::{ReqwestTransport, Transport};

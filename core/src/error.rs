//! Error types for the fetch utility.
//!
//! # Design
//! Every failure a request can hit maps to one variant. `FetchUtility` logs
//! the error with component and operation context before returning it, so a
//! caller that only wants "did it work" can call `.ok()` and still leave a
//! trace in the logs.

use thiserror::Error;

/// Errors returned by `FetchUtility` requests and `RequestConfig` builders.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response, or its body could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a status in the 400..=600 range.
    #[error("{status_text}")]
    Status { status: u16, status_text: String },

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be parsed as JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl FetchError {
    /// HTTP status carried by the error, if the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

//! Per-request configuration: method, headers, body and cache hint.
//!
//! # Design
//! One `RequestConfig` type with a constructor per method. The fields are
//! private and have no setters, so a config is fixed once built and is
//! dropped after the call it was made for.

use serde::Serialize;

use crate::error::FetchError;
use crate::http::{CachePolicy, Headers, HttpMethod};

pub const ACCEPT: &str = "Accept";
pub const ACCEPT_TYPE: &str = "Accept-Type";
pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";

/// Media types a caller can declare it understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptType {
    Csv,
    Json,
}

impl AcceptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcceptType::Csv => "text/csv",
            AcceptType::Json => "application/json",
        }
    }
}

/// Immutable description of one HTTP request, minus its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    method: HttpMethod,
    headers: Headers,
    body: Option<String>,
    cache: CachePolicy,
}

impl RequestConfig {
    fn with_method(method: HttpMethod, token: Option<&str>) -> Self {
        let mut headers = Headers::new();
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            headers.set(AUTHORIZATION, format!("Bearer {token}"));
        }
        Self {
            method,
            headers,
            body: None,
            cache: CachePolicy::NoCache,
        }
    }

    pub fn get(accept_type: Option<&str>, token: Option<&str>) -> Self {
        let mut config = Self::with_method(HttpMethod::Get, token);
        if let Some(accept_type) = accept_type.filter(|a| !a.is_empty()) {
            config.headers.set(ACCEPT_TYPE, accept_type);
        }
        config
    }

    pub fn post<B: Serialize + ?Sized>(
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<Self, FetchError> {
        Self::with_json_body(HttpMethod::Post, body, token)
    }

    pub fn put<B: Serialize + ?Sized>(
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<Self, FetchError> {
        Self::with_json_body(HttpMethod::Put, body, token)
    }

    pub fn delete(token: Option<&str>) -> Self {
        Self::with_method(HttpMethod::Delete, token)
    }

    fn with_json_body<B: Serialize + ?Sized>(
        method: HttpMethod,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<Self, FetchError> {
        let mut config = Self::with_method(method, token);
        config.headers.set(CONTENT_TYPE, "application/json");
        config.body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| FetchError::Serialization(e.to_string()))?;
        Ok(config)
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn cache(&self) -> CachePolicy {
        self.cache
    }

    /// Media type the caller declared, from `Accept` or else `Accept-Type`.
    pub fn accept_type(&self) -> Option<&str> {
        self.headers
            .get(ACCEPT)
            .or_else(|| self.headers.get(ACCEPT_TYPE))
    }
}

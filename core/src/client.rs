//! Host-bound request utility for a JSON API.
//!
//! # Design
//! `FetchUtility` owns a host, a `Transport` and an `ErrorLogger`. Each
//! public method builds a `RequestConfig`, formats the URL, performs exactly
//! one transport call and classifies the response. Failures of any kind are
//! reported to the logger with the operation name and then returned, so the
//! caller can still tell them apart.
//!
//! The host is changed through `&mut self`; in-flight requests hold `&self`,
//! so a host change can never interleave with URL formatting.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::config::{AcceptType, RequestConfig};
use crate::error::FetchError;
use crate::http::HttpResponse;
use crate::logger::{ErrorLogger, LogErrorLogger};
use crate::query::QueryParams;
use crate::transport::{ReqwestTransport, Transport};
use crate::url::{format_url, set_query_parameters};

/// Environment variable read for the host when none is given.
pub const HOST_ENV_VAR: &str = "NEXT_PUBLIC_HOST";

const COMPONENT: &str = "FetchUtility";

/// Inputs shared by every request method.
///
/// `B` is the body type; it defaults to `serde_json::Value` for requests
/// that never send one.
#[derive(Debug)]
pub struct RequestParams<'a, B: ?Sized = Value> {
    pub endpoint: &'a str,
    pub query_params: Option<&'a QueryParams>,
    pub body: Option<&'a B>,
    pub token: Option<&'a str>,
    pub accept_type: Option<&'a str>,
}

impl<'a> RequestParams<'a> {
    pub fn new(endpoint: &'a str) -> Self {
        Self {
            endpoint,
            query_params: None,
            body: None,
            token: None,
            accept_type: None,
        }
    }
}

impl<'a, B: ?Sized> RequestParams<'a, B> {
    pub fn with_query_params(mut self, query_params: &'a QueryParams) -> Self {
        self.query_params = Some(query_params);
        self
    }

    pub fn with_token(mut self, token: &'a str) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_accept_type(mut self, accept_type: &'a str) -> Self {
        self.accept_type = Some(accept_type);
        self
    }

    pub fn with_body<T: ?Sized>(self, body: &'a T) -> RequestParams<'a, T> {
        RequestParams {
            endpoint: self.endpoint,
            query_params: self.query_params,
            body: Some(body),
            token: self.token,
            accept_type: self.accept_type,
        }
    }
}

/// What a successful request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Parsed JSON body.
    Json(Value),
    /// The untouched response, returned when the caller asked for CSV.
    Raw(HttpResponse),
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Raw(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&HttpResponse> {
        match self {
            Payload::Raw(response) => Some(response),
            Payload::Json(_) => None,
        }
    }
}

pub struct FetchUtility<T = ReqwestTransport> {
    host: String,
    transport: T,
    logger: Arc<dyn ErrorLogger>,
}

impl FetchUtility<ReqwestTransport> {
    /// Creates a utility for `host`, or for `$NEXT_PUBLIC_HOST` when `host`
    /// is empty. The environment is read once, here.
    pub fn new(host: &str) -> Self {
        Self::with_transport(host, ReqwestTransport::new())
    }
}

impl<T: Transport> FetchUtility<T> {
    pub fn with_transport(host: &str, transport: T) -> Self {
        Self {
            host: resolve_host(host),
            transport,
            logger: Arc::new(LogErrorLogger),
        }
    }

    pub fn with_logger(mut self, logger: impl ErrorLogger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    pub fn get_host(&self) -> &str {
        &self.host
    }

    pub fn set_new_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `host/endpoint/`, before any query parameters.
    pub fn format_url(&self, endpoint: &str) -> String {
        format_url(&self.host, endpoint)
    }

    /// The exact URL a request for `endpoint` with `query_params` targets.
    pub fn request_url(&self, endpoint: &str, query_params: Option<&QueryParams>) -> String {
        let url = self.format_url(endpoint);
        match query_params {
            Some(query_params) => set_query_parameters(&url, query_params),
            None => url,
        }
    }

    pub async fn get(&self, params: RequestParams<'_>) -> Result<Payload, FetchError> {
        let config = RequestConfig::get(params.accept_type, params.token);
        self.dispatch("get", params.endpoint, params.query_params, Ok(config))
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        params: RequestParams<'_, B>,
    ) -> Result<Payload, FetchError> {
        let config = RequestConfig::post(params.body, params.token);
        self.dispatch("post", params.endpoint, params.query_params, config)
            .await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        params: RequestParams<'_, B>,
    ) -> Result<Payload, FetchError> {
        let config = RequestConfig::put(params.body, params.token);
        self.dispatch("put", params.endpoint, params.query_params, config)
            .await
    }

    pub async fn delete(&self, params: RequestParams<'_>) -> Result<Payload, FetchError> {
        let config = RequestConfig::delete(params.token);
        self.dispatch("delete", params.endpoint, params.query_params, Ok(config))
            .await
    }

    async fn dispatch(
        &self,
        operation: &str,
        endpoint: &str,
        query_params: Option<&QueryParams>,
        config: Result<RequestConfig, FetchError>,
    ) -> Result<Payload, FetchError> {
        let url = self.request_url(endpoint, query_params);
        let result = match config {
            Ok(config) => self.send_request(&url, &config).await,
            Err(err) => Err(err),
        };
        match &result {
            Ok(_) => log::debug!(target: "fetch_util", "{operation} {url} succeeded"),
            Err(err) => self.logger.log(&err.to_string(), COMPONENT, operation),
        }
        result
    }

    async fn send_request(&self, url: &str, config: &RequestConfig) -> Result<Payload, FetchError> {
        let response = self.transport.execute(url, config).await?;

        if response.is_failure() {
            let status_text = if response.status_text.is_empty() {
                format!("HTTP {}", response.status)
            } else {
                response.status_text
            };
            return Err(FetchError::Status {
                status: response.status,
                status_text,
            });
        }

        if config.accept_type() == Some(AcceptType::Csv.as_str()) {
            return Ok(Payload::Raw(response));
        }

        parse_json(&response.body)
    }
}

/// The caller-facing contract of a request utility.
///
/// Bodies are `serde_json::Value` here so the trait stays object safe;
/// `FetchUtility`'s inherent `post`/`put` accept any `Serialize` body.
#[async_trait]
pub trait RequestUtility: Send + Sync {
    async fn get(&self, params: RequestParams<'_>) -> Result<Payload, FetchError>;
    async fn post(&self, params: RequestParams<'_>) -> Result<Payload, FetchError>;
    async fn put(&self, params: RequestParams<'_>) -> Result<Payload, FetchError>;
    async fn delete(&self, params: RequestParams<'_>) -> Result<Payload, FetchError>;
    fn get_host(&self) -> &str;
    fn set_new_host(&mut self, host: &str);
}

#[async_trait]
impl<T: Transport> RequestUtility for FetchUtility<T> {
    async fn get(&self, params: RequestParams<'_>) -> Result<Payload, FetchError> {
        FetchUtility::get(self, params).await
    }

    async fn post(&self, params: RequestParams<'_>) -> Result<Payload, FetchError> {
        FetchUtility::post(self, params).await
    }

    async fn put(&self, params: RequestParams<'_>) -> Result<Payload, FetchError> {
        FetchUtility::put(self, params).await
    }

    async fn delete(&self, params: RequestParams<'_>) -> Result<Payload, FetchError> {
        FetchUtility::delete(self, params).await
    }

    fn get_host(&self) -> &str {
        FetchUtility::get_host(self)
    }

    fn set_new_host(&mut self, host: &str) {
        FetchUtility::set_new_host(self, host);
    }
}

fn resolve_host(host: &str) -> String {
    if host.is_empty() {
        std::env::var(HOST_ENV_VAR).unwrap_or_default()
    } else {
        host.to_string()
    }
}

fn parse_json(body: &str) -> Result<Payload, FetchError> {
    serde_json::from_str(body)
        .map(Payload::Json)
        .map_err(|e| FetchError::Deserialization(e.to_string()))
}

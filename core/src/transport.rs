//! The network seam: one `RequestConfig` in, one `HttpResponse` out.
//!
//! # Design
//! `Transport` hands back every response it receives, whatever its status.
//! Status interpretation belongs to `FetchUtility`. Only failures to get a
//! response at all (connect errors, unreadable bodies) come back as `Err`.

use async_trait::async_trait;

use crate::config::RequestConfig;
use crate::error::FetchError;
use crate::http::{Headers, HttpMethod, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, url: &str, config: &RequestConfig) -> Result<HttpResponse, FetchError>;
}

/// `Transport` backed by a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn collect_headers(map: &reqwest::header::HeaderMap) -> Headers {
    let mut headers = Headers::new();
    for (name, value) in map {
        if let Ok(value) = value.to_str() {
            headers.append(name.as_str(), value);
        }
    }
    headers
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, url: &str, config: &RequestConfig) -> Result<HttpResponse, FetchError> {
        let mut request = self
            .client
            .request(to_reqwest_method(config.method()), url)
            .header(reqwest::header::CACHE_CONTROL, config.cache().header_value());
        for (name, value) in config.headers().iter() {
            request = request.header(name, value);
        }
        if let Some(body) = config.body() {
            request = request.body(body.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        let headers = collect_headers(response.headers());
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_map_one_to_one() {
        assert_eq!(to_reqwest_method(HttpMethod::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest_method(HttpMethod::Post), reqwest::Method::POST);
        assert_eq!(to_reqwest_method(HttpMethod::Put), reqwest::Method::PUT);
        assert_eq!(to_reqwest_method(HttpMethod::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn repeated_response_headers_are_all_kept() {
        use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, SET_COOKIE};

        let mut map = HeaderMap::new();
        map.insert(CONTENT_TYPE, HeaderValue::from_static("text/csv"));
        map.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        map.append(SET_COOKIE, HeaderValue::from_static("b=2"));

        let headers = collect_headers(&map);
        assert_eq!(headers.get("content-type"), Some("text/csv"));
        assert_eq!(headers.get_all("set-cookie").collect::<Vec<_>>(), vec!["a=1", "b=2"]);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let transport = ReqwestTransport::new();
        let err = transport
            .execute(&format!("http://{addr}/nothing/"), &RequestConfig::get(None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}

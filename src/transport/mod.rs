//! Transport abstraction layer for the agent API

pub mod http;
#[cfg(test)]
pub mod mock;

use std::{
    collections::HashMap,
    task::{Context, Poll},
    time::Duration,
};

pub use http::HttpTransport;

use async_trait::async_trait;
use bytes::Bytes;

use crate::protocol::error::ConsulError;

/// Protocol-agnostic transport request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Path segments under the base URL (e.g., `["v1", "agent", "self"]`)
    ///
    /// Each segment is escaped on its own by the transport.
    pub path: Vec<String>,

    /// HTTP method (e.g., "GET", "PUT")
    pub method: String,

    /// Query parameters, in insertion order
    pub query: Vec<(String, String)>,

    /// Headers for the request
    pub headers: HashMap<String, String>,

    /// Request body as bytes
    pub body: Bytes,

    /// Per-request timeout; `None` leaves the transport default in place
    pub timeout: Option<Duration>,
}

impl TransportRequest {
    /// Create a new transport request
    pub fn new<I, S>(path: I, method: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            method: method.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: Bytes::new(),
            timeout: None,
        }
    }

    /// The path joined with `/`, unescaped, for logs and assertions
    pub fn endpoint(&self) -> String {
        format!("/{}", self.path.join("/"))
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Look up the first value of a query parameter
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Add a header to the request
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Protocol-agnostic transport response
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body, fully read
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a new transport response
    pub fn new(status: u16) -> Self {
        Self {
            status,
            body: Bytes::new(),
        }
    }

    /// Set the response body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Check if the response indicates success (2xx status code)
    pub fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Response body as lossy UTF-8, for diagnostics
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).trim().to_string()
    }
}

/// Core transport trait for executing requests against an agent
#[async_trait]
pub trait Transport: Clone + Send + Sync + 'static {
    /// Check if the transport is ready to accept requests
    ///
    /// This is used by Tower's Service trait to implement backpressure
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), ConsulError>>;

    /// Execute a transport request asynchronously
    ///
    /// The returned response owns its fully-read body; nothing stays open
    /// after this returns.
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, ConsulError>;
}

#[async_trait]
impl<T: Transport> Transport for Box<T> {
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), ConsulError>> {
        (**self).poll_ready(cx)
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, ConsulError> {
        (**self).execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = TransportRequest::new(["v1", "agent", "members"], "GET")
            .query("wan", "1")
            .header("Accept", "application/json")
            .timeout(Some(Duration::from_secs(5)));

        assert_eq!(req.endpoint(), "/v1/agent/members");
        assert_eq!(req.query_param("wan"), Some("1"));
        assert_eq!(req.query_param("dc"), None);
        assert_eq!(
            req.headers.get("Accept"),
            Some(&"application/json".to_string())
        );
        assert_eq!(req.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_response_status_classes() {
        assert!(TransportResponse::new(200).is_success());
        assert!(TransportResponse::new(204).is_success());
        assert!(!TransportResponse::new(301).is_success());
        assert!(!TransportResponse::new(404).is_success());
        assert!(!TransportResponse::new(500).is_success());
    }

    #[test]
    fn test_body_text() {
        let resp = TransportResponse::new(500).body("Unknown service ID\n");
        assert_eq!(resp.body_text(), "Unknown service ID");
    }
}

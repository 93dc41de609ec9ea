//! HTTP transport implementation for the agent API

use std::task::{Context, Poll};

use async_trait::async_trait;
use url::Url;

use crate::protocol::error::ConsulError;

use super::{Transport, TransportRequest, TransportResponse};

/// HTTP transport implementation using reqwest
///
/// Clones share the same connection pool.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a new HTTP transport
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the agent (e.g., "<http://127.0.0.1:8500>")
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a new HTTP transport with a custom reqwest client
    pub fn with_client(base_url: Url, client: reqwest::Client) -> Self {
        Self { client, base_url }
    }

    /// Base URL of the agent this transport talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve the full request URL, including query parameters
    ///
    /// Path segments are appended to the base URL's path one at a time and
    /// percent-encoded individually, so `/`, `\` and `%` inside an identifier
    /// never introduce a new segment or a dot segment.
    fn request_url(&self, request: &TransportRequest) -> Result<Url, ConsulError> {
        // `.` and `..` have no encoded form that servers keep as a literal segment
        if let Some(segment) = request
            .path
            .iter()
            .find(|segment| matches!(segment.as_str(), "." | ".."))
        {
            return Err(ConsulError::Validation(format!(
                "Path segment {:?} cannot be sent",
                segment
            )));
        }

        let mut url = self.base_url().clone();
        url.path_segments_mut()
            .map_err(|_| {
                ConsulError::Transport(format!("Agent URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(&request.path);

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), ConsulError>> {
        // HTTP client is always ready
        Poll::Ready(Ok(()))
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, ConsulError> {
        let url = self.request_url(&request)?;

        let mut req_builder = match request.method.as_str() {
            "GET" => self.client.get(url),
            "PUT" => self.client.put(url),
            "POST" => self.client.post(url),
            "DELETE" => self.client.delete(url),
            _ => {
                return Err(ConsulError::Transport(format!(
                    "Unsupported HTTP method: {}",
                    request.method
                )))
            }
        };

        for (key, value) in request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.body.is_empty() {
            req_builder = req_builder.body(request.body);
        }

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        let response = req_builder.send().await?;

        let status = response.status().as_u16();

        // Reading the body to the end releases the connection back to the pool
        let body = response.bytes().await?;

        Ok(TransportResponse { status, body })
    }
}

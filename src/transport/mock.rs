use std::{
    sync::{Arc, Mutex},
    task::{Context, Poll},
};

use async_trait::async_trait;

use crate::{
    protocol::error::ConsulError,
    transport::{Transport, TransportRequest, TransportResponse},
};

/// Mock transport for internal testing
///
/// Answers every request from a handler closure and records what was sent,
/// so tests can inspect paths, query strings and bodies.
#[derive(Clone)]
pub(crate) struct MockTransport {
    handler: Arc<dyn Fn(&TransportRequest) -> TransportResponse + Send + Sync>,
    requests: Arc<Mutex<Vec<TransportRequest>>>,
}

impl MockTransport {
    /// Create a new mock transport with a custom request handler
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&TransportRequest) -> TransportResponse + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock transport that always returns 200 OK with an empty body
    pub fn ok() -> Self {
        Self::new(|_| TransportResponse::new(200))
    }

    /// Create a mock transport that always returns the given status and body
    pub fn respond(status: u16, body: &'static str) -> Self {
        Self::new(move |_| TransportResponse::new(status).body(body))
    }

    /// Requests executed so far
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> TransportRequest {
        self.requests().pop().expect("no request was executed")
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), ConsulError>> {
        Poll::Ready(Ok(()))
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, ConsulError> {
        let response = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        Ok(response)
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport").finish()
    }
}

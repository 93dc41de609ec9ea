//! Core agent protocol service implementation

use std::{
    sync::Arc,
    task::{Context, Poll},
};

use futures::future::BoxFuture;
use tower_service::Service;

use crate::{
    codec::Codec,
    protocol::{error::ConsulError, operation::AgentOperation},
    service::{AgentRequest, AgentResponse},
    transport::{Transport, TransportRequest, TransportResponse},
};

/// Core agent protocol service that wraps a transport
///
/// Each call performs exactly one request/response cycle: build the request,
/// execute it, require a 2xx status, then decode the body.
pub struct ConsulProtocolService<T> {
    transport: T,
    codec: Arc<dyn Codec>,
}

impl<T> ConsulProtocolService<T>
where
    T: Transport,
{
    /// Create a new agent protocol service
    ///
    /// # Arguments
    ///
    /// * `transport` - The underlying transport implementation
    /// * `codec` - The codec for serialization/deserialization
    pub fn new(transport: T, codec: Arc<dyn Codec>) -> Self {
        Self { transport, codec }
    }

    /// Build a transport request from an agent request
    fn build_transport_request(
        req: &AgentRequest,
        codec: &dyn Codec,
    ) -> Result<TransportRequest, ConsulError> {
        let method = req.operation.method();

        let mut transport_req = TransportRequest::new(req.operation.path(), method)
            .header("Accept", codec.content_type())
            .timeout(req.context.timeout);

        for (key, value) in req.operation.query() {
            transport_req = transport_req.query(key, value);
        }

        if let Some(dc) = &req.context.datacenter {
            transport_req = transport_req.query("dc", dc.clone());
        }

        if let Some(auth) = &req.context.auth {
            let (header, value) = auth.to_header();
            transport_req = transport_req.header(header, value);
        }

        for (key, value) in &req.context.metadata {
            transport_req = transport_req.header(key.clone(), value.clone());
        }

        let body = codec.encode_request(&req.operation)?;
        if !body.is_empty() {
            transport_req = transport_req
                .header("Content-Type", codec.content_type())
                .body(body);
        }

        Ok(transport_req)
    }

    /// Parse a transport response into an agent response
    fn parse_transport_response(
        transport_resp: TransportResponse,
        codec: &dyn Codec,
        operation: &AgentOperation,
    ) -> Result<AgentResponse, ConsulError> {
        if !transport_resp.is_success() {
            let body = transport_resp.body_text();
            tracing::warn!(
                status = transport_resp.status,
                endpoint = %operation.endpoint(),
                "agent rejected request: {}",
                body
            );
            return Err(ConsulError::Status {
                status: transport_resp.status,
                body,
            });
        }

        codec.decode_response(&transport_resp.body, operation)
    }
}

impl<T> Service<AgentRequest> for ConsulProtocolService<T>
where
    T: Transport + Clone,
{
    type Response = AgentResponse;
    type Error = ConsulError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.transport.poll_ready(cx)
    }

    fn call(&mut self, req: AgentRequest) -> Self::Future {
        let transport = self.transport.clone();
        let codec = self.codec.clone();

        Box::pin(async move {
            let transport_req = Self::build_transport_request(&req, codec.as_ref())?;

            tracing::debug!(
                method = %transport_req.method,
                endpoint = %transport_req.endpoint(),
                query = ?transport_req.query,
                "sending agent request"
            );

            let transport_resp = transport.execute(transport_req).await?;
            tracing::debug!(status = transport_resp.status, "agent responded");

            Self::parse_transport_response(transport_resp, codec.as_ref(), &req.operation)
        })
    }
}

impl<T> Clone for ConsulProtocolService<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            codec: self.codec.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tower::ServiceExt;

    use crate::{
        codec::JsonCodec,
        layer::AuthCredentials,
        protocol::registration::AgentServiceRegistration,
        service::RequestContext,
        transport::mock::MockTransport,
    };

    use super::*;

    fn service(transport: MockTransport) -> ConsulProtocolService<MockTransport> {
        ConsulProtocolService::new(transport, Arc::new(JsonCodec))
    }

    #[tokio::test]
    async fn test_service_lists_members() {
        let transport = MockTransport::respond(200, r#"[{"Name":"node1","Status":1}]"#);
        let service = service(transport.clone());

        let request = AgentRequest::new(
            AgentOperation::Members { wan: true },
            RequestContext::default(),
        );
        let response = service.oneshot(request).await.unwrap();

        let members = response.into_members().unwrap();
        assert_eq!(members[0].name, "node1");

        let sent = transport.last_request();
        assert_eq!(sent.method, "GET");
        assert_eq!(sent.endpoint(), "/v1/agent/members");
        assert_eq!(sent.query_param("wan"), Some("1"));
        assert!(sent.body.is_empty());
    }

    #[tokio::test]
    async fn test_service_applies_context() {
        let transport = MockTransport::respond(200, "{}");
        let service = service(transport.clone());

        let context = RequestContext::new()
            .with_datacenter("dc2")
            .with_auth(AuthCredentials::token("secret"))
            .with_metadata("X-Request-Id", "abc");
        let request = AgentRequest::new(AgentOperation::Checks, context);
        service.oneshot(request).await.unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.query_param("dc"), Some("dc2"));
        assert_eq!(
            sent.headers.get("X-Consul-Token"),
            Some(&"secret".to_string())
        );
        assert_eq!(sent.headers.get("X-Request-Id"), Some(&"abc".to_string()));
    }

    #[tokio::test]
    async fn test_service_sends_registration_body() {
        let transport = MockTransport::ok();
        let service = service(transport.clone());

        let operation = AgentOperation::ServiceRegister {
            registration: AgentServiceRegistration::new("web").with_id("web1"),
        };
        let response = service
            .oneshot(AgentRequest::new(operation, RequestContext::default()))
            .await
            .unwrap();
        assert!(response.is_empty());

        let sent = transport.last_request();
        assert_eq!(sent.method, "PUT");
        assert_eq!(
            sent.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        let body: serde_json::Value = serde_json::from_slice(&sent.body).unwrap();
        assert_eq!(body, serde_json::json!({"ID": "web1", "Name": "web"}));
    }

    #[tokio::test]
    async fn test_service_error_status() {
        let transport = MockTransport::respond(500, "Unknown service ID \"web\"");
        let service = service(transport);

        let operation = AgentOperation::ServiceDeregister {
            service_id: "web".to_string(),
        };
        let result = service
            .oneshot(AgentRequest::new(operation, RequestContext::default()))
            .await;

        match result {
            Err(ConsulError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("Unknown service"));
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_service_error_status_skips_decode() {
        // A valid-looking body must not leak through a failed status
        let transport = MockTransport::respond(403, r#"{"web":{"ID":"web"}}"#);
        let service = service(transport);

        let result = service
            .oneshot(AgentRequest::new(
                AgentOperation::Services,
                RequestContext::default(),
            ))
            .await;

        assert!(matches!(
            result,
            Err(ConsulError::Status { status: 403, .. })
        ));
    }
}

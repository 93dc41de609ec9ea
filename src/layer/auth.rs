//! Authentication layer for agent requests

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use base64::{engine::general_purpose, Engine as _};
use tower_layer::Layer;
use tower_service::Service;

use crate::{
    protocol::error::ConsulError,
    service::{AgentRequest, AgentResponse},
};

/// Header carrying an ACL token
pub const TOKEN_HEADER: &str = "X-Consul-Token";

/// Authentication credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCredentials {
    /// ACL token, sent in the `X-Consul-Token` header
    Token(String),

    /// Bearer token authentication
    Bearer(String),

    /// Basic HTTP authentication, typically for an agent behind a proxy
    Basic { username: String, password: String },
}

impl AuthCredentials {
    /// Create ACL token credentials
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    /// Create bearer token credentials
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    /// Create basic auth credentials
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from `CONSUL_HTTP_TOKEN` or `CONSUL_HTTP_AUTH`
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary variable lookup
    ///
    /// A token takes precedence over `user:pass` basic credentials.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("CONSUL_HTTP_TOKEN").filter(|t| !t.is_empty()) {
            return Some(Self::token(token));
        }

        let auth = lookup("CONSUL_HTTP_AUTH").filter(|a| !a.is_empty())?;
        match auth.split_once(':') {
            Some((username, password)) => Some(Self::basic(username, password)),
            None => Some(Self::basic(auth, "")),
        }
    }

    /// Get the header name and value for this credential
    pub fn to_header(&self) -> (String, String) {
        match self {
            AuthCredentials::Token(token) => (TOKEN_HEADER.to_string(), token.clone()),
            AuthCredentials::Bearer(token) => {
                ("Authorization".to_string(), format!("Bearer {}", token))
            }
            AuthCredentials::Basic { username, password } => {
                let credentials = format!("{}:{}", username, password);
                let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
                ("Authorization".to_string(), format!("Basic {}", encoded))
            }
        }
    }
}

/// Authentication layer
#[derive(Clone)]
pub struct AuthLayer {
    credentials: AuthCredentials,
}

impl AuthLayer {
    /// Create a new authentication layer
    pub fn new(credentials: AuthCredentials) -> Self {
        Self { credentials }
    }

    /// Create an ACL token authentication layer
    pub fn token(token: impl Into<String>) -> Self {
        Self::new(AuthCredentials::token(token))
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            credentials: self.credentials.clone(),
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService<S> {
    inner: S,
    credentials: AuthCredentials,
}

impl<S> Service<AgentRequest> for AuthService<S>
where
    S: Service<AgentRequest, Response = AgentResponse, Error = ConsulError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = AgentResponse;
    type Error = ConsulError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: AgentRequest) -> Self::Future {
        // Explicit per-request credentials win over the layer's
        if req.context.auth.is_none() {
            req.context.auth = Some(self.credentials.clone());
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(req).await })
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Arc};

    use tower::ServiceExt;

    use super::*;
    use crate::{
        codec::JsonCodec,
        protocol::operation::AgentOperation,
        service::{ConsulProtocolService, RequestContext},
        transport::mock::MockTransport,
    };

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_token_credentials() {
        let creds = AuthCredentials::token("acl-token");
        let (header, value) = creds.to_header();

        assert_eq!(header, "X-Consul-Token");
        assert_eq!(value, "acl-token");
    }

    #[test]
    fn test_bearer_credentials() {
        let creds = AuthCredentials::bearer("test-token");
        let (header, value) = creds.to_header();

        assert_eq!(header, "Authorization");
        assert_eq!(value, "Bearer test-token");
    }

    #[test]
    fn test_basic_credentials() {
        let creds = AuthCredentials::basic("user", "pass");
        let (header, value) = creds.to_header();

        assert_eq!(header, "Authorization");
        assert_eq!(value, "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_credentials_from_lookup() {
        let creds = AuthCredentials::from_lookup(lookup(&[
            ("CONSUL_HTTP_TOKEN", "abc"),
            ("CONSUL_HTTP_AUTH", "user:pass"),
        ]));
        assert_eq!(creds, Some(AuthCredentials::token("abc")));

        let creds = AuthCredentials::from_lookup(lookup(&[("CONSUL_HTTP_AUTH", "user:pass")]));
        assert_eq!(creds, Some(AuthCredentials::basic("user", "pass")));

        let creds = AuthCredentials::from_lookup(lookup(&[("CONSUL_HTTP_TOKEN", "")]));
        assert_eq!(creds, None);
    }

    #[tokio::test]
    async fn test_auth_layer_injects_header() {
        let transport = MockTransport::respond(200, "{}");
        let inner = ConsulProtocolService::new(transport.clone(), Arc::new(JsonCodec));
        let service = AuthLayer::token("layer-token").layer(inner);

        let request = AgentRequest::new(AgentOperation::Services, RequestContext::default());
        service.oneshot(request).await.unwrap();

        let sent = transport.last_request();
        assert_eq!(
            sent.headers.get(TOKEN_HEADER),
            Some(&"layer-token".to_string())
        );
    }
}

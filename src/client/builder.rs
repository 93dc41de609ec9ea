//! Client builder for constructing agent clients with composable layers

use std::{sync::Arc, time::Duration};

use tower::{util::BoxCloneService, ServiceBuilder};
use url::Url;

use crate::{
    client::{AgentClient, ClientConfig},
    codec::{Codec, JsonCodec},
    layer::{AuthCredentials, AuthLayer, RequestValidationLayer},
    protocol::ConsulError,
    service::{BoxAgentService, ConsulProtocolService},
    transport::{HttpTransport, Transport},
};

/// Builder for constructing agent clients
///
/// This builder provides a fluent API for configuring and building a client
/// with a customizable transport, credentials, datacenter and timeout.
///
/// # Example
///
/// ```rust,no_run
/// use tower_consul::prelude::*;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let url = "http://127.0.0.1:8500".parse().unwrap();
/// let mut client = ConsulClientBuilder::new_http(url)
///     .with_token("acl-token")
///     .with_datacenter("dc1")
///     .with_timeout(Duration::from_secs(10))
///     .build()?;
///
/// let members = client.members(false).await?;
/// println!("{} LAN members", members.len());
/// # Ok(())
/// # }
/// ```
pub struct ConsulClientBuilder<T: Transport> {
    agent_url: Url,
    transport: Option<T>,
    codec: Option<Arc<dyn Codec>>,
    auth: Option<AuthCredentials>,
    datacenter: Option<String>,
    timeout: Option<Duration>,
    validate_requests: bool,
}

impl<T: Transport> ConsulClientBuilder<T> {
    /// Create a builder for the agent at `agent_url`
    ///
    /// A transport must be supplied with [`with_transport`](Self::with_transport).
    pub fn new(agent_url: Url) -> Self {
        Self {
            agent_url,
            transport: None,
            codec: None,
            auth: None,
            datacenter: None,
            timeout: None,
            validate_requests: true,
        }
    }

    /// Use a custom transport
    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom codec
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Authenticate with an ACL token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(AuthCredentials::token(token));
        self
    }

    /// Authenticate with a bearer token
    pub fn with_bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(AuthCredentials::bearer(token));
        self
    }

    /// Authenticate with basic HTTP credentials
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.auth = Some(AuthCredentials::basic(username, password));
        self
    }

    /// Set custom authentication credentials
    pub fn with_auth(mut self, credentials: AuthCredentials) -> Self {
        self.auth = Some(credentials);
        self
    }

    /// Address every request to the given datacenter
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Set a per-request timeout
    ///
    /// Without one, requests use the transport's default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable request validation (default: true)
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_requests = enabled;
        self
    }

    /// Build the agent client
    ///
    /// This assembles the Tower layers around the protocol service.
    ///
    /// # Errors
    ///
    /// Returns an error if no transport has been configured
    pub fn build(self) -> Result<AgentClient<BoxAgentService>, ConsulError> {
        let transport = self.transport.ok_or_else(|| {
            ConsulError::Protocol(
                "Transport not configured. Call new_http() or with_transport()".into(),
            )
        })?;

        let codec = self.codec.unwrap_or_else(|| Arc::new(JsonCodec));
        let core = ConsulProtocolService::new(transport, codec);

        let service = match (self.auth, self.validate_requests) {
            (Some(credentials), true) => BoxCloneService::new(
                ServiceBuilder::new()
                    .layer(RequestValidationLayer::new())
                    .layer(AuthLayer::new(credentials))
                    .service(core),
            ),
            (Some(credentials), false) => BoxCloneService::new(
                ServiceBuilder::new()
                    .layer(AuthLayer::new(credentials))
                    .service(core),
            ),
            (None, true) => BoxCloneService::new(
                ServiceBuilder::new()
                    .layer(RequestValidationLayer::new())
                    .service(core),
            ),
            (None, false) => BoxCloneService::new(core),
        };

        let mut config = ClientConfig::new(self.agent_url).with_validation(self.validate_requests);
        config.datacenter = self.datacenter;
        config.timeout = self.timeout;

        Ok(AgentClient::new(service, config))
    }
}

impl ConsulClientBuilder<HttpTransport> {
    /// Create a new client builder with an HTTP transport
    ///
    /// # Arguments
    ///
    /// * `agent_url` - The base URL of the agent (e.g., "<http://127.0.0.1:8500>")
    pub fn new_http(agent_url: Url) -> Self {
        let transport = HttpTransport::new(agent_url.clone());
        Self::new(agent_url)
            .with_transport(transport)
            .with_codec(Arc::new(JsonCodec))
    }

    /// Create an HTTP client builder from the standard `CONSUL_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `CONSUL_HTTP_ADDR` is not a valid URL
    pub fn from_env() -> Result<Self, ConsulError> {
        let config = ClientConfig::from_env();
        Self::from_config(config, AuthCredentials::from_env())
    }

    /// Create an HTTP client builder from an existing configuration
    pub fn from_config(
        config: ClientConfig,
        auth: Option<AuthCredentials>,
    ) -> Result<Self, ConsulError> {
        let url: Url = config.agent_url.parse()?;

        let mut builder = Self::new_http(url).with_validation(config.validate_requests);
        builder.auth = auth;
        builder.datacenter = config.datacenter;
        builder.timeout = config.timeout;
        Ok(builder)
    }
}

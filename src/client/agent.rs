//! High-level agent client

use std::collections::HashMap;

use tower::ServiceExt;
use tower_service::Service;

use crate::{
    client::config::ClientConfig,
    protocol::{
        AgentCheck, AgentCheckRegistration, AgentMember, AgentOperation, AgentSelf,
        AgentService, AgentServiceRegistration, ConsulError, ConsulResult, TtlStatus,
    },
    service::{AgentRequest, AgentResponse, RequestContext},
};

/// High-level client for the agent endpoints
///
/// This client wraps a Tower service and exposes one method per agent endpoint.
/// Every call is a single request/response cycle; nothing is cached between calls.
///
/// # Example
///
/// ```rust,no_run
/// use tower_consul::prelude::*;
///
/// # async fn example() -> Result<(), ConsulError> {
/// let url = "http://127.0.0.1:8500".parse().unwrap();
/// let mut client = ConsulClientBuilder::new_http(url).build()?;
///
/// let registration = AgentServiceRegistration::new("web").with_port(8080);
/// client.service_register(registration).await?;
///
/// for (id, service) in client.services().await? {
///     println!("{id}: {} on port {}", service.service, service.port);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AgentClient<S> {
    service: S,
    config: ClientConfig,
}

impl<S> AgentClient<S>
where
    S: Service<AgentRequest, Response = AgentResponse, Error = ConsulError>,
{
    /// Create a new agent client
    ///
    /// # Arguments
    ///
    /// * `service` - The Tower service that handles requests
    /// * `config` - Client configuration
    pub fn new(service: S, config: ClientConfig) -> Self {
        Self { service, config }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a request context from the client configuration
    fn build_context(&self) -> RequestContext {
        RequestContext {
            datacenter: self.config.datacenter.clone(),
            auth: None, // Set by AuthLayer
            timeout: self.config.timeout,
            metadata: Default::default(),
        }
    }

    async fn execute(&mut self, operation: AgentOperation) -> ConsulResult<AgentResponse> {
        let request = AgentRequest::new(operation, self.build_context());
        self.service.ready().await?.call(request).await
    }

    /// Execute an operation whose only result is the status code
    async fn execute_empty(&mut self, operation: AgentOperation) -> ConsulResult<()> {
        self.execute(operation).await.map(|_| ())
    }

    /// Query the agent for information about itself
    ///
    /// The result is keyed by section name ("Config", "Member", ...); the
    /// contents of each section are not interpreted.
    pub async fn agent_self(&mut self) -> ConsulResult<AgentSelf> {
        self.execute(AgentOperation::SelfInfo)
            .await?
            .into_self_info()
            .ok_or_else(|| ConsulError::Protocol("Expected self info from agent_self".into()))
    }

    /// List the checks registered with the local agent, keyed by check ID
    pub async fn checks(&mut self) -> ConsulResult<HashMap<String, AgentCheck>> {
        self.execute(AgentOperation::Checks)
            .await?
            .into_checks()
            .ok_or_else(|| ConsulError::Protocol("Expected check map from checks".into()))
    }

    /// List the services registered with the local agent, keyed by service ID
    pub async fn services(&mut self) -> ConsulResult<HashMap<String, AgentService>> {
        self.execute(AgentOperation::Services)
            .await?
            .into_services()
            .ok_or_else(|| ConsulError::Protocol("Expected service map from services".into()))
    }

    /// List the gossip members known to the agent
    ///
    /// # Arguments
    ///
    /// * `wan` - Query the WAN pool (servers only) instead of the LAN pool
    pub async fn members(&mut self, wan: bool) -> ConsulResult<Vec<AgentMember>> {
        self.execute(AgentOperation::Members { wan })
            .await?
            .into_members()
            .ok_or_else(|| ConsulError::Protocol("Expected member list from members".into()))
    }

    /// Register a service with the local agent
    ///
    /// Succeeds once the agent has accepted the registration.
    pub async fn service_register(
        &mut self,
        registration: AgentServiceRegistration,
    ) -> ConsulResult<()> {
        self.execute_empty(AgentOperation::ServiceRegister { registration })
            .await
    }

    /// Remove a service from the local agent
    ///
    /// Whether an unknown ID is an error is decided by the agent.
    pub async fn service_deregister(&mut self, service_id: impl Into<String>) -> ConsulResult<()> {
        self.execute_empty(AgentOperation::ServiceDeregister {
            service_id: service_id.into(),
        })
        .await
    }

    /// Register a standalone check with the local agent
    pub async fn check_register(
        &mut self,
        registration: AgentCheckRegistration,
    ) -> ConsulResult<()> {
        self.execute_empty(AgentOperation::CheckRegister { registration })
            .await
    }

    /// Remove a check from the local agent
    pub async fn check_deregister(&mut self, check_id: impl Into<String>) -> ConsulResult<()> {
        self.execute_empty(AgentOperation::CheckDeregister {
            check_id: check_id.into(),
        })
        .await
    }

    /// Set the state of a TTL check, with an optional note
    pub async fn update_ttl(
        &mut self,
        check_id: impl Into<String>,
        status: TtlStatus,
        note: Option<String>,
    ) -> ConsulResult<()> {
        self.execute_empty(AgentOperation::UpdateTtl {
            check_id: check_id.into(),
            status,
            note,
        })
        .await
    }

    /// Mark a TTL check as passing
    pub async fn pass_ttl(
        &mut self,
        check_id: impl Into<String>,
        note: Option<String>,
    ) -> ConsulResult<()> {
        self.update_ttl(check_id, TtlStatus::Pass, note).await
    }

    /// Mark a TTL check as warning
    pub async fn warn_ttl(
        &mut self,
        check_id: impl Into<String>,
        note: Option<String>,
    ) -> ConsulResult<()> {
        self.update_ttl(check_id, TtlStatus::Warn, note).await
    }

    /// Mark a TTL check as critical
    pub async fn fail_ttl(
        &mut self,
        check_id: impl Into<String>,
        note: Option<String>,
    ) -> ConsulResult<()> {
        self.update_ttl(check_id, TtlStatus::Fail, note).await
    }

    /// Ask the agent to join the member at `address`
    pub async fn join(&mut self, address: impl Into<String>, wan: bool) -> ConsulResult<()> {
        self.execute_empty(AgentOperation::Join {
            address: address.into(),
            wan,
        })
        .await
    }

    /// Force a failed node into the left state
    pub async fn force_leave(&mut self, node: impl Into<String>) -> ConsulResult<()> {
        self.execute_empty(AgentOperation::ForceLeave { node: node.into() })
            .await
    }
}

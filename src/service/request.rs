//! Agent service request types

use std::{collections::HashMap, time::Duration};

use crate::{layer::auth::AuthCredentials, protocol::operation::AgentOperation};

/// A request to the agent service
///
/// This wraps an agent operation with the context needed to execute it
#[derive(Debug, Clone)]
pub struct AgentRequest {
    /// The operation to execute
    pub operation: AgentOperation,

    /// Request context (auth, datacenter, timeout, metadata)
    pub context: RequestContext,
}

impl AgentRequest {
    /// Create a new agent request
    pub fn new(operation: AgentOperation, context: RequestContext) -> Self {
        Self { operation, context }
    }
}

/// Request context containing metadata and configuration
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Datacenter to address, sent as the `dc` query parameter
    pub datacenter: Option<String>,

    /// Authentication credentials (if any)
    pub auth: Option<AuthCredentials>,

    /// Request timeout; `None` uses the transport default
    pub timeout: Option<Duration>,

    /// Additional headers
    pub metadata: HashMap<String, String>,
}

impl RequestContext {
    /// Create an empty request context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the datacenter
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Set authentication credentials
    pub fn with_auth(mut self, auth: AuthCredentials) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a metadata header
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

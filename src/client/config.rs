//! Client configuration

use std::time::Duration;

/// Address used when none is configured
pub const DEFAULT_AGENT_URL: &str = "http://127.0.0.1:8500";

/// Configuration for an agent client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the agent
    pub agent_url: String,

    /// Datacenter sent with every request, if any
    pub datacenter: Option<String>,

    /// Per-request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,

    /// Reject malformed requests before sending them
    pub validate_requests: bool,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(agent_url: impl Into<String>) -> Self {
        Self {
            agent_url: agent_url.into(),
            datacenter: None,
            timeout: None,
            validate_requests: true,
        }
    }

    /// Build a configuration from the standard `CONSUL_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration through an arbitrary variable lookup
    ///
    /// `CONSUL_HTTP_ADDR` may omit the scheme, in which case `CONSUL_HTTP_SSL`
    /// selects between `http` and `https`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let agent_url = match lookup("CONSUL_HTTP_ADDR").filter(|a| !a.is_empty()) {
            Some(addr) if addr.contains("://") => addr,
            Some(addr) => {
                let ssl = lookup("CONSUL_HTTP_SSL")
                    .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true"))
                    .unwrap_or(false);
                let scheme = if ssl { "https" } else { "http" };
                format!("{}://{}", scheme, addr)
            }
            None => DEFAULT_AGENT_URL.to_string(),
        };

        let mut config = Self::new(agent_url);
        config.datacenter = lookup("CONSUL_DATACENTER").filter(|dc| !dc.is_empty());
        config
    }

    /// Set the datacenter
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable request validation
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_requests = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_AGENT_URL)
    }
}

//! Agent endpoint operations

use super::registration::{AgentCheckRegistration, AgentServiceRegistration, TtlStatus};

/// Operations of the agent endpoint group
///
/// Each operation maps to exactly one HTTP request against a fixed `/v1/agent` path.
#[derive(Debug, Clone)]
pub enum AgentOperation {
    /// Fetch the agent's description of itself
    SelfInfo,

    /// List checks registered with the local agent
    Checks,

    /// List services registered with the local agent
    Services,

    /// List gossip members
    Members {
        /// Query the WAN pool instead of the LAN pool
        wan: bool,
    },

    /// Register a service with the local agent
    ServiceRegister {
        registration: AgentServiceRegistration,
    },

    /// Remove a service from the local agent
    ServiceDeregister { service_id: String },

    /// Register a standalone check
    CheckRegister {
        registration: AgentCheckRegistration,
    },

    /// Remove a check from the local agent
    CheckDeregister { check_id: String },

    /// Set the state of a TTL check
    UpdateTtl {
        check_id: String,
        status: TtlStatus,
        note: Option<String>,
    },

    /// Ask the agent to join a cluster member
    Join { address: String, wan: bool },

    /// Force a failed member into the left state
    ForceLeave { node: String },
}

impl AgentOperation {
    /// Path segments under the agent base URL
    ///
    /// Identifiers occupy exactly one segment each, so the transport can
    /// escape them instead of splicing them into a path string.
    pub fn path(&self) -> Vec<String> {
        let tail: Vec<&str> = match self {
            AgentOperation::SelfInfo => vec!["self"],
            AgentOperation::Checks => vec!["checks"],
            AgentOperation::Services => vec!["services"],
            AgentOperation::Members { .. } => vec!["members"],
            AgentOperation::ServiceRegister { .. } => vec!["service", "register"],
            AgentOperation::ServiceDeregister { service_id } => {
                vec!["service", "deregister", service_id.as_str()]
            }
            AgentOperation::CheckRegister { .. } => vec!["check", "register"],
            AgentOperation::CheckDeregister { check_id } => {
                vec!["check", "deregister", check_id.as_str()]
            }
            AgentOperation::UpdateTtl {
                check_id, status, ..
            } => vec!["check", status.as_str(), check_id.as_str()],
            AgentOperation::Join { address, .. } => vec!["join", address.as_str()],
            AgentOperation::ForceLeave { node } => vec!["force-leave", node.as_str()],
        };

        ["v1", "agent"]
            .into_iter()
            .chain(tail)
            .map(String::from)
            .collect()
    }

    /// Get the HTTP endpoint path for this operation, for display
    pub fn endpoint(&self) -> String {
        format!("/{}", self.path().join("/"))
    }

    /// Get the HTTP method for this operation
    pub fn method(&self) -> &'static str {
        match self {
            AgentOperation::SelfInfo
            | AgentOperation::Checks
            | AgentOperation::Services
            | AgentOperation::Members { .. } => "GET",
            _ => "PUT",
        }
    }

    /// Query parameters specific to this operation
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            AgentOperation::Members { wan: true } | AgentOperation::Join { wan: true, .. } => {
                vec![("wan", "1".to_string())]
            }
            AgentOperation::UpdateTtl {
                note: Some(note), ..
            } => vec![("note", note.clone())],
            _ => Vec::new(),
        }
    }

    /// Whether the agent answers this operation with a JSON document
    pub fn returns_body(&self) -> bool {
        self.method() == "GET"
    }
}

#[cfg(test)]
mod tests {
    use crate::protocol::registration::AgentServiceRegistration;

    use super::*;

    #[test]
    fn test_operation_endpoints() {
        let op = AgentOperation::SelfInfo;
        assert_eq!(op.endpoint(), "/v1/agent/self");
        assert_eq!(op.method(), "GET");

        let op = AgentOperation::ServiceRegister {
            registration: AgentServiceRegistration::new("web"),
        };
        assert_eq!(op.endpoint(), "/v1/agent/service/register");
        assert_eq!(op.method(), "PUT");

        let op = AgentOperation::ServiceDeregister {
            service_id: "web".to_string(),
        };
        assert_eq!(op.endpoint(), "/v1/agent/service/deregister/web");
        assert_eq!(op.method(), "PUT");

        let op = AgentOperation::UpdateTtl {
            check_id: "service:web".to_string(),
            status: TtlStatus::Warn,
            note: None,
        };
        assert_eq!(op.endpoint(), "/v1/agent/check/warn/service:web");
    }

    #[test]
    fn test_identifier_is_single_segment() {
        for id in ["..", ".", "a\\b", "a/b", "%2e%2e"] {
            let op = AgentOperation::ServiceDeregister {
                service_id: id.to_string(),
            };
            assert_eq!(op.path(), vec!["v1", "agent", "service", "deregister", id]);

            let op = AgentOperation::ForceLeave {
                node: id.to_string(),
            };
            assert_eq!(op.path().len(), 4);
            assert_eq!(op.path()[3], id);
        }
    }

    #[test]
    fn test_members_wan_query() {
        let op = AgentOperation::Members { wan: true };
        assert_eq!(op.query(), vec![("wan", "1".to_string())]);

        let op = AgentOperation::Members { wan: false };
        assert!(op.query().is_empty());
    }

    #[test]
    fn test_ttl_note_query() {
        let op = AgentOperation::UpdateTtl {
            check_id: "mem".to_string(),
            status: TtlStatus::Pass,
            note: Some("all good".to_string()),
        };
        assert_eq!(op.query(), vec![("note", "all good".to_string())]);
        assert!(!op.returns_body());
    }
}

//! Agent service response types

use std::collections::HashMap;

use crate::protocol::agent::{AgentCheck, AgentMember, AgentSelf, AgentService};

/// Response from an agent service operation
#[derive(Debug, Clone)]
pub enum AgentResponse {
    /// Agent self-description (from SelfInfo)
    SelfInfo(Box<AgentSelf>),

    /// Checks keyed by check ID (from Checks)
    Checks(HashMap<String, AgentCheck>),

    /// Services keyed by service ID (from Services)
    Services(HashMap<String, AgentService>),

    /// Gossip members (from Members)
    Members(Vec<AgentMember>),

    /// Empty response (for operations with no return value)
    Empty,
}

impl AgentResponse {
    /// Extract the agent self-description, if present
    pub fn into_self_info(self) -> Option<AgentSelf> {
        match self {
            AgentResponse::SelfInfo(info) => Some(*info),
            _ => None,
        }
    }

    /// Extract the check map, if present
    pub fn into_checks(self) -> Option<HashMap<String, AgentCheck>> {
        match self {
            AgentResponse::Checks(checks) => Some(checks),
            _ => None,
        }
    }

    /// Extract the service map, if present
    pub fn into_services(self) -> Option<HashMap<String, AgentService>> {
        match self {
            AgentResponse::Services(services) => Some(services),
            _ => None,
        }
    }

    /// Extract the member list, if present
    pub fn into_members(self) -> Option<Vec<AgentMember>> {
        match self {
            AgentResponse::Members(members) => Some(members),
            _ => None,
        }
    }

    /// Check if the response is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, AgentResponse::Empty)
    }
}

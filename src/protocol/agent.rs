//! Records reported by the agent about itself, its checks, services and peers

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Opaque self-description of the agent, keyed by section ("Config", "Member", ...)
pub type AgentSelf = HashMap<String, HashMap<String, serde_json::Value>>;

/// A health check known to the agent
///
/// The check ID is unique per node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct AgentCheck {
    pub node: String,

    #[serde(rename = "CheckID")]
    pub check_id: String,

    pub name: String,

    /// Health state as reported by the agent ("passing", "warning", "critical", ...)
    pub status: String,

    pub notes: String,

    /// Output of the last check run
    pub output: String,

    #[serde(rename = "ServiceID")]
    pub service_id: String,

    pub service_name: String,
}

impl AgentCheck {
    /// Whether the agent reports this check as passing
    pub fn is_passing(&self) -> bool {
        self.status == "passing"
    }
}

/// A service registered with the local agent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct AgentService {
    #[serde(rename = "ID")]
    pub id: String,

    /// Logical service name
    pub service: String,

    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    pub port: u16,
}

/// A gossip member known to the agent
///
/// This is a read-only snapshot of the membership layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct AgentMember {
    pub name: String,
    pub addr: String,
    pub port: u16,

    #[serde(deserialize_with = "null_as_default")]
    pub tags: HashMap<String, String>,

    /// Raw member status code (1 = alive, 2 = leaving, 3 = left, 4 = failed)
    pub status: i32,

    pub protocol_min: u8,
    pub protocol_max: u8,
    pub protocol_cur: u8,
    pub delegate_min: u8,
    pub delegate_max: u8,
    pub delegate_cur: u8,
}

impl AgentMember {
    /// Whether the member is currently alive
    pub fn is_alive(&self) -> bool {
        self.status == 1
    }
}

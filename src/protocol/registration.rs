//! Request bodies for registering services and checks with the agent
//!
//! Unset fields are left out of the serialized body so that the agent
//! falls back to its own defaults.

use serde::{Deserialize, Serialize};

/// Registration of a new service with the local agent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct AgentServiceRegistration {
    /// Service ID; the agent uses the name when omitted
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Health check installed alongside the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<AgentServiceCheck>,
}

impl AgentServiceRegistration {
    /// Create a registration for the named service
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set an explicit service ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Replace all tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the service port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Attach a health check
    pub fn with_check(mut self, check: AgentServiceCheck) -> Self {
        self.check = Some(check);
        self
    }
}

/// Health check definition embedded in a registration
///
/// A check is either script based (`script` run every `interval`) or
/// TTL based (`ttl`, refreshed by the application).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct AgentServiceCheck {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub script: String,

    /// Go-style duration string, e.g. "10s"
    #[serde(skip_serializing_if = "String::is_empty")]
    pub interval: String,

    #[serde(rename = "TTL", skip_serializing_if = "String::is_empty")]
    pub ttl: String,
}

impl AgentServiceCheck {
    /// A check that runs `script` every `interval`
    pub fn script(script: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            interval: interval.into(),
            ttl: String::new(),
        }
    }

    /// A check that goes critical unless refreshed within `ttl`
    pub fn ttl(ttl: impl Into<String>) -> Self {
        Self {
            ttl: ttl.into(),
            ..Default::default()
        }
    }

    pub fn is_script(&self) -> bool {
        !self.script.is_empty()
    }

    pub fn is_ttl(&self) -> bool {
        !self.ttl.is_empty()
    }
}

/// Registration of a standalone check with the local agent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct AgentCheckRegistration {
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,

    /// Service the check is bound to, if any
    #[serde(rename = "ServiceID", skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,

    #[serde(flatten)]
    pub check: AgentServiceCheck,
}

impl AgentCheckRegistration {
    /// Create a check registration with the given name and definition
    pub fn new(name: impl Into<String>, check: AgentServiceCheck) -> Self {
        Self {
            name: name.into(),
            check,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Bind the check to a registered service
    pub fn with_service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }
}

/// Target state of a TTL check update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlStatus {
    Pass,
    Warn,
    Fail,
}

impl TtlStatus {
    /// Path segment used by the agent for this state
    pub fn as_str(&self) -> &'static str {
        match self {
            TtlStatus::Pass => "pass",
            TtlStatus::Warn => "warn",
            TtlStatus::Fail => "fail",
        }
    }
}

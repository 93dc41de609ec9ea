//! Consul agent wire types and definitions

use serde::{Deserialize, Deserializer};

pub mod agent;
pub mod error;
pub mod operation;
pub mod registration;

pub use agent::{AgentCheck, AgentMember, AgentSelf, AgentService};
pub use error::{ConsulError, ConsulResult};
pub use operation::AgentOperation;
pub use registration::{
    AgentCheckRegistration, AgentServiceCheck, AgentServiceRegistration, TtlStatus,
};

/// Decode an explicit JSON `null` as the type's default
///
/// The agent reports empty collections as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

//! Tower Service implementations

pub mod core;
pub mod request;
pub mod response;

pub use self::core::ConsulProtocolService;
pub use request::{AgentRequest, RequestContext};
pub use response::AgentResponse;

use tower::util::BoxCloneService;

use crate::protocol::error::ConsulError;

/// Type-erased agent service stack produced by the client builder
pub type BoxAgentService = BoxCloneService<AgentRequest, AgentResponse, ConsulError>;

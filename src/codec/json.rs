//! JSON codec for the agent HTTP API

use bytes::Bytes;
use serde::Serialize;

use crate::{
    codec::Codec,
    protocol::{error::ConsulError, operation::AgentOperation},
    service::response::AgentResponse,
};

/// JSON codec for the agent HTTP API
#[derive(Debug, Clone, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Create a new JSON codec
    pub fn new() -> Self {
        Self
    }

    fn encode<T: Serialize>(value: &T) -> Result<Bytes, ConsulError> {
        let bytes = serde_json::to_vec(value).map_err(ConsulError::Encode)?;
        Ok(Bytes::from(bytes))
    }
}

impl Codec for JsonCodec {
    fn encode_request(&self, operation: &AgentOperation) -> Result<Bytes, ConsulError> {
        match operation {
            AgentOperation::ServiceRegister { registration } => Self::encode(registration),
            AgentOperation::CheckRegister { registration } => Self::encode(registration),
            // Everything else is addressed by path and query only
            _ => Ok(Bytes::new()),
        }
    }

    fn decode_response(
        &self,
        body: &[u8],
        operation: &AgentOperation,
    ) -> Result<AgentResponse, ConsulError> {
        match operation {
            AgentOperation::SelfInfo => {
                Ok(AgentResponse::SelfInfo(Box::new(serde_json::from_slice(body)?)))
            }
            AgentOperation::Checks => Ok(AgentResponse::Checks(serde_json::from_slice(body)?)),
            AgentOperation::Services => Ok(AgentResponse::Services(serde_json::from_slice(body)?)),
            AgentOperation::Members { .. } => {
                Ok(AgentResponse::Members(serde_json::from_slice(body)?))
            }
            // Write operations only report success through the status code
            AgentOperation::ServiceRegister { .. }
            | AgentOperation::ServiceDeregister { .. }
            | AgentOperation::CheckRegister { .. }
            | AgentOperation::CheckDeregister { .. }
            | AgentOperation::UpdateTtl { .. }
            | AgentOperation::Join { .. }
            | AgentOperation::ForceLeave { .. } => Ok(AgentResponse::Empty),
        }
    }

    fn content_type(&self) -> &str {
        "application/json"
    }
}

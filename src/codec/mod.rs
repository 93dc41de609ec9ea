//! Serialization codecs for agent requests and responses

pub mod json;

pub use json::JsonCodec;

use crate::{
    protocol::{error::ConsulError, operation::AgentOperation},
    service::response::AgentResponse,
};
use bytes::Bytes;

/// Codec trait for encoding requests and decoding agent responses
pub trait Codec: Send + Sync {
    /// Serialize the body of an operation
    ///
    /// Operations without a body encode to empty bytes.
    fn encode_request(&self, operation: &AgentOperation) -> Result<Bytes, ConsulError>;

    /// Deserialize a successful response body for the given operation
    ///
    /// # Arguments
    ///
    /// * `body` - The response body bytes
    /// * `operation` - The original operation, selecting the expected shape
    fn decode_response(
        &self,
        body: &[u8],
        operation: &AgentOperation,
    ) -> Result<AgentResponse, ConsulError>;

    /// Get the content type for this codec
    fn content_type(&self) -> &str;
}

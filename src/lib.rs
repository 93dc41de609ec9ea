//! # Tower Consul
//!
//! A Tower-based client for the Consul agent HTTP API.
//!
//! This library maps the `/v1/agent` endpoint group onto typed methods. Requests
//! flow through Tower's Service and Layer abstractions, so credentials and
//! request validation compose as layers over a pluggable transport.
//!
//! ## Features
//!
//! - **Typed records**: checks, services, members and registrations as plain serde structs
//! - **Composable middleware**: ACL token auth and request validation as Tower layers
//! - **Transport agnostic**: `reqwest` over HTTP by default, any [`transport::Transport`] otherwise
//! - **Async**: built on tokio
//!
//! ## Example
//!
//! ```rust,no_run
//! use tower_consul::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let url = "http://127.0.0.1:8500".parse().unwrap();
//!     let mut client = ConsulClientBuilder::new_http(url)
//!         .with_token("acl-token")
//!         .build()?;
//!
//!     let registration = AgentServiceRegistration::new("web")
//!         .with_port(8080)
//!         .with_check(AgentServiceCheck::ttl("15s"));
//!     client.service_register(registration).await?;
//!
//!     let services = client.services().await?;
//!     println!("{} services registered", services.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod codec;
pub mod layer;
pub mod protocol;
pub mod service;
pub mod transport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        client::{AgentClient, ClientConfig, ConsulClientBuilder},
        layer::AuthCredentials,
        protocol::{
            AgentCheck, AgentCheckRegistration, AgentMember, AgentSelf, AgentService,
            AgentServiceCheck, AgentServiceRegistration, ConsulError, ConsulResult, TtlStatus,
        },
    };
}

//! High-level client API for the agent endpoints

pub mod agent;
pub mod builder;
pub mod config;

pub use agent::AgentClient;
pub use builder::ConsulClientBuilder;
pub use config::ClientConfig;

//! Tower Layer implementations for agent requests

pub mod auth;
pub mod validation;

pub use auth::{AuthCredentials, AuthLayer, AuthService};
pub use validation::{RequestValidationLayer, RequestValidationService};

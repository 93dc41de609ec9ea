//! Validation layer for agent requests

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower_layer::Layer;
use tower_service::Service;

use crate::{
    protocol::{error::ConsulError, operation::AgentOperation, registration::AgentServiceCheck},
    service::{AgentRequest, AgentResponse},
};

/// Layer that rejects malformed agent requests before they are sent
#[derive(Clone, Debug, Default)]
pub struct RequestValidationLayer;

impl RequestValidationLayer {
    /// Create a new validation layer
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestValidationLayer {
    type Service = RequestValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestValidationService { inner }
    }
}

/// Validation service that wraps an inner service
#[derive(Clone)]
pub struct RequestValidationService<S> {
    inner: S,
}

/// Identifiers occupy a single segment of the request path
fn validate_path_segment(kind: &str, value: &str) -> Result<(), ConsulError> {
    if value.is_empty() {
        return Err(ConsulError::Validation(format!("{} cannot be empty", kind)));
    }
    if value == "." || value == ".." {
        return Err(ConsulError::Validation(format!(
            "{} cannot be a dot segment: {}",
            kind, value
        )));
    }
    if value.contains(['/', '\\', '?', '#']) {
        return Err(ConsulError::Validation(format!(
            "{} cannot contain '/', '\\', '?' or '#': {}",
            kind, value
        )));
    }
    Ok(())
}

fn validate_check(check: &AgentServiceCheck) -> Result<(), ConsulError> {
    if check.is_script() && check.is_ttl() {
        return Err(ConsulError::Validation(
            "Check must use either a script or a TTL, not both".into(),
        ));
    }
    if check.is_script() && check.interval.is_empty() {
        return Err(ConsulError::Validation(
            "Script check requires an interval".into(),
        ));
    }
    if !check.is_script() && !check.is_ttl() {
        return Err(ConsulError::Validation(
            "Check must define a script with an interval, or a TTL".into(),
        ));
    }
    Ok(())
}

impl<S> RequestValidationService<S> {
    /// Validate an agent request
    fn validate_request(req: &AgentRequest) -> Result<(), ConsulError> {
        match &req.operation {
            AgentOperation::ServiceRegister { registration } => {
                if registration.name.is_empty() {
                    return Err(ConsulError::Validation(
                        "Service name cannot be empty".into(),
                    ));
                }
                if let Some(check) = &registration.check {
                    validate_check(check)?;
                }
            }
            AgentOperation::CheckRegister { registration } => {
                if registration.name.is_empty() {
                    return Err(ConsulError::Validation("Check name cannot be empty".into()));
                }
                validate_check(&registration.check)?;
            }
            AgentOperation::ServiceDeregister { service_id } => {
                validate_path_segment("Service ID", service_id)?;
            }
            AgentOperation::CheckDeregister { check_id }
            | AgentOperation::UpdateTtl { check_id, .. } => {
                validate_path_segment("Check ID", check_id)?;
            }
            AgentOperation::Join { address, .. } => {
                validate_path_segment("Join address", address)?;
            }
            AgentOperation::ForceLeave { node } => {
                validate_path_segment("Node name", node)?;
            }
            AgentOperation::SelfInfo
            | AgentOperation::Checks
            | AgentOperation::Services
            | AgentOperation::Members { .. } => {}
        }

        if let Some(dc) = &req.context.datacenter {
            if dc.is_empty() {
                return Err(ConsulError::Validation("Datacenter cannot be empty".into()));
            }
        }

        Ok(())
    }
}

impl<S> Service<AgentRequest> for RequestValidationService<S>
where
    S: Service<AgentRequest, Response = AgentResponse, Error = ConsulError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = AgentResponse;
    type Error = ConsulError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: AgentRequest) -> Self::Future {
        if let Err(e) = Self::validate_request(&req) {
            tracing::debug!("rejected agent request: {}", e);
            return Box::pin(async move { Err(e) });
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(req).await })
    }
}

//! Provisioning backend interface — the collaborator consuming rendered
//! templates.
//!
//! The data-model layer performs no I/O. A [`Provisioner`] renders a stack
//! and hands the text to a [`ProvisioningClient`] implementation; backend
//! errors pass through unmodified, with no retry here. Implementations
//! carry their own retry and timeout policy.

use indexmap::IndexMap;
use thiserror::Error;
use tracing::info;

use crate::core::stack::Stack;

/// Opaque acknowledgment for an accepted submission.
#[derive(Debug, Clone)]
pub struct Ack {
    /// Backend-assigned identifier for the accepted operation.
    pub id: String,
}

/// Cost estimation for a rendered template.
#[derive(Debug, Clone)]
pub struct CostEstimate {
    /// Backend URL presenting the estimate.
    pub url: String,
}

/// Failure reported by the provisioning backend, surfaced verbatim.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("backend error: {0}")]
    Backend(String),
}

/// Client for a template-consuming provisioning backend.
pub trait ProvisioningClient {
    fn create_stack(&self, stack_name: &str, template_body: &str)
        -> Result<Ack, ProvisionError>;

    fn create_change_set(
        &self,
        stack_name: &str,
        change_set_name: &str,
        template_body: &str,
    ) -> Result<Ack, ProvisionError>;

    fn delete_stack(&self, stack_name: &str) -> Result<Ack, ProvisionError>;

    fn estimate_cost(&self, template_body: &str) -> Result<CostEstimate, ProvisionError>;

    fn describe_resource_statuses(
        &self,
        stack_name: &str,
    ) -> Result<IndexMap<String, String>, ProvisionError>;
}

/// Thin adapter between a built stack and a provisioning client.
pub struct Provisioner<'a, C: ProvisioningClient> {
    client: &'a C,
}

impl<'a, C: ProvisioningClient> Provisioner<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Submit the stack for creation.
    pub fn create(&self, stack: &Stack) -> Result<Ack, ProvisionError> {
        info!(stack = stack.name(), "submit create");
        self.client.create_stack(stack.name(), &stack.render())
    }

    /// Submit a named change set against the stack's deployed state.
    pub fn create_change_set(
        &self,
        stack: &Stack,
        change_set_name: &str,
    ) -> Result<Ack, ProvisionError> {
        info!(stack = stack.name(), change_set = change_set_name, "submit change set");
        self.client
            .create_change_set(stack.name(), change_set_name, &stack.render())
    }

    /// Request deletion of the deployed stack. The backend completes the
    /// deletion asynchronously.
    pub fn delete(&self, stack: &Stack) -> Result<Ack, ProvisionError> {
        info!(stack = stack.name(), "submit delete");
        self.client.delete_stack(stack.name())
    }

    /// Estimate the cost of the rendered template.
    pub fn cost(&self, stack: &Stack) -> Result<CostEstimate, ProvisionError> {
        self.client.estimate_cost(&stack.render())
    }

    /// Status of each realized resource, optionally narrowed to the ones
    /// still in a PROGRESS state.
    pub fn resource_status(
        &self,
        stack: &Stack,
        in_progress_only: bool,
    ) -> Result<IndexMap<String, String>, ProvisionError> {
        let statuses = self.client.describe_resource_statuses(stack.name())?;
        if !in_progress_only {
            return Ok(statuses);
        }
        Ok(statuses
            .into_iter()
            .filter(|(_, status)| status.contains("PROGRESS"))
            .collect())
    }
}

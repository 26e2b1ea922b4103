//! Stackforge — programmatic builder for CloudFormation-style templates.
//!
//! Assemble typed infrastructure resources in memory, wire them together
//! with intrinsic references, and render the graph as deterministic YAML
//! for a provisioning backend.

pub mod core;
pub mod provision;
pub mod resources;

pub use crate::core::error::BuildError;
pub use crate::core::resource::Resource;
pub use crate::core::stack::Stack;
pub use crate::core::types::{Reference, ResourceKind, Value};

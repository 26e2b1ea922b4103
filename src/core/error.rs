//! Graph-construction error taxonomy.
//!
//! Every variant is detected synchronously, at construction or mutation
//! time. A failed operation leaves its target unchanged; serialization of a
//! graph that passed these checks cannot fail.

use thiserror::Error;

/// Errors raised while building resources and stacks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A resource or stack name violates its naming pattern or length bound.
    #[error("invalid identifier '{name}': {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    /// A kind string outside the catalog.
    #[error("unknown resource kind: {0}")]
    InvalidKind(String),

    /// An attribute reference for an attribute the kind does not declare.
    #[error("invalid attribute '{attribute}' for resource '{resource}'")]
    InvalidAttribute { resource: String, attribute: String },

    /// Adding or merging would introduce a name collision within a stack.
    #[error("resource already exists: {0}")]
    DuplicateResourceName(String),

    /// An explicit device index collides with one already attached.
    #[error("device index {0} already in use")]
    DuplicateDeviceIndex(u32),

    /// Lookup by name found nothing.
    #[error("no such resource: {0}")]
    ResourceNotFound(String),
}

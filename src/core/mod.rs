//! Core object model — kinds, references, resources, stacks, serialization.

pub mod error;
pub mod resource;
pub mod serializer;
pub mod stack;
pub mod types;

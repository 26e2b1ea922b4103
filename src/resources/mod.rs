//! Concrete resource kinds — compute, networking, and repositories.
//!
//! Each type binds one catalog kind to typed fields and a `properties`
//! payload. Cross-resource wiring always goes through references captured
//! at construction; resources never own each other.

pub mod compute;
pub mod network;
pub mod repository;

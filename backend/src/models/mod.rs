//! Database models for the Dropzone Operations Platform
//!
//! Re-exports domain types from the shared crate; the persisted entity
//! structs live next to the services that query them.

pub use shared::models::*;

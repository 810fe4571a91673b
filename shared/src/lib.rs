//! Shared domain types and rules for the Dropzone Operations Platform
//!
//! This crate contains the pure half of the system: jump/load/weather domain
//! models, the admission rules that gate jump creation, and the aggregation
//! helpers the analytics layer is built on. It has no database or HTTP
//! dependencies so the rules can be tested in isolation.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;

//! Domain models for the Dropzone Operations Platform

mod instructor;
mod jump;
mod load;
mod weather;

pub use instructor::*;
pub use jump::*;
pub use load::*;
pub use weather::*;

/// Error returned when a stored enum string does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} value: {value}")]
pub struct EnumParseError {
    pub kind: &'static str,
    pub value: String,
}

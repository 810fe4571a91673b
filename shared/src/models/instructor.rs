//! Instructor certification flags

use serde::{Deserialize, Serialize};

/// The two independent ratings an instructor can hold.
///
/// Tandem and AFF certifications are granted separately; holding one says
/// nothing about the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorCerts {
    pub tandem_certified: bool,
    pub aff_certified: bool,
}

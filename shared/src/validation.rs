//! Validation rules for the Dropzone Operations Platform
//!
//! Holds the capacity arithmetic, the jump admission rules, and the boundary
//! checks applied when entities are created or updated.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{InstructorCerts, JumpType};

pub const MIN_AIRCRAFT_CAPACITY: i32 = 2;
pub const MAX_AIRCRAFT_CAPACITY: i32 = 50;
pub const MIN_ALTITUDE_FT: i32 = 3000;
pub const MAX_ALTITUDE_FT: i32 = 18000;
pub const MAX_WIND_SPEED_MPH: i32 = 100;
pub const MAX_VISIBILITY_MILES: i32 = 20;
pub const MAX_CLOUD_CEILING_FT: i32 = 50000;
pub const MAX_NOTES_LENGTH: usize = 500;

// ============================================================================
// Capacity arithmetic
// ============================================================================

/// Seats left on a load: aircraft capacity minus jumpers currently assigned.
///
/// The raw difference is returned; it can go negative if two admissions raced
/// past the advisory check. Callers must treat anything <= 0 as "no room".
pub fn remaining_capacity(capacity: i32, current_jumpers: i64) -> i32 {
    capacity - current_jumpers as i32
}

/// Jumpers over capacity as a percentage, rounded to one decimal place.
/// Returns zero when capacity is zero.
pub fn capacity_utilization(capacity: i32, current_jumpers: i64) -> Decimal {
    if capacity <= 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(current_jumpers) / Decimal::from(capacity) * Decimal::from(100)).round_dp(1)
}

// ============================================================================
// Jump admission rules
// ============================================================================

/// Reasons a jump is refused admission onto a load
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("Load is at full capacity")]
    CapacityExceeded,

    #[error("{0} jumps require an instructor")]
    InstructorRequired(JumpType),

    #[error("Instructor not certified for tandem jumps")]
    NotTandemCertified,

    #[error("Instructor not certified for AFF jumps")]
    NotAffCertified,
}

/// Check that the remaining capacity admits one more jumper.
pub fn validate_capacity(capacity: i32, current_jumpers: i64) -> Result<(), AdmissionError> {
    if remaining_capacity(capacity, current_jumpers) <= 0 {
        return Err(AdmissionError::CapacityExceeded);
    }
    Ok(())
}

/// Certification rules for pairing an instructor with a jump type.
///
/// Tandem and AFF jumps must carry an instructor holding the matching rating;
/// fun jumpers need no instructor (a supplied one is accepted unchecked).
pub fn validate_instructor_assignment(
    jump_type: JumpType,
    instructor: Option<&InstructorCerts>,
) -> Result<(), AdmissionError> {
    if !jump_type.requires_instructor() {
        return Ok(());
    }

    let certs = instructor.ok_or(AdmissionError::InstructorRequired(jump_type))?;

    match jump_type {
        JumpType::Tandem if !certs.tandem_certified => Err(AdmissionError::NotTandemCertified),
        JumpType::Aff if !certs.aff_certified => Err(AdmissionError::NotAffCertified),
        _ => Ok(()),
    }
}

// ============================================================================
// Boundary checks
// ============================================================================

pub fn validate_aircraft_capacity(capacity: i32) -> Result<(), &'static str> {
    if !(MIN_AIRCRAFT_CAPACITY..=MAX_AIRCRAFT_CAPACITY).contains(&capacity) {
        return Err("Aircraft capacity must be between 2 and 50 seats");
    }
    Ok(())
}

pub fn validate_altitude(altitude: i32) -> Result<(), &'static str> {
    if !(MIN_ALTITUDE_FT..=MAX_ALTITUDE_FT).contains(&altitude) {
        return Err("Altitude must be between 3000 and 18000 feet");
    }
    Ok(())
}

pub fn validate_exit_order(exit_order: i32) -> Result<(), &'static str> {
    if exit_order < 1 {
        return Err("Exit order must be at least 1");
    }
    Ok(())
}

pub fn validate_wind_speed(wind_speed: i32) -> Result<(), &'static str> {
    if !(0..=MAX_WIND_SPEED_MPH).contains(&wind_speed) {
        return Err("Wind speed must be between 0 and 100 mph");
    }
    Ok(())
}

pub fn validate_wind_direction(wind_direction: i32) -> Result<(), &'static str> {
    if !(0..=360).contains(&wind_direction) {
        return Err("Wind direction must be between 0 and 360 degrees");
    }
    Ok(())
}

pub fn validate_visibility(visibility: Decimal) -> Result<(), &'static str> {
    if visibility < Decimal::ZERO || visibility > Decimal::from(MAX_VISIBILITY_MILES) {
        return Err("Visibility must be between 0 and 20 miles");
    }
    Ok(())
}

pub fn validate_cloud_ceiling(cloud_ceiling: i32) -> Result<(), &'static str> {
    if !(0..=MAX_CLOUD_CEILING_FT).contains(&cloud_ceiling) {
        return Err("Cloud ceiling must be between 0 and 50000 feet");
    }
    Ok(())
}

/// Basic email shape check
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

pub fn validate_notes(notes: &str) -> Result<(), &'static str> {
    if notes.len() > MAX_NOTES_LENGTH {
        return Err("Notes must not exceed 500 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn certs(tandem: bool, aff: bool) -> InstructorCerts {
        InstructorCerts {
            tandem_certified: tandem,
            aff_certified: aff,
        }
    }

    #[test]
    fn test_remaining_capacity_exact_difference() {
        assert_eq!(remaining_capacity(4, 0), 4);
        assert_eq!(remaining_capacity(4, 4), 0);
        // Over-admitted through a race: raw negative is exposed
        assert_eq!(remaining_capacity(4, 5), -1);
    }

    #[test]
    fn test_capacity_admits_until_full() {
        assert!(validate_capacity(4, 3).is_ok());
        assert_eq!(validate_capacity(4, 4), Err(AdmissionError::CapacityExceeded));
        assert_eq!(validate_capacity(4, 5), Err(AdmissionError::CapacityExceeded));
    }

    #[test]
    fn test_utilization_rounded_to_one_decimal() {
        assert_eq!(capacity_utilization(3, 1), Decimal::new(333, 1)); // 33.3
        assert_eq!(capacity_utilization(4, 4), Decimal::from(100));
        assert_eq!(capacity_utilization(0, 0), Decimal::ZERO);
    }

    #[test]
    fn test_tandem_requires_instructor() {
        assert_eq!(
            validate_instructor_assignment(JumpType::Tandem, None),
            Err(AdmissionError::InstructorRequired(JumpType::Tandem))
        );
    }

    #[test]
    fn test_tandem_requires_tandem_rating() {
        assert_eq!(
            validate_instructor_assignment(JumpType::Tandem, Some(&certs(false, true))),
            Err(AdmissionError::NotTandemCertified)
        );
        assert!(validate_instructor_assignment(JumpType::Tandem, Some(&certs(true, false))).is_ok());
    }

    #[test]
    fn test_aff_requires_aff_rating() {
        // The same instructor accepts AFF but would reject tandem
        let aff_only = certs(false, true);
        assert!(validate_instructor_assignment(JumpType::Aff, Some(&aff_only)).is_ok());
        assert_eq!(
            validate_instructor_assignment(JumpType::Tandem, Some(&aff_only)),
            Err(AdmissionError::NotTandemCertified)
        );
        assert_eq!(
            validate_instructor_assignment(JumpType::Aff, Some(&certs(true, false))),
            Err(AdmissionError::NotAffCertified)
        );
    }

    #[test]
    fn test_fun_jumpers_need_no_instructor() {
        assert!(validate_instructor_assignment(JumpType::FunJumper, None).is_ok());
        // A supplied instructor is accepted regardless of ratings
        assert!(
            validate_instructor_assignment(JumpType::FunJumper, Some(&certs(false, false))).is_ok()
        );
    }

    #[test]
    fn test_admission_error_messages() {
        assert_eq!(
            AdmissionError::InstructorRequired(JumpType::Tandem).to_string(),
            "tandem jumps require an instructor"
        );
        assert_eq!(
            AdmissionError::NotAffCertified.to_string(),
            "Instructor not certified for AFF jumps"
        );
        assert_eq!(
            AdmissionError::CapacityExceeded.to_string(),
            "Load is at full capacity"
        );
    }

    #[test]
    fn test_boundary_checks() {
        assert!(validate_aircraft_capacity(2).is_ok());
        assert!(validate_aircraft_capacity(50).is_ok());
        assert!(validate_aircraft_capacity(1).is_err());
        assert!(validate_aircraft_capacity(51).is_err());

        assert!(validate_altitude(10000).is_ok());
        assert!(validate_altitude(2999).is_err());
        assert!(validate_altitude(18001).is_err());

        assert!(validate_exit_order(1).is_ok());
        assert!(validate_exit_order(0).is_err());

        assert!(validate_wind_speed(0).is_ok());
        assert!(validate_wind_speed(101).is_err());
        assert!(validate_wind_direction(360).is_ok());
        assert!(validate_wind_direction(361).is_err());
        assert!(validate_visibility(Decimal::from(20)).is_ok());
        assert!(validate_visibility(Decimal::new(201, 1)).is_err());
        assert!(validate_cloud_ceiling(50000).is_ok());
        assert!(validate_cloud_ceiling(50001).is_err());

        assert!(validate_email("manifest@dropzone.example").is_ok());
        assert!(validate_email("nope").is_err());
    }
}

//! Jump admission tests
//!
//! Tests for the load admission rules:
//! - remaining capacity is the exact difference capacity - jumpers
//! - a full load rejects the next admission
//! - tandem and AFF jumps require a correctly certified instructor

use proptest::prelude::*;

use shared::models::{InstructorCerts, JumpType};
use shared::validation::{
    remaining_capacity, validate_capacity, validate_instructor_assignment, AdmissionError,
};

fn certs(tandem: bool, aff: bool) -> InstructorCerts {
    InstructorCerts {
        tandem_certified: tandem,
        aff_certified: aff,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A capacity-4 load admits four jumpers and rejects the fifth
    #[test]
    fn test_fifth_jumper_rejected_on_capacity_four() {
        for jumpers in 0..4 {
            assert!(validate_capacity(4, jumpers).is_ok(), "seat {} free", jumpers);
        }
        assert_eq!(validate_capacity(4, 4), Err(AdmissionError::CapacityExceeded));
    }

    #[test]
    fn test_rejection_message_is_exact() {
        assert_eq!(
            AdmissionError::CapacityExceeded.to_string(),
            "Load is at full capacity"
        );
    }

    #[test]
    fn test_tandem_without_instructor_always_rejects() {
        assert_eq!(
            validate_instructor_assignment(JumpType::Tandem, None),
            Err(AdmissionError::InstructorRequired(JumpType::Tandem))
        );
        assert_eq!(
            AdmissionError::InstructorRequired(JumpType::Tandem).to_string(),
            "tandem jumps require an instructor"
        );
    }

    #[test]
    fn test_aff_certification_mismatch() {
        // aff_certified=false rejects
        assert_eq!(
            validate_instructor_assignment(JumpType::Aff, Some(&certs(true, false))),
            Err(AdmissionError::NotAffCertified)
        );
        // aff_certified=true accepts AFF but the same instructor rejects tandem
        let aff_only = certs(false, true);
        assert!(validate_instructor_assignment(JumpType::Aff, Some(&aff_only)).is_ok());
        assert_eq!(
            validate_instructor_assignment(JumpType::Tandem, Some(&aff_only)),
            Err(AdmissionError::NotTandemCertified)
        );
    }

    #[test]
    fn test_fun_jumper_never_needs_instructor() {
        assert!(validate_instructor_assignment(JumpType::FunJumper, None).is_ok());
        assert!(
            validate_instructor_assignment(JumpType::FunJumper, Some(&certs(false, false)))
                .is_ok()
        );
    }

    #[test]
    fn test_overfilled_load_reports_negative_remaining() {
        // A race past the advisory check leaves the raw negative visible
        assert_eq!(remaining_capacity(4, 6), -2);
        assert_eq!(validate_capacity(4, 6), Err(AdmissionError::CapacityExceeded));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// remaining_capacity is exactly capacity - jumpers
        #[test]
        fn prop_remaining_is_exact_difference(
            capacity in 2i32..=50,
            jumpers in 0i64..=60
        ) {
            prop_assert_eq!(remaining_capacity(capacity, jumpers), capacity - jumpers as i32);
        }

        /// Admission succeeds iff at least one seat remains
        #[test]
        fn prop_admission_matches_free_seats(
            capacity in 2i32..=50,
            jumpers in 0i64..=60
        ) {
            let admitted = validate_capacity(capacity, jumpers).is_ok();
            prop_assert_eq!(admitted, remaining_capacity(capacity, jumpers) > 0);
        }

        /// Instructor-required types reject without an instructor; fun jumpers
        /// never do
        #[test]
        fn prop_instructor_requirement_by_type(
            type_idx in 0usize..JumpType::ALL.len()
        ) {
            let jump_type = JumpType::ALL[type_idx];
            let result = validate_instructor_assignment(jump_type, None);
            prop_assert_eq!(result.is_err(), jump_type.requires_instructor());
        }

        /// A fully certified instructor is accepted for every jump type
        #[test]
        fn prop_full_certs_always_accepted(
            type_idx in 0usize..JumpType::ALL.len()
        ) {
            let jump_type = JumpType::ALL[type_idx];
            prop_assert!(
                validate_instructor_assignment(jump_type, Some(&certs(true, true))).is_ok()
            );
        }
    }
}

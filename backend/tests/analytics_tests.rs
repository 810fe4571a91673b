//! Load statistics and revenue tests
//!
//! Tests for the derived analytics:
//! - revenue estimate at the configured rates
//! - capacity utilization rounded to one decimal place
//! - zero-division guards for empty loads and zero capacity

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{JumpType, LoadSummary, RevenueRates};
use shared::validation::capacity_utilization;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// 2 tandems + 1 AFF + 3 fun jumpers at default rates:
    /// 2 x 250 + 1 x 350 + 3 x 25 = 925
    #[test]
    fn test_revenue_estimate_default_rates() {
        let jumps = [
            JumpType::Tandem,
            JumpType::Tandem,
            JumpType::Aff,
            JumpType::FunJumper,
            JumpType::FunJumper,
            JumpType::FunJumper,
        ];
        let summary = LoadSummary::compute(12, &jumps, &RevenueRates::default());

        assert_eq!(summary.total_jumpers, 6);
        assert_eq!(summary.tandem_count, 2);
        assert_eq!(summary.aff_count, 1);
        assert_eq!(summary.fun_jumper_count, 3);
        assert_eq!(summary.revenue_estimate, dec("925.0"));
        assert_eq!(summary.capacity_utilization, dec("50.0"));
    }

    #[test]
    fn test_revenue_tracks_configured_rates() {
        let rates = RevenueRates {
            tandem: dec("300"),
            aff: dec("400"),
            fun_jumper: dec("30"),
        };
        let summary = LoadSummary::compute(10, &[JumpType::Tandem, JumpType::FunJumper], &rates);
        assert_eq!(summary.revenue_estimate, dec("330"));
    }

    #[test]
    fn test_empty_load_is_all_zeros() {
        let summary = LoadSummary::compute(12, &[], &RevenueRates::default());
        assert_eq!(summary.total_jumpers, 0);
        assert_eq!(summary.revenue_estimate, Decimal::ZERO);
        assert_eq!(summary.capacity_utilization, Decimal::ZERO);
    }

    #[test]
    fn test_utilization_rounds_to_one_decimal() {
        assert_eq!(capacity_utilization(3, 1), dec("33.3"));
        assert_eq!(capacity_utilization(3, 2), dec("66.7"));
        assert_eq!(capacity_utilization(7, 3), dec("42.9"));
    }

    #[test]
    fn test_zero_capacity_guard() {
        assert_eq!(capacity_utilization(0, 0), Decimal::ZERO);
        assert_eq!(capacity_utilization(0, 5), Decimal::ZERO);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn jump_types_strategy() -> impl Strategy<Value = Vec<JumpType>> {
        prop::collection::vec(
            (0usize..JumpType::ALL.len()).prop_map(|i| JumpType::ALL[i]),
            0..30,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Per-type counts always sum to the total
        #[test]
        fn prop_counts_sum_to_total(jumps in jump_types_strategy()) {
            let summary = LoadSummary::compute(50, &jumps, &RevenueRates::default());
            prop_assert_eq!(
                summary.tandem_count + summary.aff_count + summary.fun_jumper_count,
                summary.total_jumpers
            );
            prop_assert_eq!(summary.total_jumpers as usize, jumps.len());
        }

        /// Revenue is the rate-weighted sum of the per-type counts
        #[test]
        fn prop_revenue_is_rate_weighted_sum(jumps in jump_types_strategy()) {
            let rates = RevenueRates::default();
            let summary = LoadSummary::compute(50, &jumps, &rates);
            let expected = Decimal::from(summary.tandem_count) * rates.tandem
                + Decimal::from(summary.aff_count) * rates.aff
                + Decimal::from(summary.fun_jumper_count) * rates.fun_jumper;
            prop_assert_eq!(summary.revenue_estimate, expected);
        }

        /// Utilization stays within [0, 100] while the load is at or under
        /// capacity
        #[test]
        fn prop_utilization_bounded(
            capacity in 2i32..=50,
            jumpers in 0i64..=50
        ) {
            prop_assume!(jumpers <= capacity as i64);
            let utilization = capacity_utilization(capacity, jumpers);
            prop_assert!(utilization >= Decimal::ZERO);
            prop_assert!(utilization <= Decimal::from(100));
        }

        /// Rounding is to exactly one decimal place
        #[test]
        fn prop_utilization_one_decimal(
            capacity in 2i32..=50,
            jumpers in 0i64..=50
        ) {
            let utilization = capacity_utilization(capacity, jumpers);
            prop_assert!(utilization.scale() <= 1);
        }
    }
}

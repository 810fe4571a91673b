//! Weather impact aggregation tests
//!
//! Tests for the daily suitability rollup:
//! - suitability flags OR-accumulate across all reports on a calendar date
//! - a date is fully suitable only when all three flags accumulated true
//! - summary counts over the window

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use shared::models::{
    accumulate_daily_suitability, count_suitable_days, SuitabilityReading, WeatherCondition,
};

fn reading(time: DateTime<Utc>, tandem: bool, student: bool, fun: bool) -> SuitabilityReading {
    SuitabilityReading {
        time,
        condition: WeatherCondition::Marginal,
        wind_speed: 15,
        visibility: Decimal::from(10),
        suitable_for_tandems: tandem,
        suitable_for_students: student,
        suitable_for_fun_jumpers: fun,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A tandem-only morning report and a student-only afternoon report make
    /// the date suitable for tandems, students and fun jumpers alike
    #[test]
    fn test_same_day_reports_or_together() {
        let morning = Utc.with_ymd_and_hms(2026, 5, 9, 8, 30, 0).unwrap();
        let afternoon = Utc.with_ymd_and_hms(2026, 5, 9, 14, 0, 0).unwrap();

        let daily = accumulate_daily_suitability(&[
            reading(morning, true, false, true),
            reading(afternoon, false, true, true),
        ]);

        assert_eq!(daily.len(), 1);
        let day = &daily[&morning.date_naive()];
        assert!(day.tandem_suitable);
        assert!(day.student_suitable);
        assert!(day.fun_jumper_suitable);
        assert!(day.fully_suitable());

        let counts = count_suitable_days(&daily);
        assert_eq!(counts.suitable_days, 1);
        assert_eq!(counts.tandem_suitable_days, 1);
        assert_eq!(counts.student_suitable_days, 1);
    }

    #[test]
    fn test_unsuitable_reports_never_clear_a_flag() {
        let t0 = Utc.with_ymd_and_hms(2026, 5, 10, 8, 0, 0).unwrap();
        let daily = accumulate_daily_suitability(&[
            reading(t0, true, true, true),
            reading(t0 + Duration::hours(2), false, false, false),
            reading(t0 + Duration::hours(4), false, false, false),
        ]);

        let day = &daily[&t0.date_naive()];
        assert!(day.fully_suitable());
        assert_eq!(day.conditions.len(), 3);
    }

    #[test]
    fn test_reports_split_by_calendar_date() {
        let late = Utc.with_ymd_and_hms(2026, 5, 10, 23, 30, 0).unwrap();
        let early_next = Utc.with_ymd_and_hms(2026, 5, 11, 0, 30, 0).unwrap();

        let daily = accumulate_daily_suitability(&[
            reading(late, true, true, true),
            reading(early_next, false, false, true),
        ]);

        assert_eq!(daily.len(), 2);
        assert!(daily[&late.date_naive()].fully_suitable());
        assert!(!daily[&early_next.date_naive()].fully_suitable());
    }

    #[test]
    fn test_empty_window_has_zero_counts() {
        let daily = accumulate_daily_suitability(&[]);
        let counts = count_suitable_days(&daily);
        assert_eq!(counts.suitable_days, 0);
        assert_eq!(counts.tandem_suitable_days, 0);
        assert_eq!(counts.student_suitable_days, 0);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn flags_strategy() -> impl Strategy<Value = Vec<(bool, bool, bool)>> {
        prop::collection::vec(
            (any::<bool>(), any::<bool>(), any::<bool>()),
            1..12,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Each accumulated flag is the OR of that flag across the day's
        /// reports
        #[test]
        fn prop_flags_are_or_of_reports(flags in flags_strategy()) {
            let t0 = Utc.with_ymd_and_hms(2026, 5, 12, 6, 0, 0).unwrap();
            let readings: Vec<_> = flags
                .iter()
                .enumerate()
                .map(|(i, (tandem, student, fun))| {
                    reading(t0 + Duration::minutes(i as i64 * 30), *tandem, *student, *fun)
                })
                .collect();

            let daily = accumulate_daily_suitability(&readings);
            prop_assert_eq!(daily.len(), 1);
            let day = &daily[&t0.date_naive()];

            prop_assert_eq!(day.tandem_suitable, flags.iter().any(|f| f.0));
            prop_assert_eq!(day.student_suitable, flags.iter().any(|f| f.1));
            prop_assert_eq!(day.fun_jumper_suitable, flags.iter().any(|f| f.2));
            prop_assert_eq!(day.conditions.len(), flags.len());
        }

        /// suitable_days never exceeds either discipline count
        #[test]
        fn prop_fully_suitable_is_most_restrictive(flags in flags_strategy()) {
            let t0 = Utc.with_ymd_and_hms(2026, 5, 12, 6, 0, 0).unwrap();
            // One report per day so each flag tuple decides one date
            let readings: Vec<_> = flags
                .iter()
                .enumerate()
                .map(|(i, (tandem, student, fun))| {
                    reading(t0 + Duration::days(i as i64), *tandem, *student, *fun)
                })
                .collect();

            let counts = count_suitable_days(&accumulate_daily_suitability(&readings));
            prop_assert!(counts.suitable_days <= counts.tandem_suitable_days);
            prop_assert!(counts.suitable_days <= counts.student_suitable_days);
        }
    }
}

//! Weather domain types and the daily suitability aggregation

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EnumParseError;

/// Overall sky condition recorded with a weather report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Good,
    Marginal,
    Poor,
}

impl WeatherCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Good => "good",
            WeatherCondition::Marginal => "marginal",
            WeatherCondition::Poor => "poor",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherCondition {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(WeatherCondition::Good),
            "marginal" => Ok(WeatherCondition::Marginal),
            "poor" => Ok(WeatherCondition::Poor),
            other => Err(EnumParseError {
                kind: "weather_condition",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for WeatherCondition {
    type Error = EnumParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One weather report reduced to the fields the suitability aggregation needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuitabilityReading {
    pub time: DateTime<Utc>,
    pub condition: WeatherCondition,
    pub wind_speed: i32,
    pub visibility: Decimal,
    pub suitable_for_tandems: bool,
    pub suitable_for_students: bool,
    pub suitable_for_fun_jumpers: bool,
}

/// A single observation kept in the per-day breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub time: DateTime<Utc>,
    pub condition: WeatherCondition,
    pub wind_speed: i32,
    pub visibility: Decimal,
}

/// Suitability flags OR-accumulated across all reports on one calendar date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySuitability {
    pub tandem_suitable: bool,
    pub student_suitable: bool,
    pub fun_jumper_suitable: bool,
    pub conditions: Vec<WeatherObservation>,
}

impl DailySuitability {
    /// A day counts as fully suitable only when every discipline could jump.
    pub fn fully_suitable(&self) -> bool {
        self.tandem_suitable && self.student_suitable && self.fun_jumper_suitable
    }
}

/// Group readings by calendar date, OR-accumulating each suitability flag.
///
/// A single workable window during the day marks that discipline's flag true
/// for the whole date, regardless of how many unsuitable reports surround it.
pub fn accumulate_daily_suitability(
    readings: &[SuitabilityReading],
) -> BTreeMap<NaiveDate, DailySuitability> {
    let mut daily: BTreeMap<NaiveDate, DailySuitability> = BTreeMap::new();

    for reading in readings {
        let entry = daily
            .entry(reading.time.date_naive())
            .or_insert_with(|| DailySuitability {
                tandem_suitable: false,
                student_suitable: false,
                fun_jumper_suitable: false,
                conditions: Vec::new(),
            });

        entry.tandem_suitable = entry.tandem_suitable || reading.suitable_for_tandems;
        entry.student_suitable = entry.student_suitable || reading.suitable_for_students;
        entry.fun_jumper_suitable = entry.fun_jumper_suitable || reading.suitable_for_fun_jumpers;
        entry.conditions.push(WeatherObservation {
            time: reading.time,
            condition: reading.condition,
            wind_speed: reading.wind_speed,
            visibility: reading.visibility,
        });
    }

    daily
}

/// Counts of suitable days across an aggregated window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitabilityCounts {
    pub suitable_days: i64,
    pub tandem_suitable_days: i64,
    pub student_suitable_days: i64,
}

pub fn count_suitable_days(daily: &BTreeMap<NaiveDate, DailySuitability>) -> SuitabilityCounts {
    let mut counts = SuitabilityCounts {
        suitable_days: 0,
        tandem_suitable_days: 0,
        student_suitable_days: 0,
    };

    for day in daily.values() {
        if day.tandem_suitable {
            counts.tandem_suitable_days += 1;
        }
        if day.student_suitable {
            counts.student_suitable_days += 1;
        }
        if day.fully_suitable() {
            counts.suitable_days += 1;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reading(
        time: DateTime<Utc>,
        tandem: bool,
        student: bool,
        fun: bool,
    ) -> SuitabilityReading {
        SuitabilityReading {
            time,
            condition: WeatherCondition::Marginal,
            wind_speed: 12,
            visibility: Decimal::from(8),
            suitable_for_tandems: tandem,
            suitable_for_students: student,
            suitable_for_fun_jumpers: fun,
        }
    }

    #[test]
    fn test_or_accumulation_across_reports() {
        // Morning report is tandem-only, afternoon is student-only, both allow
        // fun jumpers. The date ends up suitable for everyone.
        let morning = Utc.with_ymd_and_hms(2025, 6, 14, 9, 0, 0).unwrap();
        let afternoon = Utc.with_ymd_and_hms(2025, 6, 14, 15, 0, 0).unwrap();
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
        assert_eq!(day.conditions.len(), 2);
    }

    #[test]
    fn test_partial_day_is_not_fully_suitable() {
        let time = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
        let daily = accumulate_daily_suitability(&[reading(time, true, false, true)]);
        let day = &daily[&time.date_naive()];
        assert!(day.tandem_suitable);
        assert!(!day.student_suitable);
        assert!(!day.fully_suitable());
    }

    #[test]
    fn test_counts_split_by_discipline() {
        let day1 = Utc.with_ymd_and_hms(2025, 6, 14, 9, 0, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).unwrap();
        let daily = accumulate_daily_suitability(&[
            reading(day1, true, true, true),
            reading(day2, true, false, false),
        ]);

        let counts = count_suitable_days(&daily);
        assert_eq!(counts.suitable_days, 1);
        assert_eq!(counts.tandem_suitable_days, 2);
        assert_eq!(counts.student_suitable_days, 1);
    }

    #[test]
    fn test_empty_window() {
        let daily = accumulate_daily_suitability(&[]);
        assert!(daily.is_empty());
        let counts = count_suitable_days(&daily);
        assert_eq!(counts.suitable_days, 0);
    }
}

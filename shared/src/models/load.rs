//! Load domain types: statuses and per-load summary statistics

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EnumParseError, JumpType, RevenueRates};
use crate::validation::capacity_utilization;

/// Lifecycle status of a load.
///
/// Transitions are free-form field updates; there is no enforced transition
/// graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Planning,
    Confirmed,
    Boarded,
    Departed,
    Completed,
    Cancelled,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Planning => "planning",
            LoadStatus::Confirmed => "confirmed",
            LoadStatus::Boarded => "boarded",
            LoadStatus::Departed => "departed",
            LoadStatus::Completed => "completed",
            LoadStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(LoadStatus::Planning),
            "confirmed" => Ok(LoadStatus::Confirmed),
            "boarded" => Ok(LoadStatus::Boarded),
            "departed" => Ok(LoadStatus::Departed),
            "completed" => Ok(LoadStatus::Completed),
            "cancelled" => Ok(LoadStatus::Cancelled),
            other => Err(EnumParseError {
                kind: "load_status",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for LoadStatus {
    type Error = EnumParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Derived statistics for a single load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSummary {
    pub total_jumpers: i64,
    pub tandem_count: i64,
    pub aff_count: i64,
    pub fun_jumper_count: i64,
    /// Jumpers over aircraft capacity, as a percentage rounded to one decimal
    pub capacity_utilization: Decimal,
    pub revenue_estimate: Decimal,
}

impl LoadSummary {
    /// Compute the summary from the aircraft capacity and the jump types
    /// currently assigned to the load.
    pub fn compute(capacity: i32, jump_types: &[JumpType], rates: &RevenueRates) -> Self {
        let tandem_count = jump_types.iter().filter(|t| **t == JumpType::Tandem).count() as i64;
        let aff_count = jump_types.iter().filter(|t| **t == JumpType::Aff).count() as i64;
        let fun_jumper_count =
            jump_types.iter().filter(|t| **t == JumpType::FunJumper).count() as i64;
        let total_jumpers = jump_types.len() as i64;

        let revenue_estimate = Decimal::from(tandem_count) * rates.tandem
            + Decimal::from(aff_count) * rates.aff
            + Decimal::from(fun_jumper_count) * rates.fun_jumper;

        Self {
            total_jumpers,
            tandem_count,
            aff_count,
            fun_jumper_count,
            capacity_utilization: capacity_utilization(capacity, total_jumpers),
            revenue_estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_status_round_trip() {
        for s in [
            "planning",
            "confirmed",
            "boarded",
            "departed",
            "completed",
            "cancelled",
        ] {
            assert_eq!(s.parse::<LoadStatus>().unwrap().as_str(), s);
        }
    }

    #[test]
    fn test_summary_revenue_estimate() {
        // 2 tandem + 1 aff + 3 fun_jumper = 2*250 + 350 + 3*25 = 925
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
        assert_eq!(summary.revenue_estimate, Decimal::from(925));
        assert_eq!(summary.capacity_utilization, Decimal::new(500, 1)); // 50.0
    }

    #[test]
    fn test_summary_empty_load() {
        let summary = LoadSummary::compute(14, &[], &RevenueRates::default());
        assert_eq!(summary.total_jumpers, 0);
        assert_eq!(summary.revenue_estimate, Decimal::ZERO);
        assert_eq!(summary.capacity_utilization, Decimal::ZERO);
    }
}

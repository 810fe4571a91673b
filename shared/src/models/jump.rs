//! Jump domain types: jump categories, AFF progression levels, revenue rates

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EnumParseError;

/// The category of a jump, which determines instructor requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpType {
    Tandem,
    Aff,
    FunJumper,
}

impl JumpType {
    pub const ALL: [JumpType; 3] = [JumpType::Tandem, JumpType::Aff, JumpType::FunJumper];

    pub fn as_str(&self) -> &'static str {
        match self {
            JumpType::Tandem => "tandem",
            JumpType::Aff => "aff",
            JumpType::FunJumper => "fun_jumper",
        }
    }

    /// Tandem and AFF jumps must be accompanied by a certified instructor;
    /// fun jumpers are licensed and jump on their own.
    pub fn requires_instructor(&self) -> bool {
        matches!(self, JumpType::Tandem | JumpType::Aff)
    }
}

impl fmt::Display for JumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JumpType {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tandem" => Ok(JumpType::Tandem),
            "aff" => Ok(JumpType::Aff),
            "fun_jumper" => Ok(JumpType::FunJumper),
            other => Err(EnumParseError {
                kind: "jump_type",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for JumpType {
    type Error = EnumParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// AFF student progression level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AffLevel {
    #[serde(rename = "level_1")]
    Level1,
    #[serde(rename = "level_2")]
    Level2,
    #[serde(rename = "level_3")]
    Level3,
    #[serde(rename = "level_4")]
    Level4,
    #[serde(rename = "level_5")]
    Level5,
    #[serde(rename = "level_6")]
    Level6,
    #[serde(rename = "level_7")]
    Level7,
    #[serde(rename = "graduate")]
    Graduate,
}

impl AffLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AffLevel::Level1 => "level_1",
            AffLevel::Level2 => "level_2",
            AffLevel::Level3 => "level_3",
            AffLevel::Level4 => "level_4",
            AffLevel::Level5 => "level_5",
            AffLevel::Level6 => "level_6",
            AffLevel::Level7 => "level_7",
            AffLevel::Graduate => "graduate",
        }
    }
}

impl fmt::Display for AffLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AffLevel {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "level_1" => Ok(AffLevel::Level1),
            "level_2" => Ok(AffLevel::Level2),
            "level_3" => Ok(AffLevel::Level3),
            "level_4" => Ok(AffLevel::Level4),
            "level_5" => Ok(AffLevel::Level5),
            "level_6" => Ok(AffLevel::Level6),
            "level_7" => Ok(AffLevel::Level7),
            "graduate" => Ok(AffLevel::Graduate),
            other => Err(EnumParseError {
                kind: "aff_level",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for AffLevel {
    type Error = EnumParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Per-jump-type revenue rates used for load revenue estimates.
///
/// Loaded from configuration; the defaults match the rates the dropzone has
/// historically charged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueRates {
    pub tandem: Decimal,
    pub aff: Decimal,
    pub fun_jumper: Decimal,
}

impl RevenueRates {
    pub fn rate_for(&self, jump_type: JumpType) -> Decimal {
        match jump_type {
            JumpType::Tandem => self.tandem,
            JumpType::Aff => self.aff,
            JumpType::FunJumper => self.fun_jumper,
        }
    }
}

impl Default for RevenueRates {
    fn default() -> Self {
        Self {
            tandem: Decimal::from(250),
            aff: Decimal::from(350),
            fun_jumper: Decimal::from(25),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_type_round_trip() {
        for jump_type in JumpType::ALL {
            assert_eq!(jump_type.as_str().parse::<JumpType>(), Ok(jump_type));
        }
    }

    #[test]
    fn test_jump_type_unknown_value() {
        assert!("hop_n_pop".parse::<JumpType>().is_err());
    }

    #[test]
    fn test_instructor_requirement() {
        assert!(JumpType::Tandem.requires_instructor());
        assert!(JumpType::Aff.requires_instructor());
        assert!(!JumpType::FunJumper.requires_instructor());
    }

    #[test]
    fn test_aff_level_round_trip() {
        for s in [
            "level_1", "level_2", "level_3", "level_4", "level_5", "level_6", "level_7",
            "graduate",
        ] {
            assert_eq!(s.parse::<AffLevel>().unwrap().as_str(), s);
        }
    }

    #[test]
    fn test_default_rates() {
        let rates = RevenueRates::default();
        assert_eq!(rates.rate_for(JumpType::Tandem), Decimal::from(250));
        assert_eq!(rates.rate_for(JumpType::Aff), Decimal::from(350));
        assert_eq!(rates.rate_for(JumpType::FunJumper), Decimal::from(25));
    }
}

//! Business logic services for the dropzone operations backend

use serde::{Deserialize, Deserializer};

/// Deserializer for nullable patch fields: an absent field stays `None`
/// (leave the stored value alone) while an explicit JSON null becomes
/// `Some(None)` (clear it). Plain `Option<Option<T>>` would fold null into
/// the outer `None`.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

pub mod aircraft;
pub mod analytics;
pub mod instructor;
pub mod jump;
pub mod load;
pub mod weather;

pub use aircraft::AircraftService;
pub use analytics::AnalyticsService;
pub use instructor::InstructorService;
pub use jump::JumpService;
pub use load::LoadService;
pub use weather::WeatherService;

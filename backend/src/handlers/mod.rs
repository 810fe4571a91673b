//! HTTP handlers: thin layer translating requests into service calls

pub mod aircraft;
pub mod analytics;
pub mod health;
pub mod instructor;
pub mod jump;
pub mod load;
pub mod weather;

pub use aircraft::*;
pub use analytics::*;
pub use health::health_check;
pub use instructor::*;
pub use jump::*;
pub use load::*;
pub use weather::*;

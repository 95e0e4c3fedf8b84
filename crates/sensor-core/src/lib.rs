//! # sensor-core
//!
//! Foundation crate for the portable sensor bridge.
//! Defines the sensor types, rate codes, event record, errors and result
//! codes, configuration, and tracing setup. `sensor-bridge` depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::BridgeConfig;
pub use errors::{ResultCode, SensorError, SensorResult, TranslationError};
pub use types::event::{RawSample, SensorEvent};
pub use types::rate::{NativeDelay, NativeRate, SensorRate};
pub use types::sensor_type::{SensorSelector, SensorType};

//! Data-path errors. Logged and counted by the bridge, never surfaced.

use crate::types::sensor_type::SensorType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslationError {
    #[error("Sample for {sensor} carries {len} values, event holds at most {max}")]
    TooManyValues {
        sensor: SensorType,
        len: usize,
        max: usize,
    },
}

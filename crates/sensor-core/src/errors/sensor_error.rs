//! Control-path errors: returned by start/stop, never thrown.

use crate::types::sensor_type::{SensorSelector, SensorType};

use super::error_code::{self, ResultCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    #[error("Sensor not available: {sensor}")]
    NotAvailable { sensor: SensorSelector },

    #[error("Interval not set for {sensor}: {reason}")]
    IntervalNotSet { sensor: SensorType, reason: String },

    #[error("Sensor already enabled: {sensor}")]
    AlreadyEnabled { sensor: SensorType },

    #[error("Sensor not enabled: {sensor}")]
    NotEnabled { sensor: SensorType },

    #[error("Cannot disable {sensor}: {reason}")]
    CannotDisable { sensor: SensorType, reason: String },

    #[error("Invalid interval code: {code}")]
    InvalidInterval { code: i32 },
}

impl SensorError {
    pub fn not_available(sensor: impl Into<SensorSelector>) -> Self {
        Self::NotAvailable {
            sensor: sensor.into(),
        }
    }

    pub fn interval_not_set(sensor: SensorType, reason: impl Into<String>) -> Self {
        Self::IntervalNotSet {
            sensor,
            reason: reason.into(),
        }
    }

    pub fn cannot_disable(sensor: SensorType, reason: impl Into<String>) -> Self {
        Self::CannotDisable {
            sensor,
            reason: reason.into(),
        }
    }
}

impl ResultCode for SensorError {
    fn result_code(&self) -> i32 {
        match self {
            Self::NotAvailable { .. } => error_code::NOT_AVAILABLE,
            Self::IntervalNotSet { .. } | Self::InvalidInterval { .. } => {
                error_code::INTERVAL_NOT_SET
            }
            Self::AlreadyEnabled { .. } => error_code::ALREADY_ENABLED,
            Self::NotEnabled { .. } => error_code::NOT_ENABLED,
            Self::CannotDisable { .. } => error_code::CANNOT_DISABLE,
        }
    }
}

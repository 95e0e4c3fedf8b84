//! Bridge status snapshot and per-sensor device support checks.

use serde::Serialize;

use sensor_core::{BridgeConfig, SensorType};

use crate::traits::SensorService;

/// Point-in-time view of the bridge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeStatus {
    pub suspended: bool,
    /// Every sensor whose slot is not inactive.
    pub sensors: Vec<SensorStatus>,
    pub delivered: u64,
    pub dropped: u64,
    pub ignored: u64,
}

impl BridgeStatus {
    pub fn active_count(&self) -> usize {
        self.sensors.iter().filter(|s| s.state == "active").count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorStatus {
    pub sensor: SensorType,
    pub state: &'static str,
    pub rate_code: i32,
}

/// Result of probing one sensor type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorCheck {
    pub sensor: SensorType,
    /// Whether `start` could succeed for this sensor.
    pub available: bool,
    pub detail: String,
}

impl SensorCheck {
    pub fn ok(sensor: SensorType, detail: impl Into<String>) -> Self {
        Self {
            sensor,
            available: true,
            detail: detail.into(),
        }
    }

    pub fn unavailable(sensor: SensorType, detail: impl Into<String>) -> Self {
        Self {
            sensor,
            available: false,
            detail: detail.into(),
        }
    }
}

/// Probe every sensor type against the device and the configuration.
pub fn check_sensors<S: SensorService + ?Sized>(service: &S, config: &BridgeConfig) -> Vec<SensorCheck> {
    SensorType::ALL
        .iter()
        .map(|sensor| {
            if config.is_disabled(*sensor) {
                SensorCheck::unavailable(*sensor, "disabled by configuration")
            } else if service.default_sensor(*sensor).is_some() {
                SensorCheck::ok(*sensor, "present")
            } else {
                SensorCheck::unavailable(*sensor, "not present on this device")
            }
        })
        .collect()
}

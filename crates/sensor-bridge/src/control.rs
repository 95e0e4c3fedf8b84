//! Integer-coded control surface for the embedding runtime.
//!
//! These functions never fail: every outcome is an `i32` result code.

use serde_json::json;
use tracing::debug;

use sensor_core::errors::error_code;
use sensor_core::{ResultCode, SensorSelector, SensorType};

use crate::bridge::SensorBridge;
use crate::traits::{EventSink, SensorService};

/// Start a sensor. Returns `0`, `-2` (not available), `-3` (interval not
/// set) or `-4` (already enabled). Sensor and slot checks come before the
/// interval check.
pub fn sensor_start<S: SensorService, K: EventSink>(
    bridge: &SensorBridge<S, K>,
    sensor: i32,
    interval: i32,
) -> i32 {
    let Some(selector) = SensorSelector::from_code(sensor) else {
        debug!(code = sensor, "Unknown sensor type code");
        return error_code::NOT_AVAILABLE;
    };
    bridge.start_with_code(selector, interval).result_code()
}

/// Stop a sensor. Returns `0`, `-5` (not enabled) or `-6` (cannot disable).
pub fn sensor_stop<S: SensorService, K: EventSink>(bridge: &SensorBridge<S, K>, sensor: i32) -> i32 {
    match SensorType::from_code(sensor) {
        Some(sensor) => bridge.stop(sensor).result_code(),
        // Nothing outside 1..=10 (the wildcard included) can have been started.
        None => error_code::NOT_ENABLED,
    }
}

/// Bridge status as JSON for the host's diagnostics surface.
pub fn sensor_status_json<S: SensorService, K: EventSink>(bridge: &SensorBridge<S, K>) -> serde_json::Value {
    let status = bridge.status();
    let sensors: Vec<serde_json::Value> = status
        .sensors
        .iter()
        .map(|s| {
            json!({
                "sensor": s.sensor,
                "code": s.sensor.code(),
                "state": s.state,
                "rate_code": s.rate_code,
            })
        })
        .collect();
    json!({
        "suspended": status.suspended,
        "active_count": status.active_count(),
        "sensors": sensors,
        "delivered": status.delivered,
        "dropped": status.dropped,
        "ignored": status.ignored,
        "version": env!("CARGO_PKG_VERSION"),
    })
}

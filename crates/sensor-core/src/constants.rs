//! Constants shared with the host runtime's sensor API.

/// Event tag written into slot 0 of every sensor event record.
pub const EVENT_TYPE_SENSOR: i32 = 22;

/// Width of a sensor event record: tag, sensor type, four values.
pub const SENSOR_EVENT_SIZE: usize = 6;
/// Index of the event tag in the record.
pub const SEVENT_TYPE: usize = 0;
/// Index of the sensor type code in the record.
pub const SEVENT_SENSOR_TYPE: usize = 1;
/// Index of the first value slot in the record.
pub const SEVENT_SENSOR_VALUES: usize = 2;
/// Maximum number of values carried by one event.
pub const SENSOR_MAX_VALUES: usize = SENSOR_EVENT_SIZE - SEVENT_SENSOR_VALUES;

/// Wildcard sensor type code. Accepted as input, never supported.
pub const SENSOR_TYPE_ALL: i32 = -1;
/// Number of concrete sensor types (codes `1..=SENSOR_TYPE_COUNT`).
pub const SENSOR_TYPE_COUNT: usize = 10;

/// Result code: success.
pub const SENSOR_ERROR_NONE: i32 = 0;
/// Result code: the sensor does not exist on this device or is unsupported.
pub const SENSOR_ERROR_NOT_AVAILABLE: i32 = -2;
/// Result code: the platform refused registration at the requested rate.
pub const SENSOR_ERROR_INTERVAL_NOT_SET: i32 = -3;
/// Result code: the sensor was already started.
pub const SENSOR_ERROR_ALREADY_ENABLED: i32 = -4;
/// Result code: stop was called on a sensor that was never started.
pub const SENSOR_ERROR_NOT_ENABLED: i32 = -5;
/// Result code: platform unregistration did not take effect.
pub const SENSOR_ERROR_CANNOT_DISABLE: i32 = -6;

/// Rate code: deliver samples as fast as possible.
pub const SENSOR_DELAY_FASTEST: i32 = 0;
/// Rate code: rate suitable for games.
pub const SENSOR_DELAY_GAME: i32 = -1;
/// Rate code: default rate.
pub const SENSOR_DELAY_NORMAL: i32 = -2;
/// Rate code: rate suitable for UI updates.
pub const SENSOR_DELAY_UI: i32 = -3;

/// Milliseconds to native (microsecond) rate multiplier.
pub const SENSOR_DELAY_MULTIPLIER: u32 = 1000;

/// Keeps accelerometer values roughly in [-1, 1] and flips the sign.
pub const ACCELEROMETER_ADJUSTMENT: f32 = -10.0;

/// Stored rate code of an inactive slot.
pub const SENSOR_RATE_INACTIVE: i32 = -1;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "SENSOR_BRIDGE_LOG";

//! # sensor-bridge
//!
//! Forwards device motion/orientation samples from a platform sensor
//! service into a runtime's event queue, with start/stop control keyed by
//! portable sensor types and rate codes.
//!
//! ## Modules
//! - `bridge` — `SensorBridge`: slot table, start/stop, suspend/resume, sample forwarding
//! - `control` — integer-coded start/stop/status surface for the embedding runtime
//! - `health` — status snapshot and per-sensor device support checks
//! - `sink` — crossbeam channel event sink
//! - `slots` — per-sensor registration state
//! - `testing` — stub sensor service and recording sink
//! - `traits` — `SensorService`, `EventSink`, `SampleListener`
//! - `translate` — raw sample → fixed-width event record

pub mod bridge;
pub mod control;
pub mod health;
pub mod sink;
pub mod slots;
pub mod testing;
pub mod traits;
pub mod translate;

pub use bridge::SensorBridge;
pub use sink::ChannelSink;
pub use traits::{EventSink, PlatformError, SampleListener, SensorService};

pub use sensor_core::{
    BridgeConfig, NativeDelay, NativeRate, RawSample, ResultCode, SensorError, SensorEvent,
    SensorRate, SensorResult, SensorSelector, SensorType,
};

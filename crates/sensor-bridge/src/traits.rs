//! Collaborator seams of the bridge.
//!
//! `SensorService` is the platform's sensor manager, `EventSink` is the
//! runtime's event queue, and `SampleListener` is the callback interface a
//! platform binding registers with the host. All traits are object-safe
//! where possible, `Send + Sync`, and have blanket `Arc<T>` impls.

use std::fmt;
use std::sync::Arc;

use sensor_core::{NativeRate, RawSample, SensorEvent, SensorType};

/// Failure reported by a platform call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Platform call {operation} failed: {reason}")]
pub struct PlatformError {
    pub operation: &'static str,
    pub reason: String,
}

impl PlatformError {
    pub fn new(operation: &'static str, reason: impl Into<String>) -> Self {
        Self {
            operation,
            reason: reason.into(),
        }
    }
}

/// The platform sensor service.
///
/// The platform binding owns the listener wiring: it forwards every sample
/// the host delivers for a registered handle to the bridge's
/// [`SampleListener`] implementation.
pub trait SensorService: Send + Sync {
    /// Opaque reference to a concrete sensor instance.
    type Handle: Clone + fmt::Debug + Send + Sync;

    /// Resolve the device's default sensor of this type.
    fn default_sensor(&self, sensor: SensorType) -> Option<Self::Handle>;

    /// Start delivery for `handle` at `rate`. `false` means the platform
    /// refused the registration.
    fn register(&self, handle: &Self::Handle, rate: NativeRate) -> bool;

    /// Stop delivery for `handle`.
    fn unregister(&self, handle: &Self::Handle) -> Result<(), PlatformError>;

    /// Stop delivery for every handle at once.
    fn unregister_all(&self);

    /// Whether the platform still delivers for `handle`. Platforms that
    /// cannot tell report `false`.
    fn is_registered(&self, _handle: &Self::Handle) -> bool {
        false
    }
}

impl<T: SensorService + ?Sized> SensorService for Arc<T> {
    type Handle = T::Handle;

    fn default_sensor(&self, sensor: SensorType) -> Option<Self::Handle> {
        (**self).default_sensor(sensor)
    }
    fn register(&self, handle: &Self::Handle, rate: NativeRate) -> bool {
        (**self).register(handle, rate)
    }
    fn unregister(&self, handle: &Self::Handle) -> Result<(), PlatformError> {
        (**self).unregister(handle)
    }
    fn unregister_all(&self) {
        (**self).unregister_all()
    }
    fn is_registered(&self, handle: &Self::Handle) -> bool {
        (**self).is_registered(handle)
    }
}

/// The runtime's event queue. Delivery is fire-and-forget.
pub trait EventSink: Send + Sync {
    fn post_event(&self, event: SensorEvent);
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn post_event(&self, event: SensorEvent) {
        (**self).post_event(event)
    }
}

impl EventSink for crossbeam_channel::Sender<SensorEvent> {
    fn post_event(&self, event: SensorEvent) {
        // A full or disconnected queue loses the event; nothing to report to.
        let _ = self.try_send(event);
    }
}

/// Callback interface invoked by the platform on its delivery thread.
pub trait SampleListener: Send + Sync {
    fn on_sample(&self, sample: &RawSample);

    fn on_accuracy_changed(&self, sensor: SensorType, accuracy: i32);
}

impl<T: SampleListener + ?Sized> SampleListener for Arc<T> {
    fn on_sample(&self, sample: &RawSample) {
        (**self).on_sample(sample)
    }
    fn on_accuracy_changed(&self, sensor: SensorType, accuracy: i32) {
        (**self).on_accuracy_changed(sensor, accuracy)
    }
}

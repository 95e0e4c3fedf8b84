//! SensorBridge: per-sensor registration state, sample forwarding, and
//! pause/resume of platform delivery.
//!
//! The slot table is shared between the control thread (start/stop/
//! suspend/resume) and the platform's delivery thread (on_sample). One
//! mutex guards it; it is held briefly and never across a platform call.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, trace, warn};

use sensor_core::errors::ConfigError;
use sensor_core::{
    BridgeConfig, RawSample, SensorError, SensorRate, SensorResult, SensorSelector, SensorType,
};

use crate::health::{BridgeStatus, SensorStatus};
use crate::slots::{SlotState, SlotTable};
use crate::traits::{EventSink, SampleListener, SensorService};
use crate::translate::SampleTranslator;

struct BridgeState<H> {
    slots: SlotTable<H>,
    suspended: bool,
}

/// Forwards platform sensor samples to an event sink and manages the
/// start/stop lifecycle of each sensor type.
pub struct SensorBridge<S: SensorService, K: EventSink> {
    service: S,
    sink: K,
    config: BridgeConfig,
    translator: SampleTranslator,
    state: Mutex<BridgeState<S::Handle>>,
    /// Events handed to the sink.
    delivered: AtomicU64,
    /// Samples lost to translation failures.
    dropped: AtomicU64,
    /// Samples for sensors that were not started (or while suspended).
    ignored: AtomicU64,
}

impl<S: SensorService, K: EventSink> SensorBridge<S, K> {
    /// Create a bridge over `service`, posting events to `sink`.
    pub fn new(service: S, sink: K, config: BridgeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(service, sink, config))
    }

    /// Create a bridge with the default configuration.
    pub fn with_defaults(service: S, sink: K) -> Self {
        Self::build(service, sink, BridgeConfig::default())
    }

    fn build(service: S, sink: K, config: BridgeConfig) -> Self {
        Self {
            translator: SampleTranslator::new(&config),
            service,
            sink,
            config,
            state: Mutex::new(BridgeState {
                slots: SlotTable::new(),
                suspended: false,
            }),
            delivered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            ignored: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BridgeState<S::Handle>> {
        // Slot updates are single assignments; a panic elsewhere cannot
        // leave the table half-written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Start delivering samples for `sensor` at `rate`.
    pub fn start(&self, sensor: impl Into<SensorSelector>, rate: SensorRate) -> SensorResult<()> {
        self.start_resolved(sensor.into(), || Ok(rate))
    }

    /// Start with a caller rate code. The code is only checked once the
    /// sensor itself could be started, so sensor and slot errors win over
    /// `InvalidInterval`.
    pub fn start_with_code(
        &self,
        sensor: impl Into<SensorSelector>,
        interval: i32,
    ) -> SensorResult<()> {
        self.start_resolved(sensor.into(), || SensorRate::from_code(interval))
    }

    fn start_resolved(
        &self,
        sensor: SensorSelector,
        rate: impl FnOnce() -> SensorResult<SensorRate>,
    ) -> SensorResult<()> {
        let sensor = match sensor {
            SensorSelector::All => {
                debug!("Wildcard sensor registration is not supported");
                return Err(SensorError::not_available(SensorSelector::All));
            }
            SensorSelector::One(sensor) => sensor,
        };

        if self.config.is_disabled(sensor) {
            debug!(sensor = %sensor, "Sensor disabled by configuration");
            return Err(SensorError::not_available(sensor));
        }

        if !self.lock().slots.try_reserve(sensor) {
            debug!(sensor = %sensor, "Sensor already enabled");
            return Err(SensorError::AlreadyEnabled { sensor });
        }

        let Some(handle) = self.service.default_sensor(sensor) else {
            self.lock().slots.release(sensor);
            debug!(sensor = %sensor, "Sensor not present on this device");
            return Err(SensorError::not_available(sensor));
        };

        let rate = match rate() {
            Ok(rate) => rate,
            Err(e) => {
                self.lock().slots.release(sensor);
                debug!(sensor = %sensor, error = %e, "Rejected interval");
                return Err(e);
            }
        };

        let native = rate.to_native(self.config.effective_rate_multiplier());
        if !self.service.register(&handle, native) {
            self.lock().slots.release(sensor);
            warn!(sensor = %sensor, rate = %rate, native = %native, "Platform refused sensor registration");
            return Err(SensorError::interval_not_set(
                sensor,
                format!("platform refused rate {native}"),
            ));
        }

        let (committed, suspended) = {
            let mut state = self.lock();
            let committed = state.slots.commit(sensor, handle.clone(), rate);
            (committed, state.suspended)
        };

        if !committed {
            // The bridge was shut down while the registration was in flight.
            if let Err(e) = self.service.unregister(&handle) {
                warn!(sensor = %sensor, error = %e, "Failed to undo orphaned registration");
            }
            return Err(SensorError::interval_not_set(
                sensor,
                "bridge shut down during registration",
            ));
        }

        if suspended {
            // Keep delivery paused; resume() registers it again.
            if let Err(e) = self.service.unregister(&handle) {
                warn!(sensor = %sensor, error = %e, "Failed to pause sensor started while suspended");
            }
        }

        info!(sensor = %sensor, rate = %rate, native = %native, suspended, "Sensor started");
        Ok(())
    }

    /// Stop delivering samples for `sensor`.
    pub fn stop(&self, sensor: SensorType) -> SensorResult<()> {
        let Some((handle, _rate)) = self.lock().slots.begin_stop(sensor) else {
            debug!(sensor = %sensor, "Sensor not enabled");
            return Err(SensorError::NotEnabled { sensor });
        };

        if let Err(e) = self.service.unregister(&handle) {
            self.lock().slots.abort_stop(sensor);
            warn!(sensor = %sensor, error = %e, "Sensor unregistration failed");
            return Err(SensorError::cannot_disable(sensor, e.to_string()));
        }

        // The platform call may report success without taking effect.
        if self.service.is_registered(&handle) {
            self.lock().slots.abort_stop(sensor);
            warn!(sensor = %sensor, "Sensor still registered after unregistration");
            return Err(SensorError::cannot_disable(
                sensor,
                "platform still delivering after unregistration",
            ));
        }

        // Only this stop's own Stopping slot counts: a concurrent
        // shutdown + start may legitimately own the slot by now.
        let still_held = {
            let mut state = self.lock();
            state.slots.finish_stop(sensor);
            matches!(state.slots.state(sensor), SlotState::Stopping { .. })
        };
        if still_held {
            warn!(sensor = %sensor, "Sensor handle still bound after stop");
            return Err(SensorError::cannot_disable(sensor, "handle still bound"));
        }

        info!(sensor = %sensor, "Sensor stopped");
        Ok(())
    }

    /// Pause all platform delivery without forgetting which sensors were
    /// started or at which rate.
    pub fn suspend(&self) {
        {
            let mut state = self.lock();
            if state.suspended {
                return;
            }
            state.suspended = true;
        }
        self.service.unregister_all();
        info!("Sensor delivery suspended");
    }

    /// Re-register every sensor that was started and never stopped, at
    /// its stored rate. Failures are logged, not surfaced. Returns the
    /// number of sensors re-registered.
    pub fn resume(&self) -> usize {
        let active = {
            let mut state = self.lock();
            if !state.suspended {
                return 0;
            }
            state.suspended = false;
            state.slots.active()
        };

        let multiplier = self.config.effective_rate_multiplier();
        let mut resumed = 0;
        for (sensor, handle, rate) in active {
            if self.service.register(&handle, rate.to_native(multiplier)) {
                resumed += 1;
            } else {
                warn!(sensor = %sensor, rate = %rate, "Failed to re-register sensor on resume");
            }
        }
        info!(resumed, "Sensor delivery resumed");
        resumed
    }

    /// Unregister everything and forget every slot.
    pub fn shutdown(&self) {
        let held = {
            let mut state = self.lock();
            state.suspended = false;
            state.slots.clear()
        };
        self.service.unregister_all();
        info!(released = held.len(), "Sensor bridge shut down");
    }

    pub fn is_active(&self, sensor: SensorType) -> bool {
        self.lock().slots.is_active(sensor)
    }

    pub fn is_suspended(&self) -> bool {
        self.lock().suspended
    }

    /// Stored rate of an active sensor.
    pub fn requested_rate(&self, sensor: SensorType) -> Option<SensorRate> {
        self.lock().slots.rate(sensor)
    }

    /// Stored rate code, `-1` when the sensor is inactive.
    pub fn requested_rate_code(&self, sensor: SensorType) -> i32 {
        self.lock().slots.requested_rate_code(sensor)
    }

    /// Started sensors with their stored rates, in code order.
    pub fn active_sensors(&self) -> Vec<(SensorType, SensorRate)> {
        self.lock()
            .slots
            .active()
            .into_iter()
            .map(|(sensor, _, rate)| (sensor, rate))
            .collect()
    }

    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn ignored_count(&self) -> u64 {
        self.ignored.load(Ordering::Relaxed)
    }

    pub fn status(&self) -> BridgeStatus {
        let state = self.lock();
        let sensors = SensorType::ALL
            .iter()
            .filter_map(|sensor| match state.slots.state(*sensor) {
                SlotState::Inactive => None,
                slot => Some(SensorStatus {
                    sensor: *sensor,
                    state: slot.label(),
                    rate_code: state.slots.requested_rate_code(*sensor),
                }),
            })
            .collect();
        BridgeStatus {
            suspended: state.suspended,
            sensors,
            delivered: self.delivered_count(),
            dropped: self.dropped_count(),
            ignored: self.ignored_count(),
        }
    }

    fn accepts(&self, sensor: SensorType) -> bool {
        let state = self.lock();
        !state.suspended && state.slots.accepts_samples(sensor)
    }
}

impl<S: SensorService, K: EventSink> SampleListener for SensorBridge<S, K> {
    /// Translate and forward one sample. A sample that cannot be
    /// translated is logged and dropped; delivery of later samples is
    /// unaffected.
    fn on_sample(&self, sample: &RawSample) {
        let sensor = sample.sensor_type;
        if !self.accepts(sensor) {
            self.ignored.fetch_add(1, Ordering::Relaxed);
            trace!(sensor = %sensor, "Ignoring sample for inactive sensor");
            return;
        }

        match self.translator.translate(sample) {
            Ok(event) => {
                self.sink.post_event(event);
                self.delivered.fetch_add(1, Ordering::Relaxed);
                trace!(sensor = %sensor, "Sensor event posted");
            }
            Err(e) => {
                let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                if self.config.effective_log_dropped_samples() {
                    warn!(sensor = %sensor, error = %e, total_dropped = total, "Invalid sensor sample dropped");
                }
            }
        }
    }

    fn on_accuracy_changed(&self, sensor: SensorType, accuracy: i32) {
        debug!(sensor = %sensor, accuracy, "Sensor accuracy changed");
    }
}

impl<S: SensorService, K: EventSink> Drop for SensorBridge<S, K> {
    fn drop(&mut self) {
        let held = self.lock().slots.active().len();
        if held > 0 {
            self.service.unregister_all();
            debug!(held, "Released sensor registrations on drop");
        }
    }
}

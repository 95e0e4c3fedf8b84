//! Per-sensor-type registration state.
//!
//! A slot holds a handle and the caller's rate only while active, so
//! "handle present ⇔ rate stored" holds by construction. The transient
//! `Starting`/`Stopping` states let the bridge release the table lock
//! while it talks to the platform.

use rustc_hash::FxHashMap;
use sensor_core::constants::SENSOR_RATE_INACTIVE;
use sensor_core::{SensorRate, SensorType};

#[derive(Debug, Clone, PartialEq)]
pub enum SlotState<H> {
    Inactive,
    /// Reserved by an in-flight `start`.
    Starting,
    Active { handle: H, rate: SensorRate },
    /// An in-flight `stop` is unregistering this handle.
    Stopping { handle: H, rate: SensorRate },
}

impl<H> SlotState<H> {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Starting => "starting",
            Self::Active { .. } => "active",
            Self::Stopping { .. } => "stopping",
        }
    }
}

/// One slot per concrete sensor type.
#[derive(Debug)]
pub struct SlotTable<H> {
    slots: FxHashMap<SensorType, SlotState<H>>,
}

impl<H: Clone> SlotTable<H> {
    pub fn new() -> Self {
        let slots = SensorType::ALL
            .iter()
            .map(|sensor| (*sensor, SlotState::Inactive))
            .collect();
        Self { slots }
    }

    pub fn state(&self, sensor: SensorType) -> &SlotState<H> {
        self.slots.get(&sensor).unwrap_or(&SlotState::Inactive)
    }

    fn set(&mut self, sensor: SensorType, state: SlotState<H>) {
        self.slots.insert(sensor, state);
    }

    /// Inactive → Starting. Any other state means the sensor is taken.
    pub fn try_reserve(&mut self, sensor: SensorType) -> bool {
        if matches!(self.state(sensor), SlotState::Inactive) {
            self.set(sensor, SlotState::Starting);
            true
        } else {
            false
        }
    }

    /// Starting → Active. Returns `false` if the reservation was dropped
    /// (e.g. by `clear`) while the platform call was in flight.
    pub fn commit(&mut self, sensor: SensorType, handle: H, rate: SensorRate) -> bool {
        if matches!(self.state(sensor), SlotState::Starting) {
            self.set(sensor, SlotState::Active { handle, rate });
            true
        } else {
            false
        }
    }

    /// Starting → Inactive.
    pub fn release(&mut self, sensor: SensorType) {
        if matches!(self.state(sensor), SlotState::Starting) {
            self.set(sensor, SlotState::Inactive);
        }
    }

    /// Active → Stopping, handing out the handle to unregister.
    pub fn begin_stop(&mut self, sensor: SensorType) -> Option<(H, SensorRate)> {
        match self.state(sensor) {
            SlotState::Active { handle, rate } => {
                let (handle, rate) = (handle.clone(), *rate);
                self.set(
                    sensor,
                    SlotState::Stopping {
                        handle: handle.clone(),
                        rate,
                    },
                );
                Some((handle, rate))
            }
            _ => None,
        }
    }

    /// Stopping → Inactive.
    pub fn finish_stop(&mut self, sensor: SensorType) {
        if matches!(self.state(sensor), SlotState::Stopping { .. }) {
            self.set(sensor, SlotState::Inactive);
        }
    }

    /// Stopping → Active, after a failed unregistration.
    pub fn abort_stop(&mut self, sensor: SensorType) {
        if let SlotState::Stopping { handle, rate } = self.state(sensor) {
            let state = SlotState::Active {
                handle: handle.clone(),
                rate: *rate,
            };
            self.set(sensor, state);
        }
    }

    pub fn handle(&self, sensor: SensorType) -> Option<&H> {
        match self.state(sensor) {
            SlotState::Active { handle, .. } | SlotState::Stopping { handle, .. } => Some(handle),
            _ => None,
        }
    }

    pub fn rate(&self, sensor: SensorType) -> Option<SensorRate> {
        match self.state(sensor) {
            SlotState::Active { rate, .. } | SlotState::Stopping { rate, .. } => Some(*rate),
            _ => None,
        }
    }

    /// Caller's original rate code, or `-1` when inactive.
    pub fn requested_rate_code(&self, sensor: SensorType) -> i32 {
        self.rate(sensor)
            .map_or(SENSOR_RATE_INACTIVE, SensorRate::code)
    }

    pub fn is_active(&self, sensor: SensorType) -> bool {
        matches!(self.state(sensor), SlotState::Active { .. })
    }

    /// Whether samples for `sensor` should be forwarded.
    pub fn accepts_samples(&self, sensor: SensorType) -> bool {
        matches!(
            self.state(sensor),
            SlotState::Starting | SlotState::Active { .. }
        )
    }

    /// Active slots in sensor code order.
    pub fn active(&self) -> Vec<(SensorType, H, SensorRate)> {
        SensorType::ALL
            .iter()
            .filter_map(|sensor| match self.state(*sensor) {
                SlotState::Active { handle, rate } => Some((*sensor, handle.clone(), *rate)),
                _ => None,
            })
            .collect()
    }

    /// Reset every slot to inactive, returning the handles that were held.
    pub fn clear(&mut self) -> Vec<(SensorType, H)> {
        let mut held = Vec::new();
        for sensor in SensorType::ALL {
            if let Some(handle) = self.handle(sensor) {
                held.push((sensor, handle.clone()));
            }
            self.set(sensor, SlotState::Inactive);
        }
        held
    }
}

impl<H: Clone> Default for SlotTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

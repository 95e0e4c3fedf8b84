//! In-memory test doubles for `SensorService` and `EventSink`.
//!
//! Used by bridge tests and by host bindings that want to exercise the
//! bridge without a device.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use rustc_hash::{FxHashMap, FxHashSet};
use sensor_core::{NativeRate, SensorEvent, SensorType};

use crate::traits::{EventSink, PlatformError, SensorService};

/// Handle returned by [`StubSensorService`]. Every lookup yields a fresh
/// `id`, so a registration made after a restart is distinguishable from
/// the one it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StubHandle {
    pub sensor: SensorType,
    pub id: u64,
}

/// One-shot callback run from inside a platform call.
pub type StubHook = Box<dyn FnOnce() + Send>;

/// Stub platform sensor service.
///
/// Every sensor type is present by default. Use the `set_*` methods to
/// make registration or unregistration misbehave.
pub struct StubSensorService {
    present: Mutex<FxHashSet<SensorType>>,
    registered: Mutex<FxHashMap<SensorType, (u64, NativeRate)>>,
    register_calls: Mutex<Vec<(SensorType, NativeRate)>>,
    unregister_all_calls: AtomicUsize,
    refuse_registration: AtomicBool,
    fail_unregister: AtomicBool,
    sticky_unregister: AtomicBool,
    next_id: AtomicU64,
    register_hook: Mutex<Option<StubHook>>,
    unregister_hook: Mutex<Option<StubHook>>,
}

impl StubSensorService {
    pub fn new() -> Self {
        Self::with_sensors(&SensorType::ALL)
    }

    /// A device carrying only `sensors`.
    pub fn with_sensors(sensors: &[SensorType]) -> Self {
        Self {
            present: Mutex::new(sensors.iter().copied().collect()),
            registered: Mutex::new(FxHashMap::default()),
            register_calls: Mutex::new(Vec::new()),
            unregister_all_calls: AtomicUsize::new(0),
            refuse_registration: AtomicBool::new(false),
            fail_unregister: AtomicBool::new(false),
            sticky_unregister: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
            register_hook: Mutex::new(None),
            unregister_hook: Mutex::new(None),
        }
    }

    pub fn remove_sensor(&self, sensor: SensorType) {
        self.present.lock().unwrap().remove(&sensor);
    }

    /// `register` returns `false` while set.
    pub fn set_refuse_registration(&self, refuse: bool) {
        self.refuse_registration.store(refuse, Ordering::SeqCst);
    }

    /// `unregister` returns an error while set.
    pub fn set_fail_unregister(&self, fail: bool) {
        self.fail_unregister.store(fail, Ordering::SeqCst);
    }

    /// `unregister` reports success but leaves the handle registered.
    pub fn set_sticky_unregister(&self, sticky: bool) {
        self.sticky_unregister.store(sticky, Ordering::SeqCst);
    }

    /// Run `hook` once, after the next successful `register` has taken
    /// effect. No stub lock is held while it runs.
    pub fn set_register_hook(&self, hook: impl FnOnce() + Send + 'static) {
        *self.register_hook.lock().unwrap() = Some(Box::new(hook));
    }

    /// Run `hook` once, after the next successful `unregister` has taken
    /// effect. No stub lock is held while it runs.
    pub fn set_unregister_hook(&self, hook: impl FnOnce() + Send + 'static) {
        *self.unregister_hook.lock().unwrap() = Some(Box::new(hook));
    }

    fn run_hook(slot: &Mutex<Option<StubHook>>) {
        let hook = slot.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
    }

    /// Sensors currently delivering, with their native rates.
    pub fn registered(&self) -> FxHashMap<SensorType, NativeRate> {
        self.registered
            .lock()
            .unwrap()
            .iter()
            .map(|(sensor, (_, rate))| (*sensor, *rate))
            .collect()
    }

    pub fn registered_sensors(&self) -> Vec<SensorType> {
        let mut sensors: Vec<SensorType> = self.registered.lock().unwrap().keys().copied().collect();
        sensors.sort();
        sensors
    }

    pub fn native_rate(&self, sensor: SensorType) -> Option<NativeRate> {
        self.registered.lock().unwrap().get(&sensor).map(|(_, rate)| *rate)
    }

    /// Every successful `register` call, in order.
    pub fn register_calls(&self) -> Vec<(SensorType, NativeRate)> {
        self.register_calls.lock().unwrap().clone()
    }

    pub fn unregister_all_calls(&self) -> usize {
        self.unregister_all_calls.load(Ordering::SeqCst)
    }
}

impl Default for StubSensorService {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorService for StubSensorService {
    type Handle = StubHandle;

    fn default_sensor(&self, sensor: SensorType) -> Option<StubHandle> {
        self.present
            .lock()
            .unwrap()
            .contains(&sensor)
            .then(|| StubHandle {
                sensor,
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
            })
    }

    fn register(&self, handle: &StubHandle, rate: NativeRate) -> bool {
        if self.refuse_registration.load(Ordering::SeqCst) {
            return false;
        }
        self.registered.lock().unwrap().insert(handle.sensor, (handle.id, rate));
        self.register_calls.lock().unwrap().push((handle.sensor, rate));
        Self::run_hook(&self.register_hook);
        true
    }

    fn unregister(&self, handle: &StubHandle) -> Result<(), PlatformError> {
        if self.fail_unregister.load(Ordering::SeqCst) {
            return Err(PlatformError::new("unregister", "listener not bound"));
        }
        if !self.sticky_unregister.load(Ordering::SeqCst) {
            let mut registered = self.registered.lock().unwrap();
            if registered.get(&handle.sensor).is_some_and(|(id, _)| *id == handle.id) {
                registered.remove(&handle.sensor);
            }
        }
        Self::run_hook(&self.unregister_hook);
        Ok(())
    }

    fn unregister_all(&self) {
        self.unregister_all_calls.fetch_add(1, Ordering::SeqCst);
        self.registered.lock().unwrap().clear();
    }

    fn is_registered(&self, handle: &StubHandle) -> bool {
        self.registered
            .lock()
            .unwrap()
            .get(&handle.sensor)
            .is_some_and(|(id, _)| *id == handle.id)
    }
}

/// Event sink that keeps every posted event.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SensorEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SensorEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl EventSink for RecordingSink {
    fn post_event(&self, event: SensorEvent) {
        self.events.lock().unwrap().push(event);
    }
}

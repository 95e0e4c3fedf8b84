//! Start/stop/suspend/resume lifecycle of the sensor bridge.

use std::sync::{Arc, Weak};

use sensor_bridge::testing::{RecordingSink, StubSensorService};
use sensor_bridge::{NativeDelay, NativeRate, SensorBridge, SensorError, SensorRate, SensorType};

type TestBridge = SensorBridge<Arc<StubSensorService>, Arc<RecordingSink>>;

fn setup(service: StubSensorService) -> (TestBridge, Arc<StubSensorService>) {
    let service = Arc::new(service);
    let bridge = SensorBridge::with_defaults(Arc::clone(&service), Arc::new(RecordingSink::new()));
    (bridge, service)
}

fn ms(code: i32) -> SensorRate {
    SensorRate::from_code(code).unwrap()
}

#[test]
fn missing_sensor_is_not_available_and_stays_inactive() {
    let (bridge, service) = setup(StubSensorService::with_sensors(&[SensorType::Accelerometer]));

    for rate in [SensorRate::Fastest, SensorRate::Game, SensorRate::Normal, SensorRate::Ui, ms(50)] {
        let err = bridge.start(SensorType::Gyroscope, rate).unwrap_err();
        assert!(matches!(err, SensorError::NotAvailable { .. }), "{rate}: {err}");
        assert!(!bridge.is_active(SensorType::Gyroscope));
        assert_eq!(
            bridge.stop(SensorType::Gyroscope),
            Err(SensorError::NotEnabled {
                sensor: SensorType::Gyroscope
            })
        );
    }
    assert!(service.register_calls().is_empty());
}

#[test]
fn double_start_is_rejected_and_keeps_original_rate() {
    let (bridge, service) = setup(StubSensorService::new());

    bridge.start(SensorType::Accelerometer, ms(20)).unwrap();
    let err = bridge.start(SensorType::Accelerometer, SensorRate::Fastest).unwrap_err();
    assert_eq!(
        err,
        SensorError::AlreadyEnabled {
            sensor: SensorType::Accelerometer
        }
    );

    assert_eq!(bridge.requested_rate_code(SensorType::Accelerometer), 20);
    assert_eq!(service.native_rate(SensorType::Accelerometer), Some(NativeRate::Micros(20_000)));
    assert_eq!(service.register_calls().len(), 1);
}

#[test]
fn stop_without_start_is_not_enabled() {
    let (bridge, _service) = setup(StubSensorService::new());
    for sensor in SensorType::ALL {
        assert_eq!(bridge.stop(sensor), Err(SensorError::NotEnabled { sensor }));
    }
}

#[test]
fn start_stop_start_succeeds() {
    let (bridge, service) = setup(StubSensorService::new());

    assert_eq!(bridge.start(SensorType::Orientation, SensorRate::Ui), Ok(()));
    assert_eq!(bridge.stop(SensorType::Orientation), Ok(()));
    assert!(service.registered_sensors().is_empty());
    assert_eq!(bridge.requested_rate_code(SensorType::Orientation), -1);

    assert_eq!(bridge.start(SensorType::Orientation, SensorRate::Ui), Ok(()));
    assert_eq!(
        service.native_rate(SensorType::Orientation),
        Some(NativeRate::Preset(NativeDelay::Ui))
    );
}

#[test]
fn refused_registration_is_interval_not_set() {
    let (bridge, service) = setup(StubSensorService::new());
    service.set_refuse_registration(true);

    let err = bridge.start(SensorType::Pressure, ms(100)).unwrap_err();
    assert!(matches!(err, SensorError::IntervalNotSet { sensor: SensorType::Pressure, .. }));
    assert!(!bridge.is_active(SensorType::Pressure));

    service.set_refuse_registration(false);
    assert_eq!(bridge.start(SensorType::Pressure, ms(100)), Ok(()));
}

#[test]
fn failed_unregistration_is_cannot_disable_and_slot_stays_active() {
    let (bridge, service) = setup(StubSensorService::new());
    bridge.start(SensorType::Light, SensorRate::Normal).unwrap();

    service.set_fail_unregister(true);
    let err = bridge.stop(SensorType::Light).unwrap_err();
    assert!(matches!(err, SensorError::CannotDisable { .. }));
    assert!(bridge.is_active(SensorType::Light));

    service.set_fail_unregister(false);
    assert_eq!(bridge.stop(SensorType::Light), Ok(()));
}

#[test]
fn unregistration_that_does_not_take_effect_is_cannot_disable() {
    let (bridge, service) = setup(StubSensorService::new());
    bridge.start(SensorType::Temperature, SensorRate::Normal).unwrap();

    service.set_sticky_unregister(true);
    let err = bridge.stop(SensorType::Temperature).unwrap_err();
    assert!(matches!(err, SensorError::CannotDisable { .. }));
    assert!(bridge.is_active(SensorType::Temperature));
    assert_eq!(service.registered_sensors(), vec![SensorType::Temperature]);

    service.set_sticky_unregister(false);
    assert_eq!(bridge.stop(SensorType::Temperature), Ok(()));
    assert!(!bridge.is_active(SensorType::Temperature));
}

#[test]
fn suspend_resume_restores_exactly_the_active_set() {
    let (bridge, service) = setup(StubSensorService::new());
    bridge.start(SensorType::Accelerometer, SensorRate::Game).unwrap();
    bridge.start(SensorType::Gyroscope, ms(5)).unwrap();
    bridge.start(SensorType::Light, SensorRate::Ui).unwrap();
    bridge.stop(SensorType::Light).unwrap();
    let before = service.registered();

    bridge.suspend();
    assert!(bridge.is_suspended());
    assert!(service.registered_sensors().is_empty());
    // Soft pause: slots keep their handles and rates.
    assert!(bridge.is_active(SensorType::Accelerometer));
    assert_eq!(bridge.requested_rate_code(SensorType::Gyroscope), 5);

    assert_eq!(bridge.resume(), 2);
    assert!(!bridge.is_suspended());
    assert_eq!(service.registered(), before);
    assert_eq!(service.native_rate(SensorType::Gyroscope), Some(NativeRate::Micros(5000)));
    assert_eq!(
        bridge.active_sensors(),
        vec![
            (SensorType::Accelerometer, SensorRate::Game),
            (SensorType::Gyroscope, ms(5)),
        ]
    );
}

#[test]
fn suspend_is_idempotent_and_resume_without_suspend_is_a_no_op() {
    let (bridge, service) = setup(StubSensorService::new());
    bridge.start(SensorType::Gravity, SensorRate::Normal).unwrap();

    assert_eq!(bridge.resume(), 0);
    assert_eq!(service.register_calls().len(), 1);

    bridge.suspend();
    bridge.suspend();
    assert_eq!(service.unregister_all_calls(), 1);
}

#[test]
fn resume_failures_are_not_surfaced() {
    let (bridge, service) = setup(StubSensorService::new());
    bridge.start(SensorType::Proximity, SensorRate::Normal).unwrap();
    bridge.suspend();

    service.set_refuse_registration(true);
    assert_eq!(bridge.resume(), 0);
    // The slot is still owned by the caller; stop works as usual.
    assert!(bridge.is_active(SensorType::Proximity));
    assert_eq!(bridge.stop(SensorType::Proximity), Ok(()));
}

#[test]
fn start_while_suspended_waits_for_resume() {
    let (bridge, service) = setup(StubSensorService::new());
    bridge.suspend();

    assert_eq!(bridge.start(SensorType::MagneticField, ms(10)), Ok(()));
    assert!(service.registered_sensors().is_empty());

    assert_eq!(bridge.resume(), 1);
    assert_eq!(service.registered_sensors(), vec![SensorType::MagneticField]);
}

#[test]
fn stop_during_suspend_is_not_restored() {
    let (bridge, service) = setup(StubSensorService::new());
    bridge.start(SensorType::Accelerometer, SensorRate::Fastest).unwrap();
    bridge.start(SensorType::LinearAcceleration, SensorRate::Fastest).unwrap();
    bridge.suspend();
    bridge.stop(SensorType::Accelerometer).unwrap();

    assert_eq!(bridge.resume(), 1);
    assert_eq!(service.registered_sensors(), vec![SensorType::LinearAcceleration]);
}

#[test]
fn shutdown_clears_every_slot() {
    let (bridge, service) = setup(StubSensorService::new());
    bridge.start(SensorType::Accelerometer, SensorRate::Normal).unwrap();
    bridge.start(SensorType::Gyroscope, SensorRate::Normal).unwrap();

    bridge.shutdown();
    assert!(bridge.active_sensors().is_empty());
    assert!(service.registered_sensors().is_empty());
    assert_eq!(bridge.stop(SensorType::Gyroscope), Err(SensorError::NotEnabled { sensor: SensorType::Gyroscope }));
}

fn shared(service: StubSensorService) -> (Arc<TestBridge>, Arc<StubSensorService>) {
    let (bridge, service) = setup(service);
    (Arc::new(bridge), service)
}

#[test]
fn start_racing_shutdown_undoes_its_registration() {
    let (bridge, service) = shared(StubSensorService::new());
    let weak: Weak<TestBridge> = Arc::downgrade(&bridge);
    service.set_register_hook(move || {
        if let Some(bridge) = weak.upgrade() {
            bridge.shutdown();
        }
    });

    let err = bridge.start(SensorType::Gyroscope, SensorRate::Game).unwrap_err();
    assert!(matches!(err, SensorError::IntervalNotSet { sensor: SensorType::Gyroscope, .. }));
    assert!(!bridge.is_active(SensorType::Gyroscope));
    assert!(service.registered_sensors().is_empty());

    // The slot is usable again once the race is over.
    assert_eq!(bridge.start(SensorType::Gyroscope, SensorRate::Game), Ok(()));
    assert_eq!(service.registered_sensors(), vec![SensorType::Gyroscope]);
}

#[test]
fn stop_racing_shutdown_and_restart_still_succeeds() {
    let (bridge, service) = shared(StubSensorService::new());
    bridge.start(SensorType::Accelerometer, SensorRate::Normal).unwrap();

    let weak: Weak<TestBridge> = Arc::downgrade(&bridge);
    service.set_unregister_hook(move || {
        if let Some(bridge) = weak.upgrade() {
            bridge.shutdown();
            bridge.start(SensorType::Accelerometer, SensorRate::Ui).unwrap();
        }
    });

    assert_eq!(bridge.stop(SensorType::Accelerometer), Ok(()));
    // The restart owns the slot now, at its own rate.
    assert!(bridge.is_active(SensorType::Accelerometer));
    assert_eq!(bridge.requested_rate(SensorType::Accelerometer), Some(SensorRate::Ui));
    assert_eq!(
        service.native_rate(SensorType::Accelerometer),
        Some(NativeRate::Preset(NativeDelay::Ui))
    );
}

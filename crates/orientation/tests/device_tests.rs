mod common;

use common::{
    build_device, level_south_sample, long_press, run, short_press, MemoryStore,
    MockSensor, SensorError, TestDevice,
};
use orientation::{
    Axes, BiasOffsets, CalibrationReport, CalibrationSelection,
    CalibrationState, FailureKind, Frame, Step, RESULT_DWELL_MS,
};

fn south_device() -> TestDevice {
    build_device(
        MockSensor::constant(level_south_sample()),
        MemoryStore::default(),
    )
}

#[futures_test::test]
async fn startup_restores_stored_offsets() {
    let stored = BiasOffsets::new(
        Axes::new(0.1, -0.2, 0.3),
        Axes::new(-12.0, 4.5, 20.0),
    );
    let store = MemoryStore { stored: Some(stored), ..MemoryStore::default() };
    let mut device = build_device(MockSensor::default(), store);

    assert_eq!(device.load_offsets().await, stored);
    assert_eq!(device.offsets(), &stored);
}

#[futures_test::test]
async fn startup_falls_back_to_zero() {
    let mut device =
        build_device(MockSensor::default(), MemoryStore::default());
    assert_eq!(device.load_offsets().await, BiasOffsets::ZERO);

    let store = MemoryStore { fail_load: true, ..MemoryStore::default() };
    let mut device = build_device(MockSensor::default(), store);
    assert_eq!(device.load_offsets().await, BiasOffsets::ZERO);
}

#[futures_test::test]
async fn measuring_drives_display_and_indicators() {
    let mut device = south_device();
    device.load_offsets().await;

    let first = device.step(0).await;
    let Step::Measured(first) = first else {
        panic!("expected a measurement, got {first:?}");
    };
    assert!(!device.indicators().on_heading);
    assert_eq!(device.delay().ms, vec![100]);

    let steps = run(&mut device, false, 10, 3000).await;
    assert!(steps.iter().all(|s| matches!(s, Step::Measured(_))));

    let current = device.estimator().current();
    assert!(current.pitch.abs() < 0.5);
    assert!((current.heading - 180.0).abs() < 1.0);
    assert!(device.indicators().level);
    assert!(device.indicators().on_heading);
    assert_eq!(device.presenter().last(), Some(&Frame::measurement(&current)));
    assert!(current.heading > first.heading);
}

#[futures_test::test]
async fn sensor_failure_skips_iteration() {
    let mut sensor = MockSensor::constant(level_south_sample());
    sensor.queue.push_back(Err(SensorError::NoSample));
    let mut device = build_device(sensor, MemoryStore::default());

    assert_eq!(device.step(0).await, Step::SensorSkipped);
    assert_eq!(device.estimator().cursor(), 0);
    assert!(device.presenter().frames.is_empty());
    assert_eq!(device.delay().ms, vec![100]);

    assert!(matches!(device.step(100).await, Step::Measured(_)));
    assert_eq!(device.estimator().cursor(), 1);
}

#[futures_test::test]
async fn hold_suppresses_measurement_until_long_press() {
    let mut device = south_device();

    // Not debounced yet, still measuring.
    let steps = run(&mut device, true, 0, 50).await;
    assert!(steps.iter().all(|s| matches!(s, Step::Measured(_))));
    assert!(device.indicators().level);

    let reads = device.sensor_mut().reads;
    let frames = device.presenter().frames.len();

    let steps = run(&mut device, true, 50, 1050).await;
    assert!(steps.iter().all(|s| *s == Step::HoldPending));
    assert_eq!(device.sensor_mut().reads, reads);
    assert_eq!(device.presenter().frames.len(), frames);
    assert_eq!(device.delay().ms.last(), Some(&10));

    let step = device.step(1050).await;
    assert_eq!(step, Step::Selecting(CalibrationSelection::Level));
    assert!(!device.indicators().level);
    assert!(!device.indicators().on_heading);
    assert_eq!(
        device.presenter().last(),
        Some(&Frame::selection(CalibrationSelection::Level))
    );
}

#[futures_test::test]
async fn menu_is_drawn_on_change_only() {
    let mut device = south_device();
    let (now, step) = long_press(&mut device, 0).await;
    assert_eq!(step, Step::Selecting(CalibrationSelection::Level));

    let frames = device.presenter().frames.len();
    let steps = run(&mut device, false, now, now + 500).await;
    assert!(steps
        .iter()
        .all(|s| *s == Step::Selecting(CalibrationSelection::Level)));
    assert_eq!(device.presenter().frames.len(), frames);

    let (_, step) = short_press(&mut device, now + 500).await;
    assert_eq!(step, Step::Selecting(CalibrationSelection::Compass));
    assert_eq!(device.presenter().frames.len(), frames + 1);
    assert_eq!(
        device.presenter().last(),
        Some(&Frame::selection(CalibrationSelection::Compass))
    );
}

#[futures_test::test]
async fn full_compass_session() {
    let sample = level_south_sample();
    let mut device =
        build_device(MockSensor::constant(sample), MemoryStore::default());
    device.load_offsets().await;

    let (now, _) = long_press(&mut device, 0).await;
    let (now, step) = short_press(&mut device, now).await;
    assert_eq!(step, Step::Selecting(CalibrationSelection::Compass));

    let (now, step) = long_press(&mut device, now).await;
    let expected = CalibrationReport {
        selection: CalibrationSelection::Compass,
        offsets: Axes::new(20.0, 0.0, 40.0),
    };
    assert_eq!(step, Step::Calibrated(expected));
    assert_eq!(device.offsets().mag, expected.offsets);
    assert_eq!(device.offsets().accel, Axes::ZERO);
    assert_eq!(device.store().stored, Some(*device.offsets()));
    assert!(device.delay().ms.contains(&RESULT_DWELL_MS));

    let frames = &device.presenter().frames;
    let shown = frames
        .iter()
        .position(|f| *f == Frame::offsets(&expected.offsets))
        .expect("offsets were shown");
    assert_eq!(
        frames[shown - 1],
        Frame::instructions(CalibrationSelection::Compass)
    );
    assert_eq!(
        frames.last(),
        Some(&Frame::selection(CalibrationSelection::Compass))
    );

    // There is no way back to measuring without a reset.
    let (_, step) = short_press(&mut device, now).await;
    assert_eq!(step, Step::Selecting(CalibrationSelection::Level));
    assert_eq!(
        device.state(),
        CalibrationState::Selecting(CalibrationSelection::Level)
    );
}

#[futures_test::test]
async fn failed_save_is_reported_and_ignored() {
    let store = MemoryStore { fail_save: true, ..MemoryStore::default() };
    let sensor = MockSensor::constant(level_south_sample());
    let mut device = build_device(sensor, store);
    device.load_offsets().await;

    let (now, _) = long_press(&mut device, 0).await;
    let (_, step) = long_press(&mut device, now).await;

    assert_eq!(step, Step::CalibrationFailed(FailureKind::Persistence));
    assert_eq!(device.offsets(), &BiasOffsets::ZERO);
    assert_eq!(device.store().stored, None);
    assert!(device.presenter().frames.contains(&Frame::save_failed()));
    assert_eq!(
        device.state(),
        CalibrationState::Selecting(CalibrationSelection::Level)
    );
}

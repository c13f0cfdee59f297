#![allow(dead_code)]

use std::collections::VecDeque;

use embedded_hal_async::delay::DelayNs;
use orientation::{
    Axes, BiasOffsets, DeviceConfig, DisplayPresenter, Frame, Indicators,
    LevelCompass, OffsetStore, RawButton, RawSample, SensorSource, Step,
};

// ---------------------------------------------------------------------------
// Mock capabilities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    NoSample,
}

/// Replays queued results, then keeps returning `fallback`.
#[derive(Default)]
pub struct MockSensor {
    pub queue: VecDeque<Result<RawSample, SensorError>>,
    pub fallback: Option<RawSample>,
    pub reads: usize,
}

impl MockSensor {
    pub fn constant(sample: RawSample) -> Self {
        Self { fallback: Some(sample), ..Self::default() }
    }
}

impl SensorSource for MockSensor {
    type Error = SensorError;

    async fn read_sample(&mut self) -> Result<RawSample, SensorError> {
        self.reads += 1;
        match self.queue.pop_front() {
            Some(result) => result,
            None => self.fallback.ok_or(SensorError::NoSample),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFailure {
    Read,
    Write,
}

#[derive(Default)]
pub struct MemoryStore {
    pub stored: Option<BiasOffsets>,
    pub fail_load: bool,
    pub fail_save: bool,
    pub saves: usize,
}

impl OffsetStore for MemoryStore {
    type Error = StoreFailure;

    async fn load_offsets(
        &mut self,
    ) -> Result<Option<BiasOffsets>, StoreFailure> {
        if self.fail_load {
            return Err(StoreFailure::Read);
        }
        Ok(self.stored)
    }

    async fn save_offsets(
        &mut self,
        offsets: &BiasOffsets,
    ) -> Result<(), StoreFailure> {
        self.saves += 1;
        if self.fail_save {
            return Err(StoreFailure::Write);
        }
        self.stored = Some(*offsets);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub frames: Vec<Frame>,
}

impl RecordingPresenter {
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl DisplayPresenter for RecordingPresenter {
    type Error = ();

    async fn present(&mut self, frame: &Frame) -> Result<(), ()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingIndicators {
    pub level: bool,
    pub on_heading: bool,
}

impl Indicators for RecordingIndicators {
    fn set_level(&mut self, on: bool) {
        self.level = on;
    }

    fn set_on_heading(&mut self, on: bool) {
        self.on_heading = on;
    }
}

#[derive(Default)]
pub struct MockButton {
    pub pressed: bool,
}

impl RawButton for MockButton {
    fn is_pressed(&mut self) -> bool {
        self.pressed
    }
}

/// Records requested delays without waiting.
#[derive(Default)]
pub struct RecordingDelay {
    pub ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.ms.push(ms);
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub type TestDevice = LevelCompass<
    MockSensor,
    MemoryStore,
    RecordingPresenter,
    RecordingIndicators,
    MockButton,
    RecordingDelay,
>;

/// Level device pointing magnetic south.
pub fn level_south_sample() -> RawSample {
    RawSample::new(Axes::new(0.0, 0.0, 9.81), Axes::new(-20.0, 0.0, -40.0))
}

pub fn build_device(sensor: MockSensor, store: MemoryStore) -> TestDevice {
    LevelCompass::new(
        sensor,
        store,
        RecordingPresenter::default(),
        RecordingIndicators::default(),
        MockButton::default(),
        RecordingDelay::default(),
        DeviceConfig::default(),
    )
}

/// Steps every 10 ms in `[start, end)` with the button held at `pressed`.
pub async fn run(
    device: &mut TestDevice,
    pressed: bool,
    start: u64,
    end: u64,
) -> Vec<Step> {
    device.button_mut().pressed = pressed;
    let mut steps = Vec::new();
    let mut now = start;
    while now < end {
        steps.push(device.step(now).await);
        now += 10;
    }
    steps
}

/// Holds the button long enough for a long press. Returns the end time.
pub async fn long_press(device: &mut TestDevice, start: u64) -> (u64, Step) {
    let end = start + 1060;
    let steps = run(device, true, start, end).await;
    let release = run(device, false, end, end + 60).await;
    assert!(release.iter().all(|s| !matches!(s, Step::Calibrated(_))));
    (end + 60, *steps.last().unwrap())
}

/// Press and release well under the long-press threshold. Returns the end
/// time and the last step.
pub async fn short_press(device: &mut TestDevice, start: u64) -> (u64, Step) {
    run(device, true, start, start + 100).await;
    let steps = run(device, false, start + 100, start + 160).await;
    (start + 160, *steps.last().unwrap())
}

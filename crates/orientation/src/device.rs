use embedded_hal_async::delay::DelayNs;

use crate::capabilities::{DisplayPresenter, Indicators, OffsetStore, SensorSource};
use crate::config::DeviceConfig;
use crate::display::Frame;
use crate::error::FailureKind;
use crate::estimator::OrientationEstimator;
use crate::gesture::{DebouncedButton, GestureDetector, RawButton};
use crate::machine::{
    present, CalibrationReport, CalibrationSelection, CalibrationState,
    CalibrationStateMachine, Mode,
};
use crate::types::{BiasOffsets, Orientation};

/// Outcome of one [`LevelCompass::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Measured(Orientation),
    /// The sensor had no sample; the smoothed values are unchanged.
    SensorSkipped,
    /// A press is being timed, nothing was measured or drawn.
    HoldPending,
    Selecting(CalibrationSelection),
    Calibrated(CalibrationReport),
    CalibrationFailed(FailureKind),
}

impl Step {
    /// Delay that follows this step.
    pub fn period_ms(&self, config: &DeviceConfig) -> u32 {
        match self {
            Self::Measured(_) | Self::SensorSkipped => config.measure_period_ms,
            _ => config.poll_period_ms,
        }
    }
}

/// The whole instrument: one call to [`step`](Self::step) is one control
/// loop iteration.
pub struct LevelCompass<S, O, P, L, B, D> {
    sensor: S,
    store: O,
    presenter: P,
    indicators: L,
    button: DebouncedButton<B>,
    gestures: GestureDetector,
    machine: CalibrationStateMachine,
    estimator: OrientationEstimator,
    offsets: BiasOffsets,
    config: DeviceConfig,
    delay: D,
    /// Menu selection currently on screen.
    shown: Option<CalibrationSelection>,
}

impl<S, O, P, L, B, D> LevelCompass<S, O, P, L, B, D>
where
    S: SensorSource,
    O: OffsetStore,
    P: DisplayPresenter,
    L: Indicators,
    B: RawButton,
    D: DelayNs,
{
    pub fn new(
        sensor: S,
        store: O,
        presenter: P,
        indicators: L,
        button: B,
        delay: D,
        config: DeviceConfig,
    ) -> Self {
        Self {
            sensor,
            store,
            presenter,
            indicators,
            button: DebouncedButton::new(button),
            gestures: GestureDetector::new(),
            machine: CalibrationStateMachine::new(),
            estimator: OrientationEstimator::new(config.estimator),
            offsets: BiasOffsets::ZERO,
            config,
            delay,
            shown: None,
        }
    }

    /// Restores offsets from the store, falling back to zero.
    pub async fn load_offsets(&mut self) -> BiasOffsets {
        self.offsets = match self.store.load_offsets().await {
            Ok(Some(offsets)) => {
                info!("restored calibration offsets");
                offsets
            }
            Ok(None) => {
                info!("no stored offsets, using zero");
                BiasOffsets::ZERO
            }
            Err(_) => {
                warn!("failed to read stored offsets, using zero");
                BiasOffsets::ZERO
            }
        };
        self.offsets
    }

    /// Runs one loop iteration at wall-clock time `now_ms`, including the
    /// trailing loop delay.
    pub async fn step(&mut self, now_ms: u64) -> Step {
        self.button.update(now_ms);
        let gesture = self.gestures.poll(&self.button, now_ms);

        let previous = self.machine.mode();
        self.machine.handle_gesture(gesture);
        if previous == Mode::Measuring && self.machine.mode() == Mode::Calibrating
        {
            self.indicators.set_level(false);
            self.indicators.set_on_heading(false);
            self.shown = None;
        }

        let step = match self.machine.state() {
            CalibrationState::Measuring if self.gestures.is_holding() => {
                Step::HoldPending
            }
            CalibrationState::Measuring => self.measure().await,
            CalibrationState::Selecting(selection) => {
                if self.shown != Some(selection)
                    && present(&mut self.presenter, &Frame::selection(selection))
                        .await
                {
                    self.shown = Some(selection);
                }
                Step::Selecting(selection)
            }
            CalibrationState::Running(_) => self.calibrate().await,
        };

        self.delay.delay_ms(step.period_ms(&self.config)).await;
        step
    }

    async fn measure(&mut self) -> Step {
        let sample = match self.sensor.read_sample().await {
            Ok(sample) => sample,
            Err(_) => {
                debug!("no fresh sample, skipping");
                return Step::SensorSkipped;
            }
        };

        let orientation = self.estimator.estimate(&sample, &self.offsets);
        let indicators = &self.config.indicators;
        self.indicators.set_level(indicators.is_level(&orientation));
        self.indicators
            .set_on_heading(indicators.is_on_heading(&orientation));
        present(&mut self.presenter, &Frame::measurement(&orientation)).await;

        Step::Measured(orientation)
    }

    async fn calibrate(&mut self) -> Step {
        let result = self
            .machine
            .run_calibration(
                &mut self.sensor,
                &mut self.store,
                &mut self.presenter,
                &mut self.delay,
                &mut self.offsets,
            )
            .await;
        // The result screen replaced the menu.
        self.shown = None;

        match result {
            Ok(report) => Step::Calibrated(report),
            Err(e) => Step::CalibrationFailed(e.kind()),
        }
    }

    pub fn offsets(&self) -> &BiasOffsets {
        &self.offsets
    }

    pub fn state(&self) -> CalibrationState {
        self.machine.state()
    }

    pub fn estimator(&self) -> &OrientationEstimator {
        &self.estimator
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn store(&self) -> &O {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn indicators(&self) -> &L {
        &self.indicators
    }

    pub fn button_mut(&mut self) -> &mut B {
        self.button.inner()
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }
}

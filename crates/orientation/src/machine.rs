use embedded_hal_async::delay::DelayNs;

use crate::calibrator::BiasCalibrator;
use crate::capabilities::{DisplayPresenter, OffsetStore, SensorSource};
use crate::display::Frame;
use crate::error::CalibrationError;
use crate::gesture::Gesture;
use crate::types::{Axes, BiasOffsets};

/// How long computed offsets (or a failure) stay on screen.
pub const RESULT_DWELL_MS: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Measuring,
    Calibrating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationSelection {
    Level,
    Compass,
}

impl CalibrationSelection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Level => Self::Compass,
            Self::Compass => Self::Level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationState {
    Measuring,
    Selecting(CalibrationSelection),
    Running(CalibrationSelection),
}

impl CalibrationState {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Measuring => Mode::Measuring,
            Self::Selecting(_) | Self::Running(_) => Mode::Calibrating,
        }
    }
}

/// Offsets computed by a completed session.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationReport {
    pub selection: CalibrationSelection,
    /// The accelerometer or magnetometer part, depending on `selection`.
    pub offsets: Axes,
}

/// Mode and menu logic for calibration.
///
/// Once in the menu there is no gesture back to [`Mode::Measuring`]; only a
/// reset returns there.
#[derive(Debug, Clone)]
pub struct CalibrationStateMachine {
    state: CalibrationState,
    calibrator: BiasCalibrator,
}

impl CalibrationStateMachine {
    pub const fn new() -> Self {
        Self {
            state: CalibrationState::Measuring,
            calibrator: BiasCalibrator,
        }
    }

    pub fn state(&self) -> CalibrationState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Applies `gesture` and returns the selection to calibrate, if the
    /// gesture started a session.
    pub fn handle_gesture(
        &mut self,
        gesture: Gesture,
    ) -> Option<CalibrationSelection> {
        match (self.state, gesture) {
            (CalibrationState::Measuring, Gesture::LongPress) => {
                info!("entering calibration menu");
                self.state =
                    CalibrationState::Selecting(CalibrationSelection::Level);
                None
            }
            (CalibrationState::Selecting(selection), Gesture::ShortPress) => {
                self.state = CalibrationState::Selecting(selection.toggled());
                None
            }
            (CalibrationState::Selecting(selection), Gesture::LongPress) => {
                self.state = CalibrationState::Running(selection);
                Some(selection)
            }
            _ => None,
        }
    }

    /// Runs the pending session to completion.
    ///
    /// `offsets` is only replaced after the store has committed the new
    /// values. Whatever the outcome, the result screen is held for
    /// [`RESULT_DWELL_MS`] and the menu is shown again afterwards with the
    /// same selection.
    pub async fn run_calibration<S, O, P, D>(
        &mut self,
        sensor: &mut S,
        store: &mut O,
        presenter: &mut P,
        delay: &mut D,
        offsets: &mut BiasOffsets,
    ) -> Result<CalibrationReport, CalibrationError<S::Error, O::Error>>
    where
        S: SensorSource,
        O: OffsetStore,
        P: DisplayPresenter,
        D: DelayNs,
    {
        let CalibrationState::Running(selection) = self.state else {
            return Err(CalibrationError::NotRunning);
        };

        present(presenter, &Frame::instructions(selection)).await;

        let result = self.calibrate(selection, sensor, store, offsets).await;
        let frame = match &result {
            Ok(report) => {
                info!("{} calibration saved", selection);
                Frame::offsets(&report.offsets)
            }
            Err(e) => {
                warn!("{} calibration failed: {}", selection, e.kind());
                match e {
                    CalibrationError::Sensor(_) => Frame::sensor_failed(),
                    _ => Frame::save_failed(),
                }
            }
        };
        present(presenter, &frame).await;

        delay.delay_ms(RESULT_DWELL_MS).await;
        self.state = CalibrationState::Selecting(selection);

        result
    }

    async fn calibrate<S, O>(
        &self,
        selection: CalibrationSelection,
        sensor: &mut S,
        store: &mut O,
        offsets: &mut BiasOffsets,
    ) -> Result<CalibrationReport, CalibrationError<S::Error, O::Error>>
    where
        S: SensorSource,
        O: OffsetStore,
    {
        let sample = sensor
            .read_sample()
            .await
            .map_err(CalibrationError::Sensor)?;

        let (part, candidate) = match selection {
            CalibrationSelection::Level => {
                let accel = self.calibrator.calibrate_level(&sample);
                (accel, offsets.with_accel(accel))
            }
            CalibrationSelection::Compass => {
                let mag = self.calibrator.calibrate_compass(&sample);
                (mag, offsets.with_mag(mag))
            }
        };

        store
            .save_offsets(&candidate)
            .await
            .map_err(CalibrationError::Persistence)?;
        *offsets = candidate;

        Ok(CalibrationReport { selection, offsets: part })
    }
}

impl Default for CalibrationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Hands `frame` to the presenter. Failures are logged and reported as
/// `false`.
pub(crate) async fn present<P: DisplayPresenter>(
    presenter: &mut P,
    frame: &Frame,
) -> bool {
    match presenter.present(frame).await {
        Ok(()) => true,
        Err(_) => {
            warn!("display update failed");
            false
        }
    }
}

use core::f32::consts::PI;

use libm::{atan2f, fmodf, sqrtf};

use crate::config::EstimatorConfig;
use crate::kalman::ScalarKalman;
use crate::types::{Axes, BiasOffsets, Orientation, RawSample};
use crate::window::MovingAverage;

/// Length of the moving-average window, in loop iterations.
pub const WINDOW_LEN: usize = 20;

const RAD_TO_DEG: f32 = 180.0 / PI;

/// Unfiltered pitch in degrees from a bias-corrected acceleration.
///
/// When `y` and `z` are both zero the result is whatever `atan2f` gives for a
/// zero denominator, i.e. +/-90 degrees.
pub fn pitch_degrees(accel: Axes) -> f32 {
    let horizontal = sqrtf(accel.y * accel.y + accel.z * accel.z);
    atan2f(-accel.x, horizontal) * RAD_TO_DEG
}

/// Unfiltered heading in degrees within `[0, 360)`, for any declination.
pub fn heading_degrees(mag: Axes, declination_deg: f32) -> f32 {
    let raw = atan2f(mag.y, mag.x) * RAD_TO_DEG - declination_deg;
    let mut heading = fmodf(raw, 360.0);
    if heading < 0.0 {
        heading += 360.0;
    }
    // A tiny negative remainder rounds up to exactly 360.
    if heading >= 360.0 {
        heading = 0.0;
    }
    heading
}

/// One smoothed angle channel: Kalman filter followed by a moving average.
#[derive(Debug, Clone)]
pub struct SmoothedAngle {
    kalman: ScalarKalman,
    window: MovingAverage<WINDOW_LEN>,
}

impl SmoothedAngle {
    pub fn new(kalman: ScalarKalman) -> Self {
        Self { kalman, window: MovingAverage::new() }
    }

    fn update(&mut self, slot: usize, raw: f32) -> f32 {
        let filtered = self.kalman.update(raw);
        self.window.replace(slot, filtered)
    }

    pub fn kalman(&self) -> &ScalarKalman {
        &self.kalman
    }

    pub fn window(&self) -> &MovingAverage<WINDOW_LEN> {
        &self.window
    }

    /// Current smoothed value.
    pub fn value(&self) -> f32 {
        self.window.average()
    }
}

/// Turns bias-corrected samples into smoothed pitch and heading.
///
/// Both channels write into the same slot of their windows; the slot only
/// advances in [`OrientationEstimator::estimate`], once per loop iteration.
#[derive(Debug, Clone)]
pub struct OrientationEstimator {
    config: EstimatorConfig,
    pitch: SmoothedAngle,
    heading: SmoothedAngle,
    cursor: usize,
}

impl OrientationEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            pitch: SmoothedAngle::new(ScalarKalman::new(config.kalman)),
            heading: SmoothedAngle::new(ScalarKalman::new(config.kalman)),
            cursor: 0,
        }
    }

    /// Smoothed pitch after feeding `sample` into the current slot.
    pub fn estimate_pitch(
        &mut self,
        sample: &RawSample,
        offsets: &BiasOffsets,
    ) -> f32 {
        let corrected = offsets.apply(sample);
        self.pitch.update(self.cursor, pitch_degrees(corrected.accel))
    }

    /// Smoothed heading after feeding `sample` into the current slot.
    pub fn estimate_heading(
        &mut self,
        sample: &RawSample,
        offsets: &BiasOffsets,
    ) -> f32 {
        let corrected = offsets.apply(sample);
        let raw = heading_degrees(corrected.mag, self.config.declination_deg);
        self.heading.update(self.cursor, raw)
    }

    /// Runs both channels and advances the shared write index.
    pub fn estimate(
        &mut self,
        sample: &RawSample,
        offsets: &BiasOffsets,
    ) -> Orientation {
        let pitch = self.estimate_pitch(sample, offsets);
        let heading = self.estimate_heading(sample, offsets);
        self.cursor = (self.cursor + 1) % WINDOW_LEN;
        Orientation { pitch, heading }
    }

    pub fn current(&self) -> Orientation {
        Orientation {
            pitch: self.pitch.value(),
            heading: self.heading.value(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn pitch(&self) -> &SmoothedAngle {
        &self.pitch
    }

    pub fn heading(&self) -> &SmoothedAngle {
        &self.heading
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }
}

use crate::types::{Axes, RawSample};

/// Nominal gravity in m/s^2 that a level device should read on Z.
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Computes bias offsets from a single sample.
///
/// Holds no state. Persisting the result is up to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiasCalibrator;

impl BiasCalibrator {
    /// Accelerometer offsets for a device held level and still.
    ///
    /// X and Y are zeroed; Z is pulled to [`STANDARD_GRAVITY`], so the
    /// corrected reading of the same sample is `(0, 0, 9.81)`.
    pub fn calibrate_level(&self, sample: &RawSample) -> Axes {
        Axes::new(
            0.0 - sample.accel.x,
            0.0 - sample.accel.y,
            STANDARD_GRAVITY - sample.accel.z,
        )
    }

    /// Hard-iron magnetometer offsets from one instantaneous reading.
    ///
    /// This is not an ellipsoid fit: the sample taken is whatever the field
    /// reads at the moment of capture, so rotating the device beforehand does
    /// not contribute to the result. Zero axes come back as `+0.0`.
    pub fn calibrate_compass(&self, sample: &RawSample) -> Axes {
        let mag = sample.mag;
        Axes::new(0.0 - mag.x, 0.0 - mag.y, 0.0 - mag.z)
    }
}

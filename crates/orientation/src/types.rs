use core::ops::{Add, Neg};

/// A tri-axis reading or offset in the sensor's native unit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Axes {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Axes {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Add for Axes {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Neg for Axes {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// One poll of the inertial sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// Acceleration in m/s^2
    pub accel: Axes,
    /// Magnetic field in microtesla
    pub mag: Axes,
}

impl RawSample {
    pub const fn new(accel: Axes, mag: Axes) -> Self {
        Self { accel, mag }
    }
}

/// Per-axis additive corrections for the accelerometer and magnetometer.
///
/// Offsets are added to every [`RawSample`] before any angle is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BiasOffsets {
    pub accel: Axes,
    pub mag: Axes,
}

impl BiasOffsets {
    pub const ZERO: Self = Self { accel: Axes::ZERO, mag: Axes::ZERO };

    pub const fn new(accel: Axes, mag: Axes) -> Self {
        Self { accel, mag }
    }

    /// Returns the bias-corrected copy of `sample`.
    pub fn apply(&self, sample: &RawSample) -> RawSample {
        RawSample {
            accel: sample.accel + self.accel,
            mag: sample.mag + self.mag,
        }
    }

    pub fn with_accel(self, accel: Axes) -> Self {
        Self { accel, ..self }
    }

    pub fn with_mag(self, mag: Axes) -> Self {
        Self { mag, ..self }
    }
}

/// Smoothed output of one estimator step, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    pub pitch: f32,
    pub heading: f32,
}

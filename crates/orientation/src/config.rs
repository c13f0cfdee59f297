use libm::{fabsf, fmodf};

use crate::kalman::KalmanConfig;
use crate::types::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EstimatorConfig {
    /// Shared by the pitch and heading filters.
    pub kalman: KalmanConfig,
    /// Magnetic declination in degrees, subtracted from the raw heading.
    pub declination_deg: f32,
}

/// When the status outputs light up.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorConfig {
    pub level_tolerance_deg: f32,
    pub reference_heading_deg: f32,
    pub heading_tolerance_deg: f32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            level_tolerance_deg: 0.5,
            reference_heading_deg: 180.0,
            heading_tolerance_deg: 1.0,
        }
    }
}

impl IndicatorConfig {
    pub fn is_level(&self, orientation: &Orientation) -> bool {
        fabsf(orientation.pitch) <= self.level_tolerance_deg
    }

    /// Compares across the 0/360 seam.
    pub fn is_on_heading(&self, orientation: &Orientation) -> bool {
        let mut delta = fmodf(
            fabsf(orientation.heading - self.reference_heading_deg),
            360.0,
        );
        if delta > 180.0 {
            delta = 360.0 - delta;
        }
        delta <= self.heading_tolerance_deg
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub estimator: EstimatorConfig,
    pub indicators: IndicatorConfig,
    /// Loop period after a measurement.
    pub measure_period_ms: u32,
    /// Loop period while a press is held or the menu is shown.
    pub poll_period_ms: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            estimator: EstimatorConfig::default(),
            indicators: IndicatorConfig::default(),
            measure_period_ms: 100,
            poll_period_ms: 10,
        }
    }
}

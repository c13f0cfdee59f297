/// Tuning for [`ScalarKalman`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KalmanConfig {
    /// Variance added to the error covariance before every update (q).
    pub process_noise: f32,
    /// Variance of a single measurement (r).
    pub measurement_noise: f32,
    /// Error covariance the filter starts from.
    pub initial_covariance: f32,
}

impl Default for KalmanConfig {
    fn default() -> Self {
        Self {
            process_noise: 0.05,
            measurement_noise: 1.0,
            initial_covariance: 1.0,
        }
    }
}

/// One-dimensional Kalman filter for a slowly varying scalar.
///
/// The state is a single estimate with its error covariance. Each update
/// first grows the covariance by the process noise, then blends the new
/// measurement in with gain `p / (p + r)` and shrinks the covariance by
/// `1 - gain`.
#[derive(Debug, Clone)]
pub struct ScalarKalman {
    config: KalmanConfig,
    estimate: f32,
    covariance: f32,
    last_measurement: f32,
}

impl ScalarKalman {
    pub const fn new(config: KalmanConfig) -> Self {
        Self {
            config,
            estimate: 0.0,
            covariance: config.initial_covariance,
            last_measurement: 0.0,
        }
    }

    /// Feed one measurement and return the new estimate.
    pub fn update(&mut self, measurement: f32) -> f32 {
        self.last_measurement = measurement;
        self.covariance += self.config.process_noise;

        let gain =
            self.covariance / (self.covariance + self.config.measurement_noise);
        self.estimate += gain * (measurement - self.estimate);
        self.covariance *= 1.0 - gain;

        self.estimate
    }

    pub fn estimate(&self) -> f32 {
        self.estimate
    }

    pub fn covariance(&self) -> f32 {
        self.covariance
    }

    pub fn last_measurement(&self) -> f32 {
        self.last_measurement
    }

    pub fn config(&self) -> &KalmanConfig {
        &self.config
    }
}

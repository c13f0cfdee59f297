#![no_std]
#![feature(type_alias_impl_trait)]
#![feature(impl_trait_in_assoc_type)]

#[macro_use]
mod fmt;

pub mod io;
pub mod storage;
pub mod tasks;

use orientation::{DeviceConfig, EstimatorConfig, IndicatorConfig, KalmanConfig};

pub const HW_VERSION: &str = env!("HW_VERSION");
pub const FW_VERSION: &str = env!("FW_VERSION");

/// Tuning the firmware runs with.
pub fn default_level_compass_settings() -> DeviceConfig {
    DeviceConfig {
        estimator: EstimatorConfig {
            kalman: KalmanConfig {
                process_noise: 0.05,
                measurement_noise: 1.0,
                initial_covariance: 1.0,
            },
            declination_deg: 0.0,
        },
        indicators: IndicatorConfig {
            level_tolerance_deg: 0.5,
            reference_heading_deg: 180.0,
            heading_tolerance_deg: 1.0,
        },
        measure_period_ms: 100,
        poll_period_ms: 10,
    }
}

pub mod prelude {
    pub use super::{
        debug, default_level_compass_settings, error, info, io::*, storage::*,
        tasks::*, unwrap, warn, FW_VERSION, HW_VERSION,
    };
    pub use embassy_executor::Spawner;
    pub use embassy_time::{Duration, Timer};

    pub use icm_20948::{AccelFsr, MagMode};
    pub use level_compass_bsp::{
        DisplayBusResources, ImuBusResources, LevelCompassBoard,
        LED_ACTIVE_LOW,
    };
    pub use orientation::{DeviceConfig, LevelCompass};
}

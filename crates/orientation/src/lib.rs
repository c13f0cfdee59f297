//! Orientation estimation and bias calibration for a digital level and
//! compass.
//!
//! Hardware enters through the traits in [`capabilities`]; everything else is
//! plain state that can be driven from host tests.
#![no_std]

#[macro_use]
mod fmt;

pub mod calibrator;
pub mod capabilities;
pub mod config;
pub mod device;
pub mod display;
pub mod error;
pub mod estimator;
pub mod gesture;
pub mod kalman;
pub mod machine;
pub mod storage;
pub mod types;
pub mod window;

pub use calibrator::{BiasCalibrator, STANDARD_GRAVITY};
pub use capabilities::{DisplayPresenter, Indicators, OffsetStore, SensorSource};
pub use config::{DeviceConfig, EstimatorConfig, IndicatorConfig};
pub use device::{LevelCompass, Step};
pub use display::{Frame, Position, TextLine};
pub use error::{CalibrationError, FailureKind};
pub use estimator::{
    heading_degrees, pitch_degrees, OrientationEstimator, SmoothedAngle,
    WINDOW_LEN,
};
pub use gesture::{
    DebouncedButton, Gesture, GestureDetector, GestureInput, RawButton,
    DEBOUNCE_MS, LONG_PRESS_MS,
};
pub use kalman::{KalmanConfig, ScalarKalman};
pub use machine::{
    CalibrationReport, CalibrationSelection, CalibrationState,
    CalibrationStateMachine, Mode, RESULT_DWELL_MS,
};
pub use storage::{FlashOffsetStore, StoreError};
pub use types::{Axes, BiasOffsets, Orientation, RawSample};
pub use window::MovingAverage;

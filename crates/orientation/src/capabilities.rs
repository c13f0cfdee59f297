//! Hardware-facing seams of the core.

use core::fmt::Debug;

use crate::display::Frame;
use crate::types::{BiasOffsets, RawSample};

/// Source of accelerometer and magnetometer samples.
#[allow(async_fn_in_trait)]
pub trait SensorSource {
    type Error: Debug;

    /// Fails if no fresh sample is available.
    async fn read_sample(&mut self) -> Result<RawSample, Self::Error>;
}

/// Non-volatile home of the calibration offsets.
#[allow(async_fn_in_trait)]
pub trait OffsetStore {
    type Error: Debug;

    /// `Ok(None)` if offsets were never saved.
    async fn load_offsets(&mut self) -> Result<Option<BiasOffsets>, Self::Error>;

    /// Returns once the offsets are durable.
    async fn save_offsets(
        &mut self,
        offsets: &BiasOffsets,
    ) -> Result<(), Self::Error>;
}

#[allow(async_fn_in_trait)]
pub trait DisplayPresenter {
    type Error: Debug;

    async fn present(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

/// The two status outputs.
pub trait Indicators {
    fn set_level(&mut self, on: bool);
    fn set_on_heading(&mut self, on: bool);
}

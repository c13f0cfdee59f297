use icm_20948::ScaledAxes;
use level_compass_bsp::Imu;
use orientation::{Axes, RawSample, SensorSource};

pub type ImuError = icm_20948::Error<embassy_nrf::twim::Error>;

/// Reads the ICM-20948 accelerometer and its AK09916 magnetometer as one
/// sample.
pub struct ImuSensor {
    imu: Imu,
}

impl ImuSensor {
    /// `imu` must already be initialized and streaming.
    pub fn new(imu: Imu) -> Self {
        Self { imu }
    }
}

fn axes(scaled: ScaledAxes) -> Axes {
    Axes::new(scaled.x, scaled.y, scaled.z)
}

impl SensorSource for ImuSensor {
    type Error = ImuError;

    async fn read_sample(&mut self) -> Result<RawSample, Self::Error> {
        let accel = self.imu.read_accel().await?;
        let mag = self.imu.read_mag().await?;
        Ok(RawSample::new(axes(accel), axes(mag)))
    }
}

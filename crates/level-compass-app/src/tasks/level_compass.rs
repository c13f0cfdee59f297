use crate::io::{ImuSensor, LedIndicators, OledPresenter, UserButton};
use crate::prelude::*;
use crate::storage::AppOffsetStore;
use embassy_time::{Delay, Instant};
use orientation::{LevelCompass, Step};

pub type AppLevelCompass = LevelCompass<
    ImuSensor,
    AppOffsetStore,
    OledPresenter,
    LedIndicators,
    UserButton,
    Delay,
>;

/// The control loop. Runs forever; every iteration paces itself.
#[embassy_executor::task]
pub async fn level_compass_task(mut device: AppLevelCompass) {
    let offsets = device.load_offsets().await;
    info!("Starting with offsets {:?}", offsets);

    loop {
        match device.step(Instant::now().as_millis()).await {
            Step::Calibrated(report) => {
                info!("Calibration finished: {:?}", report);
            }
            Step::CalibrationFailed(kind) => {
                error!("Calibration failed: {:?}", kind);
            }
            _ => {}
        }
    }
}

#![no_std]
#![no_main]
#![feature(type_alias_impl_trait)]
#![feature(impl_trait_in_assoc_type)]

use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};

#[cfg(feature = "defmt")]
use defmt_rtt as _;
#[cfg(feature = "defmt")]
use panic_probe as _;
#[cfg(not(feature = "defmt"))]
use panic_reset as _;

use level_compass_app::prelude::*;

// Application main entry point. The spawner can be used to start async tasks.
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Level compass {} on {}", FW_VERSION, HW_VERSION);
    let board = LevelCompassBoard::default();

    spawner.must_spawn(watchdog_task(board.wdt));

    let mut imu = board.imu_bus.into_imu();
    unwrap!(imu.init().await);
    unwrap!(imu.start_accel(AccelFsr::Fs2G).await);
    unwrap!(imu.start_mag(MagMode::Continuous100Hz).await);
    info!("IMU ready");

    // Display failures are logged and never fatal.
    let mut display = board.display_bus.into_display();
    if display.init().is_err() {
        warn!("Display init failed");
    }

    let led_off = Level::from(LED_ACTIVE_LOW);
    let indicators = LedIndicators::new(
        Output::new(board.led_level, led_off, OutputDrive::Standard),
        Output::new(board.led_heading, led_off, OutputDrive::Standard),
        LED_ACTIVE_LOW,
    );
    let button = UserButton::new(Input::new(board.button, Pull::Up));

    let device = LevelCompass::new(
        ImuSensor::new(imu),
        offset_store(board.nvmc),
        OledPresenter::new(display),
        indicators,
        button,
        embassy_time::Delay,
        default_level_compass_settings(),
    );

    spawner.must_spawn(level_compass_task(device));
}

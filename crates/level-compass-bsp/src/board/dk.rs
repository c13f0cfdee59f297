use embassy_nrf::interrupt::Priority;
use embassy_nrf::peripherals::{self, NVMC, P0_11, P0_13, P0_14, WDT};
use embassy_nrf::Peri;

/// Sensor breakout on the Arduino header I2C pins.
pub struct ImuBusResources {
    pub twim: Peri<'static, peripherals::TWISPI1>,
    pub sda: Peri<'static, peripherals::P0_26>,
    pub scl: Peri<'static, peripherals::P0_27>,
}

pub struct DisplayBusResources {
    pub twim: Peri<'static, peripherals::TWISPI0>,
    pub sda: Peri<'static, peripherals::P0_30>,
    pub scl: Peri<'static, peripherals::P0_31>,
}

/// The DK LEDs sink current: low is on.
pub const LED_ACTIVE_LOW: bool = true;

/// Represents all the peripherals and pins used on the nRF52840-DK.
pub struct LevelCompassBoard {
    /// Button 1.
    pub button: Peri<'static, P0_11>,
    /// LED 1.
    pub led_level: Peri<'static, P0_13>,
    /// LED 2.
    pub led_heading: Peri<'static, P0_14>,
    pub imu_bus: ImuBusResources,
    pub display_bus: DisplayBusResources,
    pub wdt: Peri<'static, WDT>,
    pub nvmc: Peri<'static, NVMC>,
}

impl Default for LevelCompassBoard {
    fn default() -> Self {
        let mut config = embassy_nrf::config::Config::default();
        config.gpiote_interrupt_priority = Priority::P2;
        config.time_interrupt_priority = Priority::P2;
        Self::new(config)
    }
}

impl LevelCompassBoard {
    pub fn new(config: embassy_nrf::config::Config) -> Self {
        let p = embassy_nrf::init(config);

        Self {
            button: p.P0_11,
            led_level: p.P0_13,
            led_heading: p.P0_14,
            imu_bus: ImuBusResources {
                twim: p.TWISPI1,
                sda: p.P0_26,
                scl: p.P0_27,
            },
            display_bus: DisplayBusResources {
                twim: p.TWISPI0,
                sda: p.P0_30,
                scl: p.P0_31,
            },
            wdt: p.WDT,
            nvmc: p.NVMC,
        }
    }
}

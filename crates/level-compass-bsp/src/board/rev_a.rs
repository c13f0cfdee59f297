use embassy_nrf::interrupt::Priority;
use embassy_nrf::peripherals::{self, NVMC, P0_28, P0_29, P1_04, WDT};
use embassy_nrf::Peri;

/// Sensor bus: ICM-20948 with the AK09916 bypassed onto the same lines.
pub struct ImuBusResources {
    pub twim: Peri<'static, peripherals::TWISPI1>,
    pub sda: Peri<'static, peripherals::P0_04>,
    pub scl: Peri<'static, peripherals::P0_06>,
}

/// SSD1306 128x32 OLED bus.
pub struct DisplayBusResources {
    pub twim: Peri<'static, peripherals::TWISPI0>,
    pub sda: Peri<'static, peripherals::P0_26>,
    pub scl: Peri<'static, peripherals::P0_27>,
}

/// LEDs are driven active high.
pub const LED_ACTIVE_LOW: bool = false;

/// Represents all the peripherals and pins used by the level compass.
pub struct LevelCompassBoard {
    /// User button, active low.
    pub button: Peri<'static, P1_04>,
    /// Lit while the device is level.
    pub led_level: Peri<'static, P0_28>,
    /// Lit while the device points at the reference heading.
    pub led_heading: Peri<'static, P0_29>,
    pub imu_bus: ImuBusResources,
    pub display_bus: DisplayBusResources,
    /// Watchdog Timer.
    pub wdt: Peri<'static, WDT>,
    /// Non-Volatile Memory Controller.
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
    /// Create a new instance based on HAL configuration
    pub fn new(config: embassy_nrf::config::Config) -> Self {
        let p = embassy_nrf::init(config);

        Self {
            button: p.P1_04,
            led_level: p.P0_28,
            led_heading: p.P0_29,
            imu_bus: ImuBusResources {
                twim: p.TWISPI1,
                sda: p.P0_04,
                scl: p.P0_06,
            },
            display_bus: DisplayBusResources {
                twim: p.TWISPI0,
                sda: p.P0_26,
                scl: p.P0_27,
            },
            wdt: p.WDT,
            nvmc: p.NVMC,
        }
    }
}

use crate::board::{DisplayBusResources, ImuBusResources};
use embassy_nrf::{
    bind_interrupts,
    interrupt::{self, InterruptExt},
    peripherals, twim,
};
use icm_20948::Icm20948;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};
use static_cell::StaticCell;

/// TWIM copies flash-resident data through this buffer before DMA.
static IMU_TWIM_BUF: StaticCell<[u8; 32]> = StaticCell::new();
static DISPLAY_TWIM_BUF: StaticCell<[u8; 32]> = StaticCell::new();

pub type Imu = Icm20948<twim::Twim<'static>, embassy_time::Delay>;

pub type Display = Ssd1306<
    I2CInterface<twim::Twim<'static>>,
    DisplaySize128x32,
    BufferedGraphicsMode<DisplaySize128x32>,
>;

bind_interrupts!(struct TwimIrqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    TWISPI1 => twim::InterruptHandler<peripherals::TWISPI1>;
});

impl ImuBusResources {
    /// Bring up TWIM1 at 400 kHz and wrap it in the IMU driver. The driver
    /// still needs [`Icm20948::init`].
    pub fn into_imu(self) -> Imu {
        let mut config = twim::Config::default();
        config.frequency = twim::Frequency::K400;
        interrupt::TWISPI1.set_priority(interrupt::Priority::P3);

        let buf = IMU_TWIM_BUF.init([0; 32]);
        let bus = twim::Twim::new(
            self.twim, TwimIrqs, self.sda, self.scl, config, buf,
        );
        Icm20948::new(bus, embassy_time::Delay)
    }
}

impl DisplayBusResources {
    /// Bring up TWIM0 and wrap it in a buffered SSD1306 driver. The display
    /// still needs `init()`.
    pub fn into_display(self) -> Display {
        let mut config = twim::Config::default();
        config.frequency = twim::Frequency::K400;
        interrupt::TWISPI0.set_priority(interrupt::Priority::P3);

        let buf = DISPLAY_TWIM_BUF.init([0; 32]);
        let bus = twim::Twim::new(
            self.twim, TwimIrqs, self.sda, self.scl, config, buf,
        );
        Ssd1306::new(
            I2CDisplayInterface::new(bus),
            DisplaySize128x32,
            DisplayRotation::Rotate0,
        )
        .into_buffered_graphics_mode()
    }
}

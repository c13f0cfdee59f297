#![no_std]

pub mod ll;
pub use ll::{AccelFsr, Bank, MagMode};

use embedded_hal_async::{delay, i2c};
use ll::{bank0, bank2, mag, IntPinCfg, MagStatus1, MagStatus2, PwrMgmt1, UserCtrl};

/// Standard gravity in m/s^2
pub const GRAVITY: f32 = 9.80665;
/// AK09916 sensitivity in microtesla per LSB
pub const MAG_UT_PER_LSB: f32 = 0.15;

/// `ACCEL_FCHOICE` in `ACCEL_CONFIG`: route through the low-pass filter.
const ACCEL_FCHOICE: u8 = 0b0000_0001;
/// `ACCEL_DLPFCFG` = 3, roughly 50 Hz bandwidth.
const ACCEL_DLPFCFG: u8 = 3 << 3;

/// Raw register values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawAxes {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

/// Readings in physical units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaledAxes {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(derive_more::From, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<I2cError> {
    I2c(I2cError),
    InvalidWhoAmI,
    InvalidMagWhoAmI,
    /// The magnetometer has no new sample yet.
    DataNotReady,
    MagnetometerOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub accel_fsr: AccelFsr,
    pub mag_mode: MagMode,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            accel_fsr: AccelFsr::Fs2G,
            mag_mode: MagMode::Continuous100Hz,
        }
    }
}

/// Converts a raw accelerometer reading to m/s^2.
pub fn accel_to_mps2(raw: RawAxes, fsr: AccelFsr) -> ScaledAxes {
    let scale = GRAVITY / fsr.lsb_per_g();
    ScaledAxes {
        x: f32::from(raw.x) * scale,
        y: f32::from(raw.y) * scale,
        z: f32::from(raw.z) * scale,
    }
}

/// Converts a raw AK09916 reading to microtesla in the accelerometer frame.
///
/// The AK09916 Y and Z axes point the opposite way to the accelerometer's.
pub fn mag_to_ut(raw: RawAxes) -> ScaledAxes {
    ScaledAxes {
        x: f32::from(raw.x) * MAG_UT_PER_LSB,
        y: -f32::from(raw.y) * MAG_UT_PER_LSB,
        z: -f32::from(raw.z) * MAG_UT_PER_LSB,
    }
}

pub struct Icm20948<I2c: i2c::I2c, D: delay::DelayNs> {
    pub interface: ll::DeviceInterface<I2c>,
    delay: D,
    config: DeviceConfig,
}

impl<I2c: i2c::I2c, D: delay::DelayNs> Icm20948<I2c, D> {
    pub fn new(i2c: I2c, delay: D) -> Self {
        Self {
            interface: ll::DeviceInterface::new(i2c),
            delay,
            config: DeviceConfig::default(),
        }
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Reset the IMU, wake it and expose the magnetometer on the host bus.
    pub async fn init(&mut self) -> Result<(), Error<I2c::Error>> {
        // Wait for power-up
        self.delay.delay_ms(10).await;

        let who_am_i = self
            .interface
            .read_reg_u8(Bank::Bank0, bank0::WHO_AM_I)
            .await?;
        if who_am_i != bank0::WHO_AM_I_VALUE {
            return Err(Error::InvalidWhoAmI);
        }

        self.interface
            .write_reg(
                Bank::Bank0,
                bank0::PWR_MGMT_1,
                PwrMgmt1::DEVICE_RESET.bits(),
            )
            .await?;
        self.delay.delay_ms(100).await;
        // Reset puts REG_BANK_SEL back to bank 0.
        self.interface.invalidate_bank();

        self.interface
            .write_reg(
                Bank::Bank0,
                bank0::PWR_MGMT_1,
                PwrMgmt1::CLKSEL_AUTO.bits(),
            )
            .await?;
        self.delay.delay_ms(10).await;

        // Enable every accelerometer and gyroscope axis.
        self.interface
            .write_reg(Bank::Bank0, bank0::PWR_MGMT_2, 0x00)
            .await?;

        self.interface
            .write_reg(Bank::Bank0, bank0::USER_CTRL, UserCtrl::empty().bits())
            .await?;
        self.interface
            .write_reg(
                Bank::Bank0,
                bank0::INT_PIN_CFG,
                IntPinCfg::BYPASS_EN.bits(),
            )
            .await?;
        self.delay.delay_ms(1).await;

        let wia = self.interface.read_mag_u8(mag::WIA2).await?;
        if wia != mag::WIA2_VALUE {
            return Err(Error::InvalidMagWhoAmI);
        }

        self.interface.write_mag(mag::CNTL3, 0x01).await?;
        self.delay.delay_ms(1).await;

        Ok(())
    }

    /// Set the accelerometer range; the output rate is left at its
    /// ~1.1 kHz default.
    pub async fn start_accel(
        &mut self,
        fsr: AccelFsr,
    ) -> Result<(), Error<I2c::Error>> {
        let fs_sel: u8 = fsr.into();
        self.interface
            .write_reg(
                Bank::Bank2,
                bank2::ACCEL_CONFIG,
                ACCEL_DLPFCFG | (fs_sel << 1) | ACCEL_FCHOICE,
            )
            .await?;
        self.config.accel_fsr = fsr;
        Ok(())
    }

    pub async fn start_mag(
        &mut self,
        mode: MagMode,
    ) -> Result<(), Error<I2c::Error>> {
        // Mode changes must pass through power-down.
        self.interface
            .write_mag(mag::CNTL2, MagMode::PowerDown.into())
            .await?;
        self.delay.delay_us(100).await;
        self.interface.write_mag(mag::CNTL2, mode.into()).await?;
        self.delay.delay_ms(10).await;
        self.config.mag_mode = mode;
        Ok(())
    }

    pub async fn read_raw_accel(
        &mut self,
    ) -> Result<RawAxes, Error<I2c::Error>> {
        let mut buf = [0u8; 6];
        self.interface
            .read_reg(Bank::Bank0, bank0::ACCEL_XOUT_H, &mut buf)
            .await?;
        Ok(RawAxes {
            x: i16::from_be_bytes([buf[0], buf[1]]),
            y: i16::from_be_bytes([buf[2], buf[3]]),
            z: i16::from_be_bytes([buf[4], buf[5]]),
        })
    }

    /// Acceleration in m/s^2
    pub async fn read_accel(
        &mut self,
    ) -> Result<ScaledAxes, Error<I2c::Error>> {
        let raw = self.read_raw_accel().await?;
        Ok(accel_to_mps2(raw, self.config.accel_fsr))
    }

    /// Latest magnetometer sample.
    ///
    /// Fails with [`Error::DataNotReady`] if no new sample arrived since the
    /// previous read.
    pub async fn read_raw_mag(&mut self) -> Result<RawAxes, Error<I2c::Error>> {
        let st1 = self.interface.read_mag_u8(mag::ST1).await?;
        if !MagStatus1::from_bits_truncate(st1).contains(MagStatus1::DRDY) {
            return Err(Error::DataNotReady);
        }

        // HXL..HZH, TMPS, ST2. Reading ST2 releases the data registers.
        let mut buf = [0u8; 8];
        self.interface.read_mag(mag::HXL, &mut buf).await?;
        let st2 = MagStatus2::from_bits_truncate(buf[7]);
        if st2.contains(MagStatus2::HOFL) {
            return Err(Error::MagnetometerOverflow);
        }

        Ok(RawAxes {
            x: i16::from_le_bytes([buf[0], buf[1]]),
            y: i16::from_le_bytes([buf[2], buf[3]]),
            z: i16::from_le_bytes([buf[4], buf[5]]),
        })
    }

    /// Magnetic field in microtesla, in the accelerometer frame.
    pub async fn read_mag(&mut self) -> Result<ScaledAxes, Error<I2c::Error>> {
        let raw = self.read_raw_mag().await?;
        Ok(mag_to_ut(raw))
    }
}

//! Low level register and interface definitions
use bitflags::bitflags;
use embedded_hal_async::i2c;
use num_enum::{IntoPrimitive, TryFromPrimitive};

pub const ADDR: u8 = 0b1101000; // AD0 = 0
                                // const ADDR: u8 = 0b1101001; // AD0 = 1

/// AK09916 address, reachable once the ICM-20948 auxiliary bus is bypassed.
pub const MAG_ADDR: u8 = 0x0C;

/// Bank select register, present in every bank.
pub const REG_BANK_SEL: u8 = 0x7F;

pub mod bank0 {
    pub const WHO_AM_I: u8 = 0x00;
    pub const USER_CTRL: u8 = 0x03;
    pub const PWR_MGMT_1: u8 = 0x06;
    pub const PWR_MGMT_2: u8 = 0x07;
    pub const INT_PIN_CFG: u8 = 0x0F;
    /// First of six big-endian accelerometer bytes.
    pub const ACCEL_XOUT_H: u8 = 0x2D;

    pub const WHO_AM_I_VALUE: u8 = 0xEA;
}

pub mod bank2 {
    pub const ACCEL_CONFIG: u8 = 0x14;
}

pub mod mag {
    pub const WIA2: u8 = 0x01;
    pub const ST1: u8 = 0x10;
    /// First of six little-endian field bytes, followed by TMPS and ST2.
    pub const HXL: u8 = 0x11;
    pub const ST2: u8 = 0x18;
    pub const CNTL2: u8 = 0x31;
    pub const CNTL3: u8 = 0x32;

    pub const WIA2_VALUE: u8 = 0x09;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Bank {
    Bank0 = 0,
    Bank2 = 2,
}

/// Accelerometer full-scale range, `ACCEL_FS_SEL` in `ACCEL_CONFIG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AccelFsr {
    Fs2G = 0,
    Fs4G = 1,
    Fs8G = 2,
    Fs16G = 3,
}

impl AccelFsr {
    /// Sensitivity in LSB per g.
    pub const fn lsb_per_g(self) -> f32 {
        match self {
            Self::Fs2G => 16384.0,
            Self::Fs4G => 8192.0,
            Self::Fs8G => 4096.0,
            Self::Fs16G => 2048.0,
        }
    }
}

/// AK09916 operating mode, written to `CNTL2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MagMode {
    PowerDown = 0x00,
    Single = 0x01,
    Continuous10Hz = 0x02,
    Continuous20Hz = 0x04,
    Continuous50Hz = 0x06,
    Continuous100Hz = 0x08,
}

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct UserCtrl: u8 {
        const DMP_EN      = 0b1000_0000;
        const FIFO_EN     = 0b0100_0000;
        /// Auxiliary I2C master. Must be off for bypass.
        const I2C_MST_EN  = 0b0010_0000;
        const I2C_IF_DIS  = 0b0001_0000;
        const DMP_RST     = 0b0000_1000;
        const SRAM_RST    = 0b0000_0100;
        const I2C_MST_RST = 0b0000_0010;
    }
}

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct PwrMgmt1: u8 {
        const DEVICE_RESET = 0b1000_0000;
        const SLEEP        = 0b0100_0000;
        const LP_EN        = 0b0010_0000;
        const TEMP_DIS     = 0b0000_1000;
        /// Best available clock source.
        const CLKSEL_AUTO  = 0b0000_0001;
    }
}

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct IntPinCfg: u8 {
        const INT1_ACTL         = 0b1000_0000;
        const INT1_OPEN         = 0b0100_0000;
        const INT1_LATCH_EN     = 0b0010_0000;
        const INT_ANYRD_2CLEAR  = 0b0001_0000;
        const ACTL_FSYNC        = 0b0000_1000;
        const FSYNC_INT_MODE_EN = 0b0000_0100;
        /// Connects the auxiliary bus (and the AK09916) to the host bus.
        const BYPASS_EN         = 0b0000_0010;
    }
}

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct MagStatus1: u8 {
        /// Data overrun, a sample was skipped.
        const DOR  = 0b0000_0010;
        const DRDY = 0b0000_0001;
    }
}

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct MagStatus2: u8 {
        /// Magnetic sensor overflow, the sample is invalid.
        const HOFL = 0b0000_1000;
    }
}

/// Banked register access to the ICM-20948 and bypassed access to the
/// AK09916 on the same bus.
#[derive(Debug)]
pub struct DeviceInterface<I2c> {
    pub i2c: I2c,
    /// Bank last written to `REG_BANK_SEL`, `None` until the first write.
    bank: Option<Bank>,
}

impl<I2c: i2c::I2c> DeviceInterface<I2c> {
    pub fn new(i2c: I2c) -> Self {
        Self { i2c, bank: None }
    }

    /// Forget the cached bank, e.g. after a device reset.
    pub fn invalidate_bank(&mut self) {
        self.bank = None;
    }

    async fn select_bank(&mut self, bank: Bank) -> Result<(), I2c::Error> {
        if self.bank == Some(bank) {
            return Ok(());
        }
        let value: u8 = bank.into();
        self.i2c.write(ADDR, &[REG_BANK_SEL, value << 4]).await?;
        self.bank = Some(bank);
        Ok(())
    }

    pub async fn read_reg(
        &mut self,
        bank: Bank,
        reg: u8,
        buf: &mut [u8],
    ) -> Result<(), I2c::Error> {
        self.select_bank(bank).await?;
        self.i2c.write_read(ADDR, &[reg], buf).await
    }

    pub async fn read_reg_u8(
        &mut self,
        bank: Bank,
        reg: u8,
    ) -> Result<u8, I2c::Error> {
        let mut buf = [0u8];
        self.read_reg(bank, reg, &mut buf).await?;
        Ok(buf[0])
    }

    pub async fn write_reg(
        &mut self,
        bank: Bank,
        reg: u8,
        value: u8,
    ) -> Result<(), I2c::Error> {
        self.select_bank(bank).await?;
        self.i2c.write(ADDR, &[reg, value]).await
    }

    pub async fn read_mag(
        &mut self,
        reg: u8,
        buf: &mut [u8],
    ) -> Result<(), I2c::Error> {
        self.i2c.write_read(MAG_ADDR, &[reg], buf).await
    }

    pub async fn read_mag_u8(&mut self, reg: u8) -> Result<u8, I2c::Error> {
        let mut buf = [0u8];
        self.read_mag(reg, &mut buf).await?;
        Ok(buf[0])
    }

    pub async fn write_mag(
        &mut self,
        reg: u8,
        value: u8,
    ) -> Result<(), I2c::Error> {
        self.i2c.write(MAG_ADDR, &[reg, value]).await
    }
}

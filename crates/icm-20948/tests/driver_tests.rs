use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{
    ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation,
};
use icm_20948::ll::{bank0, bank2, mag, ADDR, MAG_ADDR, REG_BANK_SEL};
use icm_20948::{AccelFsr, Error, Icm20948, MagMode, GRAVITY};

// ---------------------------------------------------------------------------
// Simulated bus: ICM-20948 register banks plus a bypassed AK09916
// ---------------------------------------------------------------------------

struct FakeBus {
    banks: [[u8; 128]; 4],
    bank: usize,
    mag: [u8; 0x40],
    bank_switches: usize,
    resets: usize,
}

impl FakeBus {
    fn new() -> Self {
        let mut bus = Self {
            banks: [[0; 128]; 4],
            bank: 0,
            mag: [0; 0x40],
            bank_switches: 0,
            resets: 0,
        };
        bus.banks[0][bank0::WHO_AM_I as usize] = bank0::WHO_AM_I_VALUE;
        bus.mag[mag::WIA2 as usize] = mag::WIA2_VALUE;
        bus
    }

    fn write(&mut self, address: u8, reg: u8, value: u8) -> Result<(), ErrorKind> {
        match address {
            ADDR if reg == REG_BANK_SEL => {
                self.bank = (value >> 4) as usize;
                self.bank_switches += 1;
            }
            ADDR if self.bank == 0 && reg == bank0::PWR_MGMT_1 && value & 0x80 != 0 => {
                self.resets += 1;
                self.bank = 0;
                self.banks[0][reg as usize] = 0x41;
            }
            ADDR => self.banks[self.bank][reg as usize] = value,
            MAG_ADDR => self.mag[reg as usize] = value,
            _ => return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
        }
        Ok(())
    }

    fn read(&mut self, address: u8, reg: u8) -> Result<u8, ErrorKind> {
        match address {
            ADDR => Ok(self.banks[self.bank][reg as usize]),
            MAG_ADDR => {
                let value = self.mag[reg as usize];
                if reg == mag::ST2 {
                    self.mag[mag::ST1 as usize] &= !0x01;
                }
                Ok(value)
            }
            _ => Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
        }
    }

    fn set_mag_sample(&mut self, x: i16, y: i16, z: i16, st2: u8) {
        let start = mag::HXL as usize;
        for (i, v) in [x, y, z].iter().enumerate() {
            let [lo, hi] = v.to_le_bytes();
            self.mag[start + 2 * i] = lo;
            self.mag[start + 2 * i + 1] = hi;
        }
        self.mag[mag::ST2 as usize] = st2;
        self.mag[mag::ST1 as usize] = 0x01;
    }
}

impl ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl I2c for FakeBus {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut pointer = None;
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    let (&reg, data) =
                        bytes.split_first().ok_or(ErrorKind::Other)?;
                    pointer = Some(reg);
                    for (i, value) in data.iter().enumerate() {
                        self.write(address, reg + i as u8, *value)?;
                    }
                }
                Operation::Read(buf) => {
                    let reg = pointer.ok_or(ErrorKind::Other)?;
                    for (i, value) in buf.iter_mut().enumerate() {
                        *value = self.read(address, reg + i as u8)?;
                    }
                }
            }
        }
        Ok(())
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    async fn delay_ns(&mut self, _ns: u32) {}
}

async fn ready_device() -> Icm20948<FakeBus, NoDelay> {
    let mut imu = Icm20948::new(FakeBus::new(), NoDelay);
    imu.init().await.unwrap();
    imu
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn init_wakes_and_bypasses() {
    let imu = ready_device().await;
    let bus = &imu.interface.i2c;

    assert_eq!(bus.resets, 1);
    assert_eq!(bus.banks[0][bank0::PWR_MGMT_1 as usize], 0x01);
    assert_eq!(bus.banks[0][bank0::PWR_MGMT_2 as usize], 0x00);
    assert_eq!(bus.banks[0][bank0::USER_CTRL as usize], 0x00);
    assert_eq!(bus.banks[0][bank0::INT_PIN_CFG as usize], 0x02);
    assert_eq!(bus.mag[mag::CNTL3 as usize], 0x01);
}

#[futures_test::test]
async fn wrong_identity_is_rejected() {
    let mut bus = FakeBus::new();
    bus.banks[0][bank0::WHO_AM_I as usize] = 0x12;
    let mut imu = Icm20948::new(bus, NoDelay);
    assert_eq!(imu.init().await, Err(Error::InvalidWhoAmI));

    let mut bus = FakeBus::new();
    bus.mag[mag::WIA2 as usize] = 0x00;
    let mut imu = Icm20948::new(bus, NoDelay);
    assert_eq!(imu.init().await, Err(Error::InvalidMagWhoAmI));
}

#[futures_test::test]
async fn accel_range_lands_in_bank_two() {
    let mut imu = ready_device().await;

    imu.start_accel(AccelFsr::Fs2G).await.unwrap();
    assert_eq!(imu.interface.i2c.banks[2][bank2::ACCEL_CONFIG as usize], 0x19);

    imu.start_accel(AccelFsr::Fs4G).await.unwrap();
    assert_eq!(imu.interface.i2c.banks[2][bank2::ACCEL_CONFIG as usize], 0x1B);
    assert_eq!(imu.config().accel_fsr, AccelFsr::Fs4G);
}

#[futures_test::test]
async fn accel_reads_switch_back_to_bank_zero() {
    let mut imu = ready_device().await;
    imu.start_accel(AccelFsr::Fs2G).await.unwrap();

    let out = bank0::ACCEL_XOUT_H as usize;
    let data = [0x00, 0x00, 0xC0, 0x00, 0x40, 0x00];
    imu.interface.i2c.banks[0][out..out + 6].copy_from_slice(&data);

    let switches = imu.interface.i2c.bank_switches;
    let accel = imu.read_accel().await.unwrap();
    assert_eq!(imu.interface.i2c.bank_switches, switches + 1);

    assert_eq!(accel.x, 0.0);
    assert!((accel.y + GRAVITY).abs() < 1e-4);
    assert!((accel.z - GRAVITY).abs() < 1e-4);

    // Bank is cached between reads.
    imu.read_accel().await.unwrap();
    assert_eq!(imu.interface.i2c.bank_switches, switches + 1);
}

#[futures_test::test]
async fn mag_mode_goes_through_power_down() {
    let mut imu = ready_device().await;
    imu.start_mag(MagMode::Continuous100Hz).await.unwrap();
    assert_eq!(imu.interface.i2c.mag[mag::CNTL2 as usize], 0x08);
    assert_eq!(imu.config().mag_mode, MagMode::Continuous100Hz);
}

#[futures_test::test]
async fn mag_sample_is_consumed_once() {
    let mut imu = ready_device().await;
    imu.interface.i2c.set_mag_sample(100, -100, 200, 0x00);

    let field = imu.read_mag().await.unwrap();
    assert!((field.x - 15.0).abs() < 1e-4);
    assert!((field.y - 15.0).abs() < 1e-4);
    assert!((field.z + 30.0).abs() < 1e-4);

    assert_eq!(imu.read_mag().await, Err(Error::DataNotReady));
}

#[futures_test::test]
async fn mag_overflow_is_an_error() {
    let mut imu = ready_device().await;
    imu.interface.i2c.set_mag_sample(1, 2, 3, 0x08);
    assert_eq!(imu.read_raw_mag().await, Err(Error::MagnetometerOverflow));
}

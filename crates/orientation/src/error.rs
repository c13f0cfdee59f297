/// Why a calibration session did not update the offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError<SE, OE> {
    /// `run_calibration` was called outside of a running session.
    NotRunning,
    Sensor(SE),
    Persistence(OE),
}

impl<SE, OE> CalibrationError<SE, OE> {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NotRunning => FailureKind::NotRunning,
            Self::Sensor(_) => FailureKind::Sensor,
            Self::Persistence(_) => FailureKind::Persistence,
        }
    }
}

/// [`CalibrationError`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailureKind {
    NotRunning,
    Sensor,
    Persistence,
}

use libm::roundf;
use sequential_storage::map::SerializationError;
use serde::{Deserialize, Serialize};

use super::StorageKey;
use crate::types::{Axes, BiasOffsets};

/// Fixed-point scale of stored offsets: thousandths of the native unit.
pub const OFFSET_SCALE: f32 = 1000.0;

/// The data types stored in the system, corresponding to `StorageKey`.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageData {
    BiasOffsets(OffsetRecord),
}

impl StorageData {
    pub fn key(&self) -> u16 {
        match self {
            StorageData::BiasOffsets(_) => StorageKey::BiasOffsets.into(),
        }
    }
}

/// [`BiasOffsets`] as three-decimal fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OffsetRecord {
    pub accel: [i32; 3],
    pub mag: [i32; 3],
}

fn encode(axes: &Axes) -> [i32; 3] {
    [axes.x, axes.y, axes.z].map(|v| roundf(v * OFFSET_SCALE) as i32)
}

fn decode(raw: &[i32; 3]) -> Axes {
    let [x, y, z] = raw.map(|v| v as f32 / OFFSET_SCALE);
    Axes::new(x, y, z)
}

impl From<&BiasOffsets> for OffsetRecord {
    fn from(offsets: &BiasOffsets) -> Self {
        Self {
            accel: encode(&offsets.accel),
            mag: encode(&offsets.mag),
        }
    }
}

impl From<&OffsetRecord> for BiasOffsets {
    fn from(record: &OffsetRecord) -> Self {
        BiasOffsets::new(decode(&record.accel), decode(&record.mag))
    }
}

/// Trait implementation to support serialization for `sequential_storage`.
impl<'a> sequential_storage::map::Value<'a> for StorageData {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, SerializationError> {
        postcard::to_slice(self, buffer)
            .map_err(|_| SerializationError::BufferTooSmall)
            .map(|slice| slice.len())
    }

    fn deserialize_from(
        buffer: &'a [u8],
    ) -> Result<(Self, usize), SerializationError> {
        postcard::take_from_bytes(buffer)
            .map(|(v, rest)| (v, buffer.len() - rest.len()))
            .map_err(|_| SerializationError::InvalidFormat)
    }
}

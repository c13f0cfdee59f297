/// Keys of the items kept in the storage partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageKey {
    BiasOffsets,
}

impl From<StorageKey> for u16 {
    fn from(key: StorageKey) -> u16 {
        match key {
            StorageKey::BiasOffsets => 0x0100,
        }
    }
}

use core::ops::Range;

use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{MapConfig, MapStorage};

use super::data::{OffsetRecord, StorageData};
use super::keys::StorageKey;
use crate::capabilities::OffsetStore;
use crate::types::BiasOffsets;

#[derive(Debug, derive_more::From)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError<E> {
    Storage(sequential_storage::Error<E>),
}

/// [`OffsetStore`] backed by a key/value map on NOR flash.
///
/// `N` is the size of the item scratch buffer.
pub struct FlashOffsetStore<Flash: NorFlash, const N: usize> {
    map: MapStorage<u16, Flash, NoCache>,
    buffer: [u8; N],
    cached: Option<BiasOffsets>,
}

impl<Flash: NorFlash, const N: usize> FlashOffsetStore<Flash, N> {
    /// `range` is the flash address range reserved for the map. It must span
    /// at least two erase pages.
    pub fn new(flash: Flash, range: Range<u32>) -> Self {
        let config = MapConfig::new(range);
        Self {
            map: MapStorage::new(flash, config, NoCache::new()),
            buffer: [0; N],
            cached: None,
        }
    }

    async fn load(
        &mut self,
        key: u16,
    ) -> Result<Option<StorageData>, sequential_storage::Error<Flash::Error>>
    {
        self.map.fetch_item(&mut self.buffer, &key).await
    }

    async fn save(
        &mut self,
        value: &StorageData,
    ) -> Result<(), sequential_storage::Error<Flash::Error>> {
        self.map.store_item(&mut self.buffer, &value.key(), value).await
    }

    /// Last offsets loaded or saved through this store.
    pub fn cached(&self) -> Option<&BiasOffsets> {
        self.cached.as_ref()
    }
}

impl<Flash: NorFlash, const N: usize> OffsetStore
    for FlashOffsetStore<Flash, N>
{
    type Error = StoreError<Flash::Error>;

    async fn load_offsets(
        &mut self,
    ) -> Result<Option<BiasOffsets>, Self::Error> {
        if self.cached.is_none() {
            if let Some(StorageData::BiasOffsets(record)) =
                self.load(StorageKey::BiasOffsets.into()).await?
            {
                self.cached = Some(BiasOffsets::from(&record));
            }
        }
        Ok(self.cached)
    }

    async fn save_offsets(
        &mut self,
        offsets: &BiasOffsets,
    ) -> Result<(), Self::Error> {
        let record = OffsetRecord::from(offsets);
        self.save(&StorageData::BiasOffsets(record)).await?;
        // Keep what a later load would return, not the unrounded input.
        self.cached = Some(BiasOffsets::from(&record));
        Ok(())
    }
}

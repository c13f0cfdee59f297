use core::ops::Range;
use core::ptr::addr_of;

use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::peripherals::NVMC;
use embassy_nrf::Peri;
use orientation::FlashOffsetStore;

const OFFSET_BUF_SZ: usize = 256;

pub type AppFlash = BlockingAsync<Nvmc<'static>>;
pub type AppOffsetStore = FlashOffsetStore<AppFlash, OFFSET_BUF_SZ>;

/// Flash reserved for offsets by `memory.x`.
pub fn storage_range() -> Range<u32> {
    extern "C" {
        static __storage_start: u32;
        static __storage_end: u32;
    }

    unsafe {
        let start = addr_of!(__storage_start) as u32;
        let end = addr_of!(__storage_end) as u32;
        start..end
    }
}

pub fn offset_store(nvmc: Peri<'static, NVMC>) -> AppOffsetStore {
    let flash = BlockingAsync::new(Nvmc::new(nvmc));
    FlashOffsetStore::new(flash, storage_range())
}

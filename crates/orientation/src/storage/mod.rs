pub mod data;
pub mod keys;
pub mod offset_store;

pub use data::{OffsetRecord, StorageData};
pub use keys::StorageKey;
pub use offset_store::{FlashOffsetStore, StoreError};

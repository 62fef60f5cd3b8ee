//! Persistence for adapter state.

mod backend;
mod store;

pub use backend::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{DeviceStore, SELECTED_DEVICE_KEY};

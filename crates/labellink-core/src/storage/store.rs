//! Selected-device state.

use std::sync::RwLock;

use tracing::warn;

use crate::error::StorageError;
use crate::storage::KeyValueStorage;
use crate::types::Device;

/// Storage key holding the serialized selected device.
pub const SELECTED_DEVICE_KEY: &str = "selected_device";

/// Holds the currently selected printer and mirrors it to storage.
///
/// Construction restores the persisted selection; an absent or corrupt value
/// falls back to the empty device rather than failing. The selection is only
/// ever overwritten, never deleted.
pub struct DeviceStore {
    storage: Box<dyn KeyValueStorage>,
    current: RwLock<Device>,
}

impl DeviceStore {
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        let device = match storage.get(SELECTED_DEVICE_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "persisted device is corrupt, starting unselected");
                Device::default()
            }),
            Ok(None) => Device::default(),
            Err(e) => {
                warn!(error = %e, "failed to read persisted device, starting unselected");
                Device::default()
            }
        };

        Self {
            storage,
            current: RwLock::new(device),
        }
    }

    /// Replace the selected device and persist it.
    pub fn select(&self, device: Device) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&device)?;
        self.storage.set(SELECTED_DEVICE_KEY, &raw)?;

        let mut current = self
            .current
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *current = device;

        Ok(())
    }

    /// The currently selected device; empty if nothing was ever selected.
    pub fn current(&self) -> Device {
        self.current
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};

    fn make_device(name: &str) -> Device {
        Device {
            name: name.to_string(),
            device_type: "printer".to_string(),
            connection: "usb".to_string(),
            uid: format!("{}-uid", name),
            provider: "com.labellink".to_string(),
            manufacturer: "Zebra".to_string(),
            version: 0,
        }
    }

    #[test]
    fn starts_unselected_with_empty_storage() {
        let store = DeviceStore::new(Box::new(MemoryStorage::default()));
        assert_eq!(store.current(), Device::default());
    }

    #[test]
    fn select_updates_current() {
        let store = DeviceStore::new(Box::new(MemoryStorage::default()));
        let device = make_device("ZD410");

        store.select(device.clone()).unwrap();

        assert_eq!(store.current(), device);
    }

    #[test]
    fn selection_survives_reconstruction() {
        let tmp = tempfile::tempdir().unwrap();
        let device = make_device("ZD410");

        let store =
            DeviceStore::new(Box::new(FileStorage::new(tmp.path().to_path_buf()).unwrap()));
        store.select(device.clone()).unwrap();

        let reloaded =
            DeviceStore::new(Box::new(FileStorage::new(tmp.path().to_path_buf()).unwrap()));
        assert_eq!(reloaded.current(), device);
    }

    #[test]
    fn corrupt_persisted_value_yields_empty_device() {
        let storage = MemoryStorage::default();
        storage.set(SELECTED_DEVICE_KEY, "not json").unwrap();

        let store = DeviceStore::new(Box::new(storage));
        assert_eq!(store.current(), Device::default());
    }

    #[test]
    fn new_selection_overwrites_old() {
        let store = DeviceStore::new(Box::new(MemoryStorage::default()));

        store.select(make_device("old")).unwrap();
        store.select(make_device("new")).unwrap();

        assert_eq!(store.current().name, "new");
    }
}

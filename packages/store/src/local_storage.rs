//! # Browser local storage
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the **web platform**.
//! It forwards to `window.localStorage`, so a session written here lives as
//! long as the browser profile keeps it.
//!
//! Every call looks the storage object up again; it is not `Send` and cannot
//! be cached inside a `Clone` struct. When storage is unavailable (private
//! mode, sandboxed iframe) reads return `None` and writes do nothing.

use web_sys::Storage;

use crate::kv::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                tracing::warn!("localStorage rejected write for {}", key);
            }
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

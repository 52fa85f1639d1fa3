//! # Key-value persistence
//!
//! [`KeyValueStore`] is the string-slot abstraction the session layer persists
//! into. It has the shape of the browser's `localStorage`: string keys, string
//! values, and no error surface. Implementations live in sibling modules
//! ([`crate::memory`], [`crate::file_store`], and `local_storage` on the web).
//!
//! Backend failures are swallowed: reads return `None` and writes do nothing.
//! A broken or unavailable store degrades to "nothing persisted", which the
//! session layer already treats as logged out.

/// Synchronous string-keyed store.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) {
        (**self).remove_item(key)
    }
}

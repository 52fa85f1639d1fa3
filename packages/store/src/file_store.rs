//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that keeps every slot
//! in its own file. It is used by the terminal client so the session survives
//! between invocations.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── <key>.json          # raw slot value
//! ```
//!
//! Characters outside `[A-Za-z0-9_-]` in a key are replaced with `_` before
//! they become a filename.
//!
//! ## Platform data directories
//!
//! [`FileStore::in_data_dir`] uses [`dirs::data_dir()`] for the base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/data-catalog/` |
//! | Linux | `~/.local/share/data-catalog/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\data-catalog\` |

use std::path::{Path, PathBuf};

use crate::kv::KeyValueStore;

const APP_DIR: &str = "data-catalog";

/// Filesystem-backed KeyValueStore.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Store rooted at the platform data directory, or `./data-catalog` when
    /// the platform reports none.
    pub fn in_data_dir() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self::new(base)
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn item_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.item_path(key)).ok()
    }

    fn set_item(&self, key: &str, value: &str) {
        let path = self.item_path(key);
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(&path, value) {
            tracing::warn!("Failed to write {}: {}", path.display(), e);
        }
    }

    fn remove_item(&self, key: &str) {
        let path = self.item_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
        }
    }
}

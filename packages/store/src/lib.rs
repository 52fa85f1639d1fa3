pub mod config;
pub mod kv;
pub mod models;
pub mod session;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use config::{CatalogConfig, ConfigError};
pub use kv::KeyValueStore;
pub use models::{ApiMessage, ErrorBody, NewUser, Product, ProductId, TokenResponse, User};
pub use session::{Session, SessionProvider, SessionStore};

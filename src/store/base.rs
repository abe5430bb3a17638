use std::sync::Arc;

use tracing::info;

use super::{file_store::FileStore, memory_store::MemoryStore};
use crate::config::StoreConfig;

/// Key the auth token is stored under.
pub const AUTH_TOKEN_STORAGE_KEY: &str = "authToken";

/// The TokenStore trait abstracts where the auth token lives.
///
/// Only one token is live at a time: `set` overwrites, `delete` removes it.
/// Implementations log their own failures; a broken store behaves as empty.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn delete(&self);
}

/// Creates a concrete store implementation based on the StoreConfig.
pub fn create_store(config: &StoreConfig) -> Arc<dyn TokenStore> {
    match config {
        StoreConfig::Memory => {
            info!("Using in-memory token store.");
            Arc::new(MemoryStore::new())
        }
        StoreConfig::File(file_config) => {
            info!("Using file token store at {}", file_config.path.display());
            Arc::new(FileStore::new(file_config.path.clone()))
        }
    }
}

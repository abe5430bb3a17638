use std::sync::RwLock;

use super::TokenStore;

/// Keeps the token for the lifetime of the process.
///
/// Also stands in for the transient cookie an OAuth redirect leaves behind.
#[derive(Default)]
pub struct MemoryStore {
    token: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryStore {
    fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, token: &str) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
    }

    fn delete(&self) {
        self.token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
    }
}

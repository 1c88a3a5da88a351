//! Storage backend seam and the in-memory reference backend.

use std::collections::HashMap;
use std::sync::Mutex;

/// A physical key-value store for session tokens.
///
/// The facade in [`crate::store::TokenStore`] writes through two of these.
/// Hosts embed their own backends (browser storage, keychain) the same way
/// tests plug in [`MemoryStore`].
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Script-readable store backed by a mutex-guarded map. Survives for the
/// process lifetime, which is what "reload" means for a native host.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl StorageBackend for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}

#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

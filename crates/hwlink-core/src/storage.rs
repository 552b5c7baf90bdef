//! Durable key-value storage backing the disconnect shim flag.
//!
//! The store is injected at construction so browser hosts can supply
//! local storage while tests and non-browser hosts use [`MemoryStore`].

use std::collections::HashMap;
use std::sync::Mutex;

/// Fixed key under which the disconnect shim flag persists.
///
/// Present only while a relay-mediated session that cannot signal a real
/// disconnect is considered connected; absent means not shimmed.
pub const SHIM_DISCONNECT_KEY: &str = "hwlink.shimDisconnect";

/// Browser-scoped key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store. All data is lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get(SHIM_DISCONNECT_KEY).is_none());

        store.set(SHIM_DISCONNECT_KEY, "true");
        assert_eq!(store.get(SHIM_DISCONNECT_KEY).as_deref(), Some("true"));

        store.remove(SHIM_DISCONNECT_KEY);
        assert!(store.get(SHIM_DISCONNECT_KEY).is_none());
    }

    #[test]
    fn remove_missing_key_is_harmless() {
        let store = MemoryStore::new();
        store.remove("never-written");
    }
}

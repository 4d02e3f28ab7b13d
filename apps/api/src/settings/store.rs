//! Key/value persistence seam for settings, the anonymous id and drafts.
//!
//! `AppState` holds one `Arc<dyn SettingsStore>` backend shared by all
//! clients. Handlers never touch it directly: they work through a
//! `ScopedSettings` view that confines every key to one client.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
    /// All keys currently stored, in no particular order.
    fn keys(&self) -> Vec<String>;
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    fn clear(&self) {
        self.entries.write().clear();
    }
}

/// One client's slice of a shared backend. Keys are stored as
/// `client:{id}:{key}`; client ids cannot contain `:`, so scopes never overlap.
#[derive(Clone)]
pub struct ScopedSettings {
    backend: Arc<dyn SettingsStore>,
    prefix: String,
}

impl ScopedSettings {
    pub fn new(backend: Arc<dyn SettingsStore>, scope: &str) -> Self {
        Self {
            backend,
            prefix: format!("client:{scope}:"),
        }
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }
}

impl SettingsStore for ScopedSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.backend.get(&self.scoped(key))
    }

    fn set(&self, key: &str, value: String) {
        self.backend.set(&self.scoped(key), value);
    }

    fn remove(&self, key: &str) {
        self.backend.remove(&self.scoped(key));
    }

    fn keys(&self) -> Vec<String> {
        self.backend
            .keys()
            .into_iter()
            .filter_map(|k| k.strip_prefix(&self.prefix).map(str::to_string))
            .collect()
    }

    /// Clears this scope only.
    fn clear(&self) {
        for key in self.keys() {
            self.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.get("a"), None);

        store.set("a", "1".into());
        store.set("a", "2".into());
        assert_eq!(store.get("a").as_deref(), Some("2"));

        store.remove("a");
        assert_eq!(store.get("a"), None);
        store.remove("a");
    }

    #[test]
    fn test_keys_and_clear() {
        let store = MemorySettingsStore::new();
        store.set("x", String::new());
        store.set("y", String::new());

        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, vec!["x", "y"]);

        store.clear();
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_scopes_are_isolated() {
        let backend: Arc<dyn SettingsStore> = Arc::new(MemorySettingsStore::new());
        let alice = ScopedSettings::new(Arc::clone(&backend), "alice");
        let bob = ScopedSettings::new(Arc::clone(&backend), "bob");

        alice.set("draft", "a".into());
        assert_eq!(alice.get("draft").as_deref(), Some("a"));
        assert_eq!(bob.get("draft"), None);
        assert_eq!(alice.keys(), vec!["draft"]);
        assert!(bob.keys().is_empty());

        bob.set("draft", "b".into());
        alice.clear();
        assert_eq!(alice.get("draft"), None);
        assert_eq!(bob.get("draft").as_deref(), Some("b"));
        assert_eq!(backend.keys(), vec!["client:bob:draft"]);
    }

    #[test]
    fn test_scope_prefixes_do_not_leak() {
        let backend: Arc<dyn SettingsStore> = Arc::new(MemorySettingsStore::new());
        let short = ScopedSettings::new(Arc::clone(&backend), "a");
        let long = ScopedSettings::new(Arc::clone(&backend), "ab");

        long.set("k", "1".into());
        assert!(short.keys().is_empty());
        assert_eq!(short.get("k"), None);
    }
}

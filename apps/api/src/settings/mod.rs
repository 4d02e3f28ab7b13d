//! Client-scoped settings: anonymous id, privacy settings, resume draft.
//!
//! Every key this crate writes starts with `resume_lab_`, so project data can
//! be listed and wiped without touching anything else in a shared store.

pub mod client;
pub mod draft;
pub mod handlers;
pub mod privacy;
pub mod store;

use tracing::info;
use uuid::Uuid;

use store::SettingsStore;

pub const STORAGE_VERSION: &str = "1.0.0";

pub const KEY_PREFIX: &str = "resume_lab_";
pub const ANON_ID_KEY: &str = "resume_lab_anon_id";
pub const PRIVACY_SETTINGS_KEY: &str = "resume_lab_privacy_settings";
pub const STORAGE_VERSION_KEY: &str = "resume_lab_storage_version";
pub const RESUME_DRAFT_KEY: &str = "resume_lab_resume_draft";

pub fn anon_id(store: &dyn SettingsStore) -> Option<String> {
    store.get(ANON_ID_KEY).filter(|id| !id.is_empty())
}

pub fn get_or_create_anon_id(store: &dyn SettingsStore) -> String {
    if let Some(id) = anon_id(store) {
        return id;
    }
    let id = Uuid::new_v4().to_string();
    store.set(ANON_ID_KEY, id.clone());
    info!("Created anonymous id");
    id
}

/// Discards the current anonymous id and issues a fresh one.
pub fn reset_anon_id(store: &dyn SettingsStore) -> String {
    store.remove(ANON_ID_KEY);
    get_or_create_anon_id(store)
}

pub fn storage_version(store: &dyn SettingsStore) -> Option<String> {
    store.get(STORAGE_VERSION_KEY)
}

/// Stamps the store with the current storage version if it has none.
pub fn ensure_storage_version(store: &dyn SettingsStore) {
    if storage_version(store).is_none() {
        store.set(STORAGE_VERSION_KEY, STORAGE_VERSION.to_string());
    }
}

/// Keys belonging to this project, sorted.
pub fn project_storage_keys(store: &dyn SettingsStore) -> Vec<String> {
    let mut keys: Vec<String> = store
        .keys()
        .into_iter()
        .filter(|k| k.starts_with(KEY_PREFIX))
        .collect();
    keys.sort();
    keys
}

/// Removes every project key and returns how many were removed.
pub fn clear_project_data(store: &dyn SettingsStore) -> usize {
    let keys = project_storage_keys(store);
    for key in &keys {
        store.remove(key);
    }
    info!("Cleared {} project storage keys", keys.len());
    keys.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemorySettingsStore;

    #[test]
    fn test_anon_id_is_stable_until_reset() {
        let store = MemorySettingsStore::new();
        assert!(anon_id(&store).is_none());

        let first = get_or_create_anon_id(&store);
        assert!(Uuid::parse_str(&first).is_ok());
        assert_eq!(get_or_create_anon_id(&store), first);

        let second = reset_anon_id(&store);
        assert_ne!(second, first);
        assert_eq!(anon_id(&store), Some(second));
    }

    #[test]
    fn test_empty_anon_id_counts_as_missing() {
        let store = MemorySettingsStore::new();
        store.set(ANON_ID_KEY, String::new());
        assert!(anon_id(&store).is_none());
        assert!(!get_or_create_anon_id(&store).is_empty());
    }

    #[test]
    fn test_storage_version_is_set_once() {
        let store = MemorySettingsStore::new();
        ensure_storage_version(&store);
        assert_eq!(storage_version(&store).as_deref(), Some(STORAGE_VERSION));

        store.set(STORAGE_VERSION_KEY, "0.1.0".into());
        ensure_storage_version(&store);
        assert_eq!(storage_version(&store).as_deref(), Some("0.1.0"));
    }

    #[test]
    fn test_clear_project_data_leaves_foreign_keys() {
        let store = MemorySettingsStore::new();
        get_or_create_anon_id(&store);
        ensure_storage_version(&store);
        store.set("resume_lab_custom", "x".into());
        store.set("other_app_token", "keep".into());

        assert_eq!(
            project_storage_keys(&store),
            vec![
                "resume_lab_anon_id",
                "resume_lab_custom",
                "resume_lab_storage_version"
            ]
        );

        assert_eq!(clear_project_data(&store), 3);
        assert!(project_storage_keys(&store).is_empty());
        assert_eq!(store.get("other_app_token").as_deref(), Some("keep"));
    }
}

//! Privacy settings. Telemetry is opt-in: absent or unreadable settings mean
//! telemetry is off.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::settings::store::SettingsStore;
use crate::settings::PRIVACY_SETTINGS_KEY;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacySettings {
    #[serde(default)]
    pub telemetry_enabled: bool,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PrivacySettingsPatch {
    pub telemetry_enabled: Option<bool>,
}

pub fn get_privacy_settings(store: &dyn SettingsStore) -> PrivacySettings {
    let Some(raw) = store.get(PRIVACY_SETTINGS_KEY) else {
        return PrivacySettings::default();
    };

    match serde_json::from_str(&raw) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Ignoring malformed privacy settings: {e}");
            PrivacySettings::default()
        }
    }
}

/// Merges `patch` into the stored settings and returns the result.
pub fn save_privacy_settings(
    store: &dyn SettingsStore,
    patch: PrivacySettingsPatch,
) -> Result<PrivacySettings> {
    let mut settings = get_privacy_settings(store);
    if let Some(enabled) = patch.telemetry_enabled {
        settings.telemetry_enabled = enabled;
    }

    let raw = serde_json::to_string(&settings).context("Failed to serialize privacy settings")?;
    store.set(PRIVACY_SETTINGS_KEY, raw);
    Ok(settings)
}

pub fn is_telemetry_enabled(store: &dyn SettingsStore) -> bool {
    get_privacy_settings(store).telemetry_enabled
}

pub fn set_telemetry_enabled(store: &dyn SettingsStore, enabled: bool) -> Result<PrivacySettings> {
    save_privacy_settings(
        store,
        PrivacySettingsPatch {
            telemetry_enabled: Some(enabled),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::store::MemorySettingsStore;

    #[test]
    fn test_defaults_to_disabled() {
        let store = MemorySettingsStore::new();
        assert_eq!(get_privacy_settings(&store), PrivacySettings::default());
        assert!(!is_telemetry_enabled(&store));
    }

    #[test]
    fn test_set_and_read_back() {
        let store = MemorySettingsStore::new();
        set_telemetry_enabled(&store, true).unwrap();
        assert!(is_telemetry_enabled(&store));
        set_telemetry_enabled(&store, false).unwrap();
        assert!(!is_telemetry_enabled(&store));
    }

    #[test]
    fn test_empty_patch_keeps_stored_value() {
        let store = MemorySettingsStore::new();
        set_telemetry_enabled(&store, true).unwrap();
        let merged = save_privacy_settings(&store, PrivacySettingsPatch::default()).unwrap();
        assert!(merged.telemetry_enabled);
    }

    #[test]
    fn test_malformed_settings_fall_back_to_default() {
        let store = MemorySettingsStore::new();
        store.set(PRIVACY_SETTINGS_KEY, "{not json".into());
        assert!(!is_telemetry_enabled(&store));

        // saving over garbage repairs it
        set_telemetry_enabled(&store, true).unwrap();
        assert!(is_telemetry_enabled(&store));
    }

    #[test]
    fn test_missing_field_defaults_to_disabled() {
        let store = MemorySettingsStore::new();
        store.set(PRIVACY_SETTINGS_KEY, "{}".into());
        assert!(!is_telemetry_enabled(&store));
    }
}

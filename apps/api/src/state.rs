use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::bullets::BulletLibrary;
use crate::config::Config;
use crate::dictionary::DictionaryCatalog;
use crate::settings::client::ClientId;
use crate::settings::privacy::set_telemetry_enabled;
use crate::settings::store::{MemorySettingsStore, ScopedSettings, SettingsStore};
use crate::settings::{ensure_storage_version, get_or_create_anon_id, PRIVACY_SETTINGS_KEY};
use crate::telemetry::sink::{EventSink, TracingEventSink};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built-in skill dictionaries, immutable after startup.
    pub dictionaries: Arc<DictionaryCatalog>,
    pub bullets: Arc<BulletLibrary>,
    /// Pluggable settings backend shared by all clients. Default: in-memory.
    /// Reach it through `client_settings`.
    pub settings: Arc<dyn SettingsStore>,
    /// Pluggable telemetry sink. Default: structured log lines.
    pub telemetry: Arc<dyn EventSink>,
}

impl AppState {
    /// Loads the embedded dictionaries and templates and wires the default
    /// in-memory settings store and tracing sink.
    pub fn builtin(config: Config) -> Result<Self> {
        let settings: Arc<dyn SettingsStore> = Arc::new(MemorySettingsStore::new());
        Self::with_backends(config, settings, Arc::new(TracingEventSink))
    }

    pub fn with_backends(
        config: Config,
        settings: Arc<dyn SettingsStore>,
        telemetry: Arc<dyn EventSink>,
    ) -> Result<Self> {
        let dictionaries = Arc::new(DictionaryCatalog::builtin()?);
        let bullets = Arc::new(BulletLibrary::builtin()?);

        info!(
            "Telemetry default for new clients: {}",
            if config.telemetry_enabled { "opted in" } else { "opted out" }
        );

        Ok(Self {
            config,
            dictionaries,
            bullets,
            settings,
            telemetry,
        })
    }

    /// The settings scope for one client. A scope with no saved privacy
    /// settings starts from the configured telemetry default.
    pub fn client_settings(&self, client: &ClientId) -> Result<ScopedSettings> {
        let scope = ScopedSettings::new(Arc::clone(&self.settings), client.as_str());
        ensure_storage_version(&scope);
        if self.config.telemetry_enabled && scope.get(PRIVACY_SETTINGS_KEY).is_none() {
            set_telemetry_enabled(&scope, true)?;
            get_or_create_anon_id(&scope);
        }
        Ok(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::privacy::is_telemetry_enabled;
    use crate::settings::anon_id;

    fn client(id: &str) -> ClientId {
        ClientId::parse(id).unwrap()
    }

    #[test]
    fn test_clients_do_not_share_settings() {
        let state = AppState::builtin(Config::default()).unwrap();
        let a = state.client_settings(&client("a")).unwrap();
        set_telemetry_enabled(&a, true).unwrap();
        get_or_create_anon_id(&a);

        let b = state.client_settings(&client("b")).unwrap();
        assert!(!is_telemetry_enabled(&b));
        assert!(anon_id(&b).is_none());
        assert!(is_telemetry_enabled(&state.client_settings(&client("a")).unwrap()));
    }

    #[test]
    fn test_configured_default_applies_per_client() {
        let config = Config {
            telemetry_enabled: true,
            ..Config::default()
        };
        let state = AppState::builtin(config).unwrap();

        let a = state.client_settings(&client("a")).unwrap();
        set_telemetry_enabled(&a, false).unwrap();

        let b = state.client_settings(&client("b")).unwrap();
        assert!(is_telemetry_enabled(&b));
        assert!(anon_id(&b).is_some());
        assert!(!is_telemetry_enabled(&state.client_settings(&client("a")).unwrap()));
    }
}

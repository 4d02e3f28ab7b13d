//! Axum route handlers for privacy settings and the resume draft.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::errors::AppError;
use crate::settings::client::ClientId;
use crate::settings::draft::{clear_resume_draft, load_resume_draft, save_resume_draft, ResumeDraft};
use crate::settings::privacy::{get_privacy_settings, save_privacy_settings, PrivacySettings, PrivacySettingsPatch};
use crate::settings::store::ScopedSettings;
use crate::settings::{anon_id, clear_project_data, get_or_create_anon_id, reset_anon_id};
use crate::state::AppState;
use crate::telemetry::{spawn_event, track_event, EventType};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PrivacyResponse {
    pub settings: PrivacySettings,
    pub anon_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnonIdResponse {
    pub anon_id: String,
}

#[derive(Debug, Serialize)]
pub struct ClearDataResponse {
    pub removed_keys: usize,
}

#[derive(Debug, Deserialize)]
pub struct SaveDraftRequest {
    pub resume: Value,
}

fn properties(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn privacy_response(settings: &ScopedSettings) -> PrivacyResponse {
    PrivacyResponse {
        settings: get_privacy_settings(settings),
        anon_id: anon_id(settings),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Privacy
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/privacy
pub async fn handle_get_privacy(
    State(state): State<AppState>,
    client: ClientId,
) -> Result<Json<PrivacyResponse>, AppError> {
    let settings = state.client_settings(&client)?;
    Ok(Json(privacy_response(&settings)))
}

/// PUT /api/v1/privacy
///
/// Opting in also issues the anonymous id that telemetry is reported under.
pub async fn handle_update_privacy(
    State(state): State<AppState>,
    client: ClientId,
    Json(patch): Json<PrivacySettingsPatch>,
) -> Result<Json<PrivacyResponse>, AppError> {
    let settings = state.client_settings(&client)?;
    let saved = save_privacy_settings(&settings, patch)?;
    if saved.telemetry_enabled {
        get_or_create_anon_id(&settings);
    }

    let action = if saved.telemetry_enabled { "enable_telemetry" } else { "disable_telemetry" };
    spawn_event(
        &state,
        &settings,
        EventType::ClickPrivacySetting,
        properties(json!({ "component": "privacy", "action": action })),
    );

    Ok(Json(privacy_response(&settings)))
}

/// POST /api/v1/privacy/anon-id
pub async fn handle_reset_anon_id(
    State(state): State<AppState>,
    client: ClientId,
) -> Result<Json<AnonIdResponse>, AppError> {
    let settings = state.client_settings(&client)?;
    let anon_id = reset_anon_id(&settings);
    spawn_event(
        &state,
        &settings,
        EventType::ClickResetAnonId,
        properties(json!({ "component": "privacy" })),
    );
    Ok(Json(AnonIdResponse { anon_id }))
}

/// DELETE /api/v1/privacy/data
///
/// The clear event is recorded before the data goes, since it is reported
/// under the id being removed. Only the calling client's keys are cleared.
pub async fn handle_clear_data(
    State(state): State<AppState>,
    client: ClientId,
) -> Result<Json<ClearDataResponse>, AppError> {
    let settings = state.client_settings(&client)?;
    if let Err(e) = track_event(
        &settings,
        state.telemetry.as_ref(),
        EventType::ClickClearData,
        &properties(json!({ "component": "privacy" })),
    )
    .await
    {
        warn!("Failed to record clear-data event: {e:#}");
    }

    let removed_keys = clear_project_data(&settings);
    Ok(Json(ClearDataResponse { removed_keys }))
}

// ────────────────────────────────────────────────────────────────────────────
// Resume draft
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/draft
pub async fn handle_load_draft(
    State(state): State<AppState>,
    client: ClientId,
) -> Result<Json<ResumeDraft>, AppError> {
    let settings = state.client_settings(&client)?;
    let draft = load_resume_draft(&settings)
        .ok_or_else(|| AppError::NotFound("No saved resume draft".to_string()))?;
    spawn_event(&state, &settings, EventType::ClickLoadDraft, Map::new());
    Ok(Json(draft))
}

/// PUT /api/v1/draft
pub async fn handle_save_draft(
    State(state): State<AppState>,
    client: ClientId,
    Json(request): Json<SaveDraftRequest>,
) -> Result<Json<ResumeDraft>, AppError> {
    if !request.resume.is_object() {
        return Err(AppError::Validation("resume must be a JSON object".to_string()));
    }
    let settings = state.client_settings(&client)?;
    let draft = save_resume_draft(&settings, request.resume)?;
    spawn_event(&state, &settings, EventType::ClickSaveDraft, Map::new());
    Ok(Json(draft))
}

/// DELETE /api/v1/draft
pub async fn handle_clear_draft(
    State(state): State<AppState>,
    client: ClientId,
) -> Result<Json<Value>, AppError> {
    let settings = state.client_settings(&client)?;
    clear_resume_draft(&settings);
    spawn_event(&state, &settings, EventType::ClickClearDraft, Map::new());
    Ok(Json(json!({ "success": true })))
}

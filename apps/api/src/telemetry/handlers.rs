//! Axum route handlers for telemetry ingestion.

use axum::{extract::State, http::HeaderMap, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;
use crate::telemetry::{
    validate_event, validate_resume_stats, EventRecord, ResumeStats, ResumeStatsRecord,
    TelemetryRecord,
};

const DEFAULT_IP: &str = "127.0.0.1";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TrackEventRequest {
    pub anon_id: String,
    pub event_type: String,
    #[serde(default)]
    pub event_properties: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeStatsRequest {
    pub anon_id: String,
    #[serde(flatten)]
    pub stats: ResumeStats,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Client address as reported by a proxy, falling back to loopback.
fn client_ip(headers: &HeaderMap) -> String {
    header_str(headers, "x-forwarded-for")
        .or_else(|| header_str(headers, "x-real-ip"))
        .unwrap_or(DEFAULT_IP)
        .to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/track
pub async fn handle_track_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<TrackEventRequest>,
) -> Result<Json<Value>, AppError> {
    validate_event(&request.anon_id, &request.event_type, &request.event_properties)
        .map_err(AppError::Validation)?;

    let record = EventRecord {
        anon_id: request.anon_id,
        event_type: request.event_type,
        properties: request.event_properties,
        user_agent: header_str(&headers, "user-agent").unwrap_or_default().to_string(),
        ip_address: client_ip(&headers),
        received_at: Utc::now(),
    };

    state
        .telemetry
        .record(TelemetryRecord::Event(record))
        .await
        .map_err(|e| AppError::Telemetry(format!("{e:#}")))?;

    Ok(Json(json!({ "success": true })))
}

/// POST /api/v1/resume-stats
pub async fn handle_resume_stats(
    State(state): State<AppState>,
    Json(request): Json<ResumeStatsRequest>,
) -> Result<Json<Value>, AppError> {
    validate_resume_stats(&request.anon_id, &request.stats).map_err(AppError::Validation)?;
    debug!("Ingesting resume stats: {}", request.stats.summary());

    let record = ResumeStatsRecord {
        anon_id: request.anon_id,
        stats: request.stats,
        received_at: Utc::now(),
    };

    state
        .telemetry
        .record(TelemetryRecord::ResumeStats(record))
        .await
        .map_err(|e| AppError::Telemetry(format!("{e:#}")))?;

    Ok(Json(json!({ "success": true })))
}

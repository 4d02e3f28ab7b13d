//! Telemetry: anonymous usage events and resume statistics.
//!
//! Two paths feed the sink:
//! - ingestion (`POST /api/v1/track`, `POST /api/v1/resume-stats`) validates
//!   client-submitted records and forwards them;
//! - `track_event` / `track_resume_stats` emit records for work done by this
//!   service, and only when the privacy settings opt in and an anonymous id exists.
//!
//! Property maps are reduced to an allow-list of scalar values so free text
//! such as resume content never reaches the sink.

pub mod handlers;
pub mod sink;

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::extract::edu::EducationLevel;
use crate::extract::exp::ExperienceBucket;
use crate::settings::privacy::is_telemetry_enabled;
use crate::settings::store::{ScopedSettings, SettingsStore};
use crate::state::AppState;
use sink::EventSink;

pub const MAX_ANON_ID_CHARS: usize = 255;
pub const MAX_EVENT_TYPE_CHARS: usize = 100;
pub const MAX_PROPERTY_CHARS: usize = 500;
pub const MAX_TARGET_ROLE_CHARS: usize = 100;
pub const MAX_TAG_CHARS: usize = 100;
pub const MAX_MATCH_SCORE: u32 = 100;

const INTERNAL_IP: &str = "127.0.0.1";

pub const ALLOWED_PROPERTY_KEYS: &[&str] = &[
    "page",
    "component",
    "action",
    "target_role",
    "edu_level",
    "exp_bucket",
    "jd_match_score",
    "skill_count",
    "missing_count",
    "button_type",
    "tab",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PageView,
    ClickAnalyze,
    ClickExportPdf,
    ClickExportWord,
    ClickSaveDraft,
    ClickLoadDraft,
    ClickClearDraft,
    ClickPrivacySetting,
    ClickResetAnonId,
    ClickClearData,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::PageView => "page_view",
            EventType::ClickAnalyze => "click_analyze",
            EventType::ClickExportPdf => "click_export_pdf",
            EventType::ClickExportWord => "click_export_word",
            EventType::ClickSaveDraft => "click_save_draft",
            EventType::ClickLoadDraft => "click_load_draft",
            EventType::ClickClearDraft => "click_clear_draft",
            EventType::ClickPrivacySetting => "click_privacy_setting",
            EventType::ClickResetAnonId => "click_reset_anon_id",
            EventType::ClickClearData => "click_clear_data",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub anon_id: String,
    pub event_type: String,
    pub properties: Map<String, Value>,
    pub user_agent: String,
    pub ip_address: String,
    pub received_at: DateTime<Utc>,
}

/// Aggregate-friendly snapshot of one analysis. No free text besides the
/// target role, and tags are capped in length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeStats {
    pub target_role: Option<String>,
    pub edu_level: Option<EducationLevel>,
    pub exp_bucket: Option<ExperienceBucket>,
    pub jd_match_score: Option<u32>,
    #[serde(default)]
    pub skill_tags: Vec<String>,
    #[serde(default)]
    pub missing_tags: Vec<String>,
}

impl ResumeStats {
    /// One-line digest for debug logs, e.g. `edu=benke exp=1-3 score=72 skills=4 missing=2`.
    pub fn summary(&self) -> String {
        format!(
            "edu={} exp={} score={} skills={} missing={}",
            self.edu_level.as_ref().map_or("-", EducationLevel::as_str),
            self.exp_bucket.as_ref().map_or("-", ExperienceBucket::as_str),
            self.jd_match_score.map_or_else(|| "-".to_string(), |s| s.to_string()),
            self.skill_tags.len(),
            self.missing_tags.len(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeStatsRecord {
    pub anon_id: String,
    #[serde(flatten)]
    pub stats: ResumeStats,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TelemetryRecord {
    Event(EventRecord),
    ResumeStats(ResumeStatsRecord),
}

impl TelemetryRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            TelemetryRecord::Event(_) => "event",
            TelemetryRecord::ResumeStats(_) => "resume_stats",
        }
    }

    pub fn anon_id(&self) -> &str {
        match self {
            TelemetryRecord::Event(r) => &r.anon_id,
            TelemetryRecord::ResumeStats(r) => &r.anon_id,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sanitizing and validation
// ────────────────────────────────────────────────────────────────────────────

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Keeps allow-listed keys whose values are strings, numbers or booleans.
pub fn sanitize_properties(properties: &Map<String, Value>) -> Map<String, Value> {
    properties
        .iter()
        .filter(|(key, value)| ALLOWED_PROPERTY_KEYS.contains(&key.as_str()) && is_scalar(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn validate_anon_id(anon_id: &str) -> Result<(), String> {
    if anon_id.is_empty() {
        return Err("anon_id cannot be empty".to_string());
    }
    if anon_id.chars().count() > MAX_ANON_ID_CHARS {
        return Err(format!("anon_id exceeds {MAX_ANON_ID_CHARS} characters"));
    }
    Ok(())
}

pub fn validate_event(
    anon_id: &str,
    event_type: &str,
    properties: &Map<String, Value>,
) -> Result<(), String> {
    validate_anon_id(anon_id)?;

    let type_len = event_type.chars().count();
    if type_len == 0 || type_len > MAX_EVENT_TYPE_CHARS {
        return Err(format!(
            "event_type must be 1 to {MAX_EVENT_TYPE_CHARS} characters"
        ));
    }

    for (key, value) in properties {
        if !is_scalar(value) {
            return Err(format!("Property {key} must be a string, number or boolean"));
        }
        if let Value::String(s) = value {
            if s.chars().count() > MAX_PROPERTY_CHARS {
                return Err(format!("Property {key} contains suspiciously long text"));
            }
        }
    }
    Ok(())
}

pub fn validate_resume_stats(anon_id: &str, stats: &ResumeStats) -> Result<(), String> {
    validate_anon_id(anon_id)?;

    if let Some(role) = &stats.target_role {
        if role.chars().count() > MAX_TARGET_ROLE_CHARS {
            return Err(format!("target_role exceeds {MAX_TARGET_ROLE_CHARS} characters"));
        }
    }
    if let Some(score) = stats.jd_match_score {
        if score > MAX_MATCH_SCORE {
            return Err(format!("jd_match_score must be between 0 and {MAX_MATCH_SCORE}"));
        }
    }
    for tag in stats.skill_tags.iter().chain(&stats.missing_tags) {
        if tag.chars().count() > MAX_TAG_CHARS {
            return Err(format!("Tags must be at most {MAX_TAG_CHARS} characters"));
        }
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Opt-in tracking
// ────────────────────────────────────────────────────────────────────────────

/// The anonymous id to report under, or `None` when tracking is off.
fn tracking_id(settings: &dyn SettingsStore) -> Option<String> {
    if !is_telemetry_enabled(settings) {
        return None;
    }
    let id = crate::settings::anon_id(settings);
    if id.is_none() {
        debug!("Telemetry enabled but no anonymous id; skipping");
    }
    id
}

/// Records `event_type` if the user opted in. Returns whether a record was sent.
pub async fn track_event(
    settings: &dyn SettingsStore,
    sink: &dyn EventSink,
    event_type: EventType,
    properties: &Map<String, Value>,
) -> Result<bool> {
    let Some(anon_id) = tracking_id(settings) else {
        return Ok(false);
    };

    let record = EventRecord {
        anon_id,
        event_type: event_type.as_str().to_string(),
        properties: sanitize_properties(properties),
        user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        ip_address: INTERNAL_IP.to_string(),
        received_at: Utc::now(),
    };
    sink.record(TelemetryRecord::Event(record)).await?;
    Ok(true)
}

/// Records resume statistics if the user opted in. Returns whether a record was sent.
pub async fn track_resume_stats(
    settings: &dyn SettingsStore,
    sink: &dyn EventSink,
    stats: ResumeStats,
) -> Result<bool> {
    let Some(anon_id) = tracking_id(settings) else {
        return Ok(false);
    };

    debug!("Recording resume stats: {}", stats.summary());
    let record = ResumeStatsRecord {
        anon_id,
        stats,
        received_at: Utc::now(),
    };
    sink.record(TelemetryRecord::ResumeStats(record)).await?;
    Ok(true)
}

/// Fire-and-forget `track_event` for one client; failures are logged, never surfaced.
pub fn spawn_event(
    state: &AppState,
    settings: &ScopedSettings,
    event_type: EventType,
    properties: Map<String, Value>,
) {
    let settings = settings.clone();
    let sink = Arc::clone(&state.telemetry);
    tokio::spawn(async move {
        if let Err(e) = track_event(&settings, sink.as_ref(), event_type, &properties).await {
            warn!("Failed to record {} event: {e:#}", event_type.as_str());
        }
    });
}

/// Fire-and-forget `track_resume_stats` for one client; failures are logged, never surfaced.
pub fn spawn_resume_stats(state: &AppState, settings: &ScopedSettings, stats: ResumeStats) {
    let settings = settings.clone();
    let sink = Arc::clone(&state.telemetry);
    tokio::spawn(async move {
        if let Err(e) = track_resume_stats(&settings, sink.as_ref(), stats).await {
            warn!("Failed to record resume stats: {e:#}");
        }
    });
}

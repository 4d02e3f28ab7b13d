//! Axum route handlers for the Scoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::dictionary::Domain;
use crate::errors::AppError;
use crate::extract::edu::{extract_edu, EducationLevel};
use crate::extract::exp::{extract_exp_bucket, ExperienceBucket};
use crate::scoring::score::{calculate_jd_score, score_against, ResumeProfile, ScoringResult, TagSets};
use crate::scoring::suggest::generate_suggestions;
use crate::settings::client::ClientId;
use crate::state::AppState;
use crate::telemetry::{
    spawn_event, spawn_resume_stats, EventType, ResumeStats, MAX_TARGET_ROLE_CHARS,
};

const MAX_SUGGESTIONS_CAP: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub jd_text: String,
    #[serde(default)]
    pub profile: ResumeProfile,
    #[serde(default)]
    pub domains: Vec<Domain>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionsRequest {
    pub result: ScoringResult,
    pub max_suggestions: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct JdMatchRequest {
    pub jd_text: String,
    pub resume_text: String,
    #[serde(default)]
    pub domains: Vec<Domain>,
    pub target_role: Option<String>,
    pub max_suggestions: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct JdMatchResponse {
    pub profile: ResumeProfile,
    pub edu_level: EducationLevel,
    pub exp_bucket: ExperienceBucket,
    /// What the JD asks for, before comparison with the resume.
    pub jd_tags: TagSets,
    pub result: ScoringResult,
    pub suggestions: Vec<String>,
}

/// Resolves the requested suggestion count against the configured default.
fn suggestion_limit(state: &AppState, requested: Option<usize>) -> Result<usize, AppError> {
    let max = requested.unwrap_or(state.config.max_suggestions);
    if max > MAX_SUGGESTIONS_CAP {
        return Err(AppError::Validation(format!(
            "max_suggestions must be at most {MAX_SUGGESTIONS_CAP}"
        )));
    }
    Ok(max)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoringResult>, AppError> {
    let dictionaries = state.dictionaries.select(&request.domains);
    let result = calculate_jd_score(&request.jd_text, &request.profile, &dictionaries);
    Ok(Json(result))
}

/// POST /api/v1/suggestions
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Json(request): Json<SuggestionsRequest>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let max = suggestion_limit(&state, request.max_suggestions)?;
    Ok(Json(SuggestionsResponse {
        suggestions: generate_suggestions(&request.result, max),
    }))
}

/// POST /api/v1/jd-match
///
/// Full pipeline: extract a profile from the resume, score it against the JD
/// and suggest edits. When the calling client (`X-Client-Id`) has opted in, an
/// analyze event and a resume-stats record (tags and buckets only, never text)
/// are emitted in the background. Without a client id nothing is emitted.
pub async fn handle_jd_match(
    State(state): State<AppState>,
    client: Option<ClientId>,
    Json(request): Json<JdMatchRequest>,
) -> Result<Json<JdMatchResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    if let Some(role) = &request.target_role {
        if role.chars().count() > MAX_TARGET_ROLE_CHARS {
            return Err(AppError::Validation(format!(
                "target_role exceeds {MAX_TARGET_ROLE_CHARS} characters"
            )));
        }
    }
    let max = suggestion_limit(&state, request.max_suggestions)?;

    let dictionaries = state.dictionaries.select(&request.domains);
    let profile = ResumeProfile::from_text(&request.resume_text, &dictionaries);
    let edu_level = extract_edu(&request.resume_text);
    let exp_bucket = extract_exp_bucket(&request.resume_text);

    let jd_tags = TagSets::from_jd(&request.jd_text, &dictionaries);
    let result = score_against(&request.jd_text, &jd_tags, &profile);
    let suggestions = generate_suggestions(&result, max);

    if let Some(client) = client {
        let settings = state.client_settings(&client)?;
        let properties = match json!({
            "page": "jd_match",
            "action": "analyze",
            "jd_match_score": result.total_score,
            "skill_count": profile.tech.len(),
            "missing_count": result.missing.tech.len(),
        }) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        spawn_event(&state, &settings, EventType::ClickAnalyze, properties);
        spawn_resume_stats(
            &state,
            &settings,
            ResumeStats {
                target_role: request.target_role.clone(),
                edu_level: Some(edu_level),
                exp_bucket: Some(exp_bucket),
                jd_match_score: Some(result.total_score),
                skill_tags: profile.tech.clone(),
                missing_tags: result.missing.tech.clone(),
            },
        );
    }

    Ok(Json(JdMatchResponse {
        profile,
        edu_level,
        exp_bucket,
        jd_tags,
        result,
        suggestions,
    }))
}

//! Axum route handlers for the Extraction API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::dictionary::{Domain, DomainSummary};
use crate::errors::AppError;
use crate::extract::edu::{extract_edu, EducationLevel};
use crate::extract::exp::{extract_exp_bucket, ExperienceBucket};
use crate::extract::skills::extract_skills;
use crate::extract::tags::{extract_role_tags, extract_scene_tags};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
    /// Dictionaries to match against. Empty means every built-in domain.
    #[serde(default)]
    pub domains: Vec<Domain>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub skills: Vec<String>,
    pub edu_level: EducationLevel,
    pub exp_bucket: ExperienceBucket,
    pub role_tags: Vec<String>,
    pub scene_tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DictionariesResponse {
    pub domains: Vec<DomainSummary>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/dictionaries
pub async fn handle_list_dictionaries(State(state): State<AppState>) -> Json<DictionariesResponse> {
    Json(DictionariesResponse {
        domains: state.dictionaries.summaries(),
    })
}

/// POST /api/v1/extract
///
/// Runs every extractor over one text. Empty text is valid and yields empty
/// lists and `unknown` levels.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let dictionaries = state.dictionaries.select(&request.domains);
    let text = request.text.as_str();

    Ok(Json(ExtractResponse {
        skills: extract_skills(text, &dictionaries),
        edu_level: extract_edu(text),
        exp_bucket: extract_exp_bucket(text),
        role_tags: extract_role_tags(text),
        scene_tags: extract_scene_tags(text),
    }))
}

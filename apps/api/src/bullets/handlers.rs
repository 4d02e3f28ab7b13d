//! Axum route handlers for the Bullets API.

use axum::{extract::State, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::bullets::{BulletGenerationResult, ProjectType};
use crate::dictionary::Domain;
use crate::errors::AppError;
use crate::state::AppState;

const MAX_TECH_TAGS: usize = 20;
const MAX_TAG_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
pub struct GenerateBulletsRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub project_type: ProjectType,
    pub style: Domain,
    #[serde(default)]
    pub tech_tags: Vec<String>,
    /// Fixes the random draw, mainly for reproducible previews.
    pub seed: Option<u64>,
}

/// POST /api/v1/bullets
pub async fn handle_generate_bullets(
    State(state): State<AppState>,
    Json(request): Json<GenerateBulletsRequest>,
) -> Result<Json<BulletGenerationResult>, AppError> {
    if request.tech_tags.len() > MAX_TECH_TAGS {
        return Err(AppError::Validation(format!(
            "At most {MAX_TECH_TAGS} tech_tags are allowed"
        )));
    }
    if let Some(tag) = request
        .tech_tags
        .iter()
        .find(|t| t.chars().count() > MAX_TAG_CHARS)
    {
        return Err(AppError::Validation(format!(
            "tech tag '{}…' exceeds {MAX_TAG_CHARS} characters",
            tag.chars().take(20).collect::<String>()
        )));
    }

    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = state.bullets.generate_bullets(
        &request.description,
        request.project_type,
        request.style,
        &request.tech_tags,
        &mut rng,
    );

    Ok(Json(result))
}

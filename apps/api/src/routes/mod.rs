pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::bullets::handlers as bullets;
use crate::extract::handlers as extract;
use crate::scoring::handlers as scoring;
use crate::settings::handlers as settings;
use crate::state::AppState;
use crate::telemetry::handlers as telemetry;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction
        .route(
            "/api/v1/dictionaries",
            get(extract::handle_list_dictionaries),
        )
        .route("/api/v1/extract", post(extract::handle_extract))
        // Scoring & suggestions
        .route("/api/v1/score", post(scoring::handle_score))
        .route("/api/v1/suggestions", post(scoring::handle_suggestions))
        .route("/api/v1/jd-match", post(scoring::handle_jd_match))
        // Bullets
        .route("/api/v1/bullets", post(bullets::handle_generate_bullets))
        // Telemetry ingestion
        .route("/api/v1/track", post(telemetry::handle_track_event))
        .route("/api/v1/resume-stats", post(telemetry::handle_resume_stats))
        // Privacy & drafts
        .route(
            "/api/v1/privacy",
            get(settings::handle_get_privacy).put(settings::handle_update_privacy),
        )
        .route(
            "/api/v1/privacy/anon-id",
            post(settings::handle_reset_anon_id),
        )
        .route(
            "/api/v1/privacy/data",
            axum::routing::delete(settings::handle_clear_data),
        )
        .route(
            "/api/v1/draft",
            get(settings::handle_load_draft)
                .put(settings::handle_save_draft)
                .delete(settings::handle_clear_draft),
        )
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}

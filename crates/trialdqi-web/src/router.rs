//! Axum router: maps all URL paths to handlers.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    alerts::alerts_page,
    api,
    assets::stylesheet,
    landing::landing,
    not_found::fallback,
    patient::patient_page,
    site::site_page,
    study::study_dashboard,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",                                    get(landing))
        .route("/study/{study_id}",                    get(study_dashboard))
        .route("/study/{study_id}/site/{site_id}",     get(site_page))
        .route("/study/{study_id}/patient/{patient_id}", get(patient_page))
        .route("/study/{study_id}/alerts",             get(alerts_page))

        // API endpoints
        .route("/api/health",                          get(api::health))
        .route("/api/studies",                         get(api::list_studies))
        .route("/api/studies/{study_id}",              get(api::study_summary))
        .route("/api/studies/{study_id}/sites",        get(api::study_sites))
        .route("/api/studies/{study_id}/alerts",       get(api::study_alerts))
        .route("/api/sites/{site_id}/breakdown",       get(api::site_breakdown))
        .route("/api/sites/{site_id}/insights",        get(api::site_insights))
        .route("/api/patients/{patient_id}",           get(api::patient))

        // Static assets
        .route("/static/css/main.css",                 get(stylesheet))

        .fallback(fallback)

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

//! Read-only JSON API over the same data as the HTML views.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use trialdqi_common::{ApiError, EntityKind, Study, TrialDqiError};
use trialdqi_db::{EntityLookup, StoreStats};
use trialdqi_metrics::ordering::{sort_alerts_by_priority, sort_sites_by_risk};
use trialdqi_metrics::{DqiBreakdown, StudySummary};

use crate::state::SharedState;

#[derive(Debug, Deserialize, Default)]
pub struct SortParams {
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub records: StoreStats,
    pub integrity_issues: usize,
}

fn require_study(state: &SharedState, study_id: &str) -> Result<(), ApiError> {
    match state.engine.store().study(study_id) {
        Some(_) => Ok(()),
        None => Err(TrialDqiError::not_found(EntityKind::Study, study_id).into()),
    }
}

fn require_site(state: &SharedState, site_id: &str) -> Result<(), ApiError> {
    match state.engine.store().site(site_id) {
        Some(_) => Ok(()),
        None => Err(TrialDqiError::not_found(EntityKind::Site, site_id).into()),
    }
}

fn unsupported_sort(value: &str, expected: &str) -> ApiError {
    ApiError::BadRequest(format!("unsupported sort '{value}', expected '{expected}'"))
}

/// GET /api/health
pub async fn health(State(state): State<SharedState>) -> Json<Health> {
    let store = state.engine.store();
    Json(Health {
        status: "ok",
        records: store.stats(),
        integrity_issues: store.integrity_issues().len(),
    })
}

/// GET /api/studies
pub async fn list_studies(State(state): State<SharedState>) -> Json<Vec<Study>> {
    Json(state.engine.store().studies().to_vec())
}

/// GET /api/studies/{study_id}
pub async fn study_summary(
    State(state): State<SharedState>,
    Path(study_id): Path<String>,
) -> Result<Json<StudySummary>, ApiError> {
    state
        .engine
        .study_summary(&study_id)
        .map(Json)
        .ok_or_else(|| TrialDqiError::not_found(EntityKind::Study, study_id).into())
}

/// GET /api/studies/{study_id}/sites - store order, or `?sort=risk`
pub async fn study_sites(
    State(state): State<SharedState>,
    Path(study_id): Path<String>,
    Query(params): Query<SortParams>,
) -> Result<Response, ApiError> {
    require_study(&state, &study_id)?;
    let mut sites = state.engine.sites_by_study(&study_id);
    match params.sort.as_deref() {
        None => {}
        Some("risk") => sort_sites_by_risk(&mut sites),
        Some(other) => return Err(unsupported_sort(other, "risk")),
    }
    Ok(Json(sites).into_response())
}

/// GET /api/studies/{study_id}/alerts - store order, or `?sort=priority`
pub async fn study_alerts(
    State(state): State<SharedState>,
    Path(study_id): Path<String>,
    Query(params): Query<SortParams>,
) -> Result<Response, ApiError> {
    require_study(&state, &study_id)?;
    let mut alerts = state.engine.alerts_by_study(&study_id);
    match params.sort.as_deref() {
        None => {}
        Some("priority") => sort_alerts_by_priority(&mut alerts),
        Some(other) => return Err(unsupported_sort(other, "priority")),
    }
    Ok(Json(alerts).into_response())
}

/// GET /api/sites/{site_id}/breakdown
pub async fn site_breakdown(
    State(state): State<SharedState>,
    Path(site_id): Path<String>,
) -> Result<Json<Vec<DqiBreakdown>>, ApiError> {
    require_site(&state, &site_id)?;
    Ok(Json(state.engine.dqi_breakdown(&site_id)))
}

/// GET /api/sites/{site_id}/insights
pub async fn site_insights(
    State(state): State<SharedState>,
    Path(site_id): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    require_site(&state, &site_id)?;
    Ok(Json(state.engine.site_insights(&site_id)))
}

/// GET /api/patients/{patient_id}
pub async fn patient(
    State(state): State<SharedState>,
    Path(patient_id): Path<String>,
) -> Result<Response, ApiError> {
    match state.engine.patient_detail(&patient_id) {
        Some(detail) => Ok(Json(detail).into_response()),
        None => Err(TrialDqiError::not_found(EntityKind::Patient, patient_id).into()),
    }
}

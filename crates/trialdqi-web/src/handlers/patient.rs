//! Patient status view.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use trialdqi_common::{CodingStatus, SaeStatus};
use trialdqi_metrics::bands::{count_band, open_query_band, DqiBand, DqiScale};
use trialdqi_metrics::PatientDetail;

use super::layout::{badge, clean_badge, dashboard_page, escape, Nav};
use super::not_found::not_found_page;
use crate::state::SharedState;

pub async fn patient_page(
    State(state): State<SharedState>,
    Path((study_id, patient_id)): Path<(String, String)>,
) -> Response {
    match state.engine.patient_detail(&patient_id) {
        Some(detail) => Html(render_patient(&study_id, &detail)).into_response(),
        None => not_found_page(
            "Patient not found",
            &format!("/study/{study_id}"),
            "Return to dashboard",
            Some(study_id.as_str()),
        ),
    }
}

fn count_card(title: &str, count: u32, band: DqiBand, note: &str) -> String {
    format!(r#"
        <div class="card status-card">
            <h3 class="card-title">{title}</h3>
            <div class="count {}">{count}</div>
            <p class="text-muted">{note}</p>
        </div>"#, band.css_class())
}

fn status_card(title: &str, badge_html: &str, subtitle: &str, note: &str, band: DqiBand) -> String {
    format!(r#"
        <div class="card status-card">
            <h3 class="card-title">{title}</h3>
            <div>{badge_html}</div>
            <p class="text-muted">{subtitle}</p>
            <p class="{}">{note}</p>
        </div>"#, band.css_class())
}

fn coding_card(status: CodingStatus) -> String {
    let (variant, note, band) = match status {
        CodingStatus::Complete   => ("clean", "All terms coded and verified", DqiBand::Good),
        CodingStatus::Pending    => ("pending", "Coding in progress", DqiBand::Fair),
        CodingStatus::Incomplete => ("not-clean", "Requires medical coder review", DqiBand::Poor),
    };
    status_card("Coding Status", &badge(variant, status.label()), "MedDRA / WHO Drug Coding", note, band)
}

fn sae_card(status: SaeStatus) -> String {
    let (variant, note, band) = match status {
        SaeStatus::None     => ("secondary", "No SAEs reported", DqiBand::Good),
        SaeStatus::Resolved => ("clean", "All SAEs resolved and documented", DqiBand::Good),
        SaeStatus::Pending  => ("pending", "SAE review in progress", DqiBand::Fair),
        SaeStatus::Overdue  => ("risk-high", "Overdue SAE requires immediate attention", DqiBand::Poor),
    };
    status_card("Safety (SAE) Status", &badge(variant, status.label()), "Serious Adverse Events", note, band)
}

fn render_patient(study_id: &str, detail: &PatientDetail<'_>) -> String {
    let (patient, site) = (detail.patient, detail.site);

    let visits_note = match patient.missing_visits {
        0 => "All scheduled visits completed".to_string(),
        n => format!("{n} visit(s) need to be scheduled or documented"),
    };
    let pages_note = match patient.missing_pages {
        0 => "All CRF pages complete".to_string(),
        n => format!("{n} page(s) require data entry"),
    };
    let queries_note = match patient.open_queries {
        0 => "No outstanding queries".to_string(),
        n => format!("{n} query(ies) awaiting response"),
    };
    let (overall_class, overall_title, overall_note) = if patient.is_clean {
        (
            "overall-clean",
            "Patient Record is Clean",
            "This patient has no outstanding issues and is ready for database lock.",
        )
    } else {
        (
            "overall-attention",
            "Patient Record Requires Attention",
            "This patient has data quality issues that must be resolved before database lock.",
        )
    };

    let content = format!(r#"
<header class="page-header">
    <div>
        <a href="/study/{study}/site/{site_id}" class="back-link">Back to {site_id}</a>
        <div class="title-row">
            <h1 class="page-title">{id}</h1>
            {clean}
        </div>
        <p class="text-muted">{site_id} • {country}</p>
    </div>
    <div class="text-right">
        <p class="text-muted">Patient DQI</p>
        <p class="score-large {band}">{dqi}</p>
    </div>
</header>
<div class="page-body">
    <div class="status-grid">
        {visits}
        {pages}
        {queries}
        {coding}
        {sae}
        <div class="card status-card {overall_class}">
            <h3 class="card-title">Overall Status</h3>
            <div class="overall-title">{overall_title}</div>
            <p class="text-muted">{overall_note}</p>
        </div>
    </div>
</div>"#,
        study = escape(study_id),
        site_id = escape(&site.id),
        id = escape(&patient.id),
        clean = clean_badge(patient.is_clean),
        country = escape(&site.country),
        band = DqiScale::Detail.band(patient.dqi).css_class(),
        dqi = patient.dqi,
        visits = count_card("Missing Visits", patient.missing_visits, count_band(patient.missing_visits), &visits_note),
        pages = count_card("Missing Pages", patient.missing_pages, count_band(patient.missing_pages), &pages_note),
        queries = count_card("Open Queries", patient.open_queries, open_query_band(patient.open_queries), &queries_note),
        coding = coding_card(patient.coding_status),
        sae = sae_card(patient.sae_status),
    );

    dashboard_page(&patient.id, Some(study_id), Nav::None, &content)
}

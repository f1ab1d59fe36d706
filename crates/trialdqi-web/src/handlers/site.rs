//! Site drill-down: DQI breakdown, insights and the patient list.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use trialdqi_common::{Patient, SaeStatus};
use trialdqi_metrics::bands::DqiScale;
use trialdqi_metrics::{DqiBreakdown, SiteDetail};

use super::layout::{badge, clean_badge, dashboard_page, escape, risk_badge, Nav};
use super::not_found::not_found_page;
use crate::state::SharedState;

pub async fn site_page(
    State(state): State<SharedState>,
    Path((study_id, site_id)): Path<(String, String)>,
) -> Response {
    match state.engine.site_detail(&site_id) {
        Some(detail) => {
            Html(render_site(&study_id, &detail)).into_response()
        }
        None => not_found_page(
            "Site not found",
            &format!("/study/{study_id}"),
            "Return to dashboard",
            Some(study_id.as_str()),
        ),
    }
}

fn render_breakdown(items: &[DqiBreakdown]) -> String {
    items.iter().map(|item| {
        let band = DqiScale::Detail.band(item.score).css_class();
        let issues = if item.issues.is_empty() {
            String::new()
        } else {
            let lis: String = item.issues.iter()
                .map(|i| format!("<li>{}</li>", escape(i)))
                .collect();
            format!(r#"<ul class="issue-list">{lis}</ul>"#)
        };
        format!(r#"
            <div class="breakdown-item">
                <div class="breakdown-row">
                    <span>{category}</span>
                    <span class="score {band}">{score}</span>
                </div>
                <div class="progress-track">
                    <div class="progress-bar {band}" style="width:{width}%"></div>
                </div>
                {issues}
            </div>"#,
            category = escape(&item.category),
            score = item.score,
            width = item.score.clamp(0, item.max_score),
        )
    }).collect()
}

fn sae_badge(status: SaeStatus) -> String {
    let variant = match status {
        SaeStatus::Overdue  => "risk-high",
        SaeStatus::Pending  => "pending",
        SaeStatus::Resolved => "clean",
        SaeStatus::None     => "secondary",
    };
    badge(variant, status.label())
}

fn render_patient_rows(study_id: &str, patients: &[&Patient]) -> String {
    patients.iter().map(|p| {
        format!(r#"
                <tr>
                    <td><a href="/study/{study}/patient/{id}" class="row-link">{id}</a></td>
                    <td><span class="score {band}">{dqi}</span></td>
                    <td>{clean}</td>
                    <td><span class="{visits_flag}">{visits}</span></td>
                    <td><span class="{queries_flag}">{queries}</span></td>
                    <td>{sae}</td>
                </tr>"#,
            study = escape(study_id),
            id = escape(&p.id),
            band = DqiScale::Detail.band(p.dqi).css_class(),
            dqi = p.dqi,
            clean = clean_badge(p.is_clean),
            visits_flag = if p.missing_visits > 0 { "text-danger" } else { "" },
            visits = p.missing_visits,
            queries_flag = if p.open_queries > 2 { "text-warning" } else { "" },
            queries = p.open_queries,
            sae = sae_badge(p.sae_status),
        )
    }).collect()
}

fn render_site(study_id: &str, detail: &SiteDetail<'_>) -> String {
    let site = detail.site;
    let insights: String = detail.insights.iter()
        .map(|i| format!("<p>{}</p>", escape(i)))
        .collect();

    let content = format!(r#"
<header class="page-header">
    <div>
        <a href="/study/{study}" class="back-link">Back to Study Overview</a>
        <div class="title-row">
            <h1 class="page-title">{id}</h1>
            {risk}
        </div>
        <p class="text-muted">{country}</p>
    </div>
    <div class="text-right">
        <p class="text-muted">Data Quality Index</p>
        <p class="score-large {band}">{dqi}</p>
    </div>
</header>
<div class="page-body">
    <section>
        <h2 class="section-header">DQI Score Breakdown</h2>
        <div class="card">{breakdown}
        </div>
    </section>

    <section>
        <h2 class="section-header">AI Insights &amp; Recommended Actions</h2>
        <div class="card insights">
            {insights}
        </div>
    </section>

    <section>
        <h2 class="section-header">Patient List</h2>
        <p class="text-muted">{patient_count} patients enrolled at this site</p>
        <div class="table-container">
            <table class="table">
                <thead>
                    <tr>
                        <th>Patient ID</th>
                        <th>DQI Score</th>
                        <th>Status</th>
                        <th>Missing Visits</th>
                        <th>Open Queries</th>
                        <th>SAE Status</th>
                    </tr>
                </thead>
                <tbody>{rows}
                </tbody>
            </table>
        </div>
    </section>
</div>"#,
        study = escape(study_id),
        id = escape(&site.id),
        risk = risk_badge(site.risk_level),
        country = escape(&site.country),
        band = DqiScale::Detail.band(site.dqi).css_class(),
        dqi = site.dqi,
        breakdown = render_breakdown(&detail.breakdown),
        patient_count = detail.patients.len(),
        rows = render_patient_rows(study_id, &detail.patients),
    );

    dashboard_page(&site.id, Some(study_id), Nav::None, &content)
}

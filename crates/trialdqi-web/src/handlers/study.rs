//! Study dashboard: KPI cards, risk-sorted site table and the alert panel.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use trialdqi_common::Site;
use trialdqi_metrics::bands::{self, DqiScale, KpiVariant, DQI_TARGET};
use trialdqi_metrics::ordering::sort_sites_by_risk;
use trialdqi_metrics::timefmt::{long_date, relative_time};
use trialdqi_metrics::{AlertEntry, StudySummary};

use super::layout::{alert_class, badge, dashboard_page, escape, risk_badge, Nav};
use super::not_found::study_not_found;
use crate::state::SharedState;

pub async fn study_dashboard(
    State(state): State<SharedState>,
    Path(study_id): Path<String>,
) -> Response {
    let Some(summary) = state.engine.study_summary(&study_id) else {
        return study_not_found();
    };

    let mut sites = state.engine.sites_by_study(&study_id);
    sort_sites_by_risk(&mut sites);
    let alerts = state.engine.alert_panel(&study_id, state.alert_panel_limit);

    let content = format!(r#"
<header class="page-header">
    <div>
        <h1 class="page-title">{name}</h1>
        <p class="text-muted">{sponsor}</p>
    </div>
    <div class="text-right">
        <p class="text-muted">Data Snapshot</p>
        <p><strong>{snapshot}</strong></p>
    </div>
</header>
<div class="page-body">
    {kpis}
    <section class="grid-main">
        <div>
            <h2 class="section-header">Site Risk Overview</h2>
            <p class="text-muted">Click on a site to view detailed data quality analysis</p>
            {table}
        </div>
        <div>
            {panel}
        </div>
    </section>
</div>"#,
        name = escape(&summary.name),
        sponsor = escape(&summary.sponsor),
        snapshot = long_date(summary.snapshot_date),
        kpis = render_kpis(&summary),
        table = render_site_table(&study_id, &sites),
        panel = render_alert_panel(&alerts, state.now()),
    );

    Html(dashboard_page(&summary.name, Some(study_id.as_str()), Nav::StudyOverview, &content)).into_response()
}

fn kpi_card(title: &str, value: &str, subtitle: &str, variant: KpiVariant) -> String {
    format!(r#"
        <div class="kpi-card {}">
            <p class="kpi-label">{}</p>
            <p class="kpi-value">{}</p>
            <p class="kpi-subtitle">{}</p>
        </div>"#, variant.css_class(), title, value, escape(subtitle))
}

fn render_kpis(summary: &StudySummary) -> String {
    let clean = bands::clean_patient_count(summary.total_patients, summary.clean_patient_percentage);
    let cards = [
        kpi_card(
            "Study DQI Score",
            &summary.overall_dqi.to_string(),
            &format!("Target: ≥{DQI_TARGET}"),
            bands::dqi_kpi(summary.overall_dqi),
        ),
        kpi_card(
            "Clean Patients",
            &format!("{}%", summary.clean_patient_percentage),
            &format!("{clean} of {}", summary.total_patients),
            bands::clean_patients_kpi(summary.clean_patient_percentage),
        ),
        kpi_card(
            "High-Risk Sites",
            &summary.high_risk_sites.to_string(),
            &format!("of {} total sites", summary.total_sites),
            bands::high_risk_sites_kpi(summary.high_risk_sites),
        ),
        kpi_card(
            "Pending SAEs",
            &summary.pending_saes.to_string(),
            "Requires immediate attention",
            bands::pending_saes_kpi(summary.pending_saes),
        ),
    ];
    format!(r#"<section class="kpi-grid">{}
    </section>"#, cards.concat())
}

fn render_site_table(study_id: &str, sites: &[&Site]) -> String {
    let rows: String = sites.iter().map(|site| {
        let flag = |hot: bool| if hot { "text-danger" } else { "" };
        format!(r#"
            <tr>
                <td><a href="/study/{study}/site/{id}" class="row-link">{id}</a></td>
                <td>{country}</td>
                <td><span class="score {band}">{dqi}</span></td>
                <td>{risk}</td>
                <td>{patients}</td>
                <td><span class="{queries_flag}">{queries}</span></td>
                <td><span class="{saes_flag}">{saes}</span></td>
            </tr>"#,
            study = escape(study_id),
            id = escape(&site.id),
            country = escape(&site.country),
            band = DqiScale::Detail.band(site.dqi).css_class(),
            dqi = site.dqi,
            risk = risk_badge(site.risk_level),
            patients = site.patients_enrolled,
            queries_flag = flag(site.open_queries > trialdqi_metrics::insights::QUERY_BACKLOG_THRESHOLD),
            queries = site.open_queries,
            saes_flag = flag(site.pending_saes > 0),
            saes = site.pending_saes,
        )
    }).collect();

    format!(r#"
            <div class="table-container">
                <table class="table">
                    <thead>
                        <tr>
                            <th>Site ID</th>
                            <th>Country</th>
                            <th>DQI Score</th>
                            <th>Risk Level</th>
                            <th>Patients</th>
                            <th>Open Queries</th>
                            <th>Pending SAEs</th>
                        </tr>
                    </thead>
                    <tbody>{rows}
                    </tbody>
                </table>
            </div>"#)
}

fn render_alert_panel(entries: &[AlertEntry<'_>], now: DateTime<Utc>) -> String {
    let items: String = if entries.is_empty() {
        r#"<p class="text-muted">No alerts for this study.</p>"#.to_string()
    } else {
        entries.iter().map(|entry| {
            let alert = entry.alert;
            let inner = format!(r#"
                    <p>{message}</p>
                    <div class="alert-meta">
                        {category}
                        <span class="text-muted">{subject}</span>
                        <span class="text-muted">• {age}</span>
                    </div>"#,
                message = escape(&alert.message),
                category = badge("secondary", &alert.category),
                subject = escape(alert.subject.id()),
                age = relative_time(alert.timestamp, now),
            );
            let class = alert_class(alert.priority);
            match &entry.link {
                Some(href) => format!(r#"
                <a href="{}" class="alert-item {class}">{inner}
                </a>"#, escape(href)),
                None => format!(r#"
                <div class="alert-item {class}">{inner}
                </div>"#),
            }
        }).collect()
    };

    format!(r#"
            <div class="card">
                <h3 class="section-header">Critical Alerts</h3>
                <div class="alert-list">{items}
                </div>
            </div>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trialdqi_common::{EntityRef, Priority};

    #[test]
    fn test_kpis_for_nova() {
        let store = trialdqi_test_utils::seeded_store();
        let summary = trialdqi_metrics::summary::study_summary(&store, "NOVA-2024-001").unwrap();
        let html = render_kpis(&summary);
        assert!(html.contains("kpi-card kpi-warning"));
        assert!(html.contains("72%"));
        assert!(html.contains("350 of 486"));
        assert!(html.contains("of 24 total sites"));
        assert!(html.contains("kpi-card kpi-danger"));
    }

    #[test]
    fn test_panel_links_and_escapes() {
        let alert = trialdqi_common::Alert {
            message: "<b>bold</b>".to_string(),
            ..trialdqi_test_utils::fixtures::alert(
                "A-1",
                "ST",
                Priority::High,
                EntityRef::Site("S-1".to_string()),
            )
        };
        let entries = vec![AlertEntry {
            alert: &alert,
            entity_label: "S-1".to_string(),
            link: Some("/study/ST/site/S-1".to_string()),
        }];
        let html = render_alert_panel(&entries, trialdqi_test_utils::reference_now());
        assert!(html.contains(r#"<a href="/study/ST/site/S-1" class="alert-item alert-critical">"#));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("• Just now"));
    }

    #[test]
    fn test_empty_panel() {
        let html = render_alert_panel(&[], trialdqi_test_utils::reference_now());
        assert!(html.contains("No alerts for this study."));
    }
}

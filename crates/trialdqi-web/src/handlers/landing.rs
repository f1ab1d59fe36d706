//! Landing page: study portfolio with quick stats.

use axum::{extract::State, response::Html};
use trialdqi_common::{Study, StudyStatus};
use trialdqi_metrics::bands::DqiScale;
use trialdqi_metrics::timefmt::short_date;
use trialdqi_metrics::PortfolioOverview;

use super::layout::{badge, escape, plain_page, thousands, BRAND, BRAND_TAGLINE};
use crate::state::SharedState;

pub async fn landing(State(state): State<SharedState>) -> Html<String> {
    Html(render_landing(&state.engine.portfolio()))
}

fn status_badge(status: StudyStatus) -> String {
    let variant = match status {
        StudyStatus::Active    => "clean",
        StudyStatus::Paused    => "pending",
        StudyStatus::Completed => "secondary",
    };
    badge(variant, status.label())
}

fn study_card(study: &Study) -> String {
    let (card_class, updated) = match study.status {
        StudyStatus::Paused => ("study-card paused", "Last updated"),
        _ => ("study-card", "Updated"),
    };
    let dqi_class = DqiScale::Portfolio.band(study.dqi).css_class();

    format!(r#"
        <a href="/study/{id}" class="{card_class}">
            <div>
                <div class="study-title">
                    <h4>{id}</h4>
                    {status}
                    {phase}
                </div>
                <p>{name}</p>
                <p class="text-muted">{area} • {sponsor}</p>
                <div class="study-meta">
                    <span><strong>{sites}</strong> Sites</span>
                    <span><strong>{patients}</strong> Patients</span>
                    <span>{updated} {date}</span>
                </div>
            </div>
            <div class="study-score">
                <p class="kpi-label">DQI Score</p>
                <p class="score {dqi_class}">{dqi}</p>
            </div>
        </a>"#,
        id = escape(&study.id),
        status = status_badge(study.status),
        phase = badge("secondary", &study.phase),
        name = escape(&study.name),
        area = escape(&study.therapeutic_area),
        sponsor = escape(&study.sponsor),
        sites = study.total_sites,
        patients = study.total_patients,
        date = short_date(study.last_updated),
        dqi = study.dqi,
    )
}

fn study_section(heading: &str, studies: &[&Study]) -> String {
    let cards: String = studies.iter().map(|s| study_card(s)).collect();
    format!(r#"
    <section class="study-section">
        <h3 class="section-header">{heading}</h3>
        <div class="study-grid">{cards}
        </div>
    </section>"#)
}

fn render_landing(overview: &PortfolioOverview<'_>) -> String {
    let paused = if overview.paused.is_empty() {
        String::new()
    } else {
        study_section("Paused Studies", &overview.paused)
    };

    let content = format!(r#"
<header class="top-header">
    <div class="brand">
        <span class="brand-name">{BRAND}</span>
        <span class="brand-tagline">{BRAND_TAGLINE}</span>
    </div>
</header>

<section class="hero">
    <h2>Welcome back</h2>
    <p class="text-muted">Select a study to view its data quality dashboard and operational metrics.</p>
    <div class="stats-grid">
        <div class="stat-card">
            <div class="stat-value">{active}</div>
            <div class="stat-label">Active Studies</div>
        </div>
        <div class="stat-card">
            <div class="stat-value">{sites}</div>
            <div class="stat-label">Total Sites</div>
        </div>
        <div class="stat-card">
            <div class="stat-value">{patients}</div>
            <div class="stat-label">Total Patients</div>
        </div>
    </div>
</section>

<main class="landing-main">
    {active_section}
    {paused}
</main>

<footer class="footer">
    <p class="text-muted">{BRAND} {BRAND_TAGLINE}</p>
</footer>"#,
        active = overview.active_count(),
        sites = thousands(overview.total_sites),
        patients = thousands(overview.total_patients),
        active_section = study_section("Active Studies", &overview.active),
    );

    plain_page("Studies", &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use trialdqi_metrics::{FixedScoreSource, MetricsEngine};

    #[test]
    fn test_landing_lists_all_studies_with_totals() {
        let engine = MetricsEngine::new(
            trialdqi_test_utils::shared_store(),
            Arc::new(FixedScoreSource::new(0)),
        );
        let html = render_landing(&engine.portfolio());
        for id in ["NOVA-2024-001", "CARD-2024-002", "NEUR-2023-015", "RESP-2024-008", "IMMU-2023-022"] {
            assert!(html.contains(&format!(r#"href="/study/{id}""#)), "missing {id}");
        }
        assert!(html.contains("Paused Studies"));
        assert!(html.contains(">94<"));
        assert!(html.contains("1,672"));
        assert!(html.contains("Last updated Dec 20"));
    }

    #[test]
    fn test_portfolio_dqi_bands() {
        let html = study_card(&trialdqi_common::Study {
            dqi: 72,
            ..trialdqi_test_utils::fixtures::study("X-1")
        });
        assert!(html.contains(r#"class="score band-fair">72<"#));
    }
}

//! Alerts & action queue, sorted by priority.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use trialdqi_metrics::timefmt::short_date_time;
use trialdqi_metrics::AlertQueue;

use super::layout::{alert_class, badge, dashboard_page, escape, priority_badge, Nav};
use super::not_found::study_not_found;
use crate::state::SharedState;
use trialdqi_db::EntityLookup;

pub async fn alerts_page(
    State(state): State<SharedState>,
    Path(study_id): Path<String>,
) -> Response {
    if state.engine.store().study(&study_id).is_none() {
        return study_not_found();
    }
    let queue = state.engine.alert_queue(&study_id);
    Html(render_queue(&study_id, &queue)).into_response()
}

fn render_queue(study_id: &str, queue: &AlertQueue<'_>) -> String {
    let list = if queue.entries.is_empty() {
        r#"<div class="card empty-state"><p class="text-muted">No alerts for this study.</p></div>"#
            .to_string()
    } else {
        let rows: String = queue.entries.iter().map(|entry| {
            let alert = entry.alert;
            let inner = format!(r#"
                <div class="alert-badges">
                    {priority}
                    {category}
                    {kind}
                </div>
                <p class="alert-message">{message}</p>
                <div class="alert-meta text-muted">
                    <span>{label}</span>
                    <span>•</span>
                    <span>{when}</span>
                </div>"#,
                priority = priority_badge(alert.priority),
                category = badge("secondary", &alert.category),
                kind = badge("outline capitalize", alert.subject.kind().as_str()),
                message = escape(&alert.message),
                label = escape(&entry.entity_label),
                when = short_date_time(alert.timestamp),
            );
            let class = alert_class(alert.priority);
            match &entry.link {
                Some(href) => format!(r#"
            <a href="{}" class="queue-item {class}">{inner}
            </a>"#, escape(href)),
                None => format!(r#"
            <div class="queue-item {class}">{inner}
            </div>"#),
            }
        }).collect();
        format!(r#"<div class="card queue">{rows}
        </div>"#)
    };

    let content = format!(r#"
<header class="page-header">
    <div>
        <h1 class="page-title">Alerts &amp; Action Queue</h1>
        <p class="text-muted">Prioritized list of items requiring attention</p>
    </div>
</header>
<div class="queue-summary">
    <span class="text-muted">Total Alerts:</span> <strong>{total}</strong>
    <span class="dot dot-high"></span><span class="text-muted">High Priority:</span> <strong class="text-danger">{high}</strong>
    <span class="dot dot-medium"></span><span class="text-muted">Medium Priority:</span> <strong class="text-warning">{medium}</strong>
</div>
<div class="page-body">
    {list}
</div>"#,
        total = queue.total,
        high = queue.high,
        medium = queue.medium,
    );

    dashboard_page("Alerts Queue", Some(study_id), Nav::AlertsQueue, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use trialdqi_metrics::{FixedScoreSource, MetricsEngine};

    fn engine() -> MetricsEngine {
        MetricsEngine::new(trialdqi_test_utils::shared_store(), Arc::new(FixedScoreSource::new(0)))
    }

    #[test]
    fn test_queue_order_and_counters() {
        let engine = engine();
        let html = render_queue("NOVA-2024-001", &engine.alert_queue("NOVA-2024-001"));
        assert!(html.contains("Total Alerts:</span> <strong>8</strong>"));
        assert!(html.contains(r#"<strong class="text-danger">4</strong>"#));
        assert!(html.contains(r#"<strong class="text-warning">3</strong>"#));

        let pos = |needle: &str| html.find(needle).unwrap();
        // ALT-006 is high priority and stays ahead of the medium ALT-004
        assert!(pos("Overall DQI dropped below 80% threshold") < pos("Patient has 3 consecutive missed visits"));
        assert!(pos("Patient has 3 consecutive missed visits") < pos("Minor protocol deviation"));
    }

    #[test]
    fn test_queue_entity_labels_and_links() {
        let engine = engine();
        let html = render_queue("NOVA-2024-001", &engine.alert_queue("NOVA-2024-001"));
        assert!(html.contains("PAT-001-001 • United States"));
        assert!(html.contains(r#"href="/study/NOVA-2024-001/patient/PAT-001-001""#));
        assert!(html.contains("Dec 27, 08:30 AM"));
        // study-level alert renders without a link
        assert!(html.contains(r#"<div class="queue-item alert-critical">"#));
    }

    #[test]
    fn test_empty_queue() {
        let engine = engine();
        let html = render_queue("IMMU-2023-022", &engine.alert_queue("IMMU-2023-022"));
        assert!(html.contains("No alerts for this study."));
        assert!(html.contains("Total Alerts:</span> <strong>0</strong>"));
    }
}

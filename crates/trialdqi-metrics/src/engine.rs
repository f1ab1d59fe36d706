//! Entry point for every derived view.
//!
//! The engine owns a shared, read-only [`DataStore`] and the [`ScoreSource`]
//! used for DQI breakdowns. Lookups that miss return `None` or an empty
//! `Vec`; nothing here fails.

use std::sync::Arc;

use tracing::debug;
use trialdqi_common::{Alert, EntityRef, Priority, Site, StudyStatus};
use trialdqi_db::{DataStore, EntityLookup, ResolvedEntity};

use crate::breakdown::{self, DqiBreakdown, RandomScoreSource, ScoreSource};
use crate::insights;
use crate::ordering;
use crate::summary::{self, StudySummary};
use crate::views::{AlertEntry, AlertQueue, PatientDetail, PortfolioOverview, SiteDetail};

#[derive(Clone)]
pub struct MetricsEngine {
    store: Arc<DataStore>,
    scores: Arc<dyn ScoreSource>,
}

impl MetricsEngine {
    pub fn new(store: Arc<DataStore>, scores: Arc<dyn ScoreSource>) -> Self {
        Self { store, scores }
    }

    /// Engine with an entropy-seeded breakdown source.
    pub fn unseeded(store: Arc<DataStore>) -> Self {
        Self::new(store, Arc::new(RandomScoreSource::from_entropy()))
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn study_summary(&self, study_id: &str) -> Option<StudySummary> {
        let summary = summary::study_summary(&self.store, study_id);
        if summary.is_none() {
            debug!(study_id, "study summary: study not found");
        }
        summary
    }

    /// Sites of a study in store order. Use [`ordering::sort_sites_by_risk`] for display order.
    pub fn sites_by_study(&self, study_id: &str) -> Vec<&Site> {
        self.store.sites_for_study(study_id).collect()
    }

    /// Alerts of a study in store order.
    pub fn alerts_by_study(&self, study_id: &str) -> Vec<&Alert> {
        self.store.alerts_for_study(study_id).collect()
    }

    /// Five-category breakdown, or empty for an unknown site.
    pub fn dqi_breakdown(&self, site_id: &str) -> Vec<DqiBreakdown> {
        match self.store.site(site_id) {
            Some(site) => breakdown::dqi_breakdown(site, self.scores.as_ref()),
            None => {
                debug!(site_id, "dqi breakdown: site not found");
                Vec::new()
            }
        }
    }

    /// Insight sentences, or empty for an unknown site.
    pub fn site_insights(&self, site_id: &str) -> Vec<String> {
        match self.store.site(site_id) {
            Some(site) => insights::site_insights(site),
            None => {
                debug!(site_id, "site insights: site not found");
                Vec::new()
            }
        }
    }

    pub fn portfolio(&self) -> PortfolioOverview<'_> {
        let studies = self.store.studies();
        let with_status = |status: StudyStatus| {
            studies.iter().filter(move |s| s.status == status).collect::<Vec<_>>()
        };

        PortfolioOverview {
            active: with_status(StudyStatus::Active),
            paused: with_status(StudyStatus::Paused),
            total_sites: studies.iter().map(|s| s.total_sites).sum(),
            total_patients: studies.iter().map(|s| s.total_patients).sum(),
        }
    }

    pub fn site_detail(&self, site_id: &str) -> Option<SiteDetail<'_>> {
        let site = self.store.site(site_id)?;
        Some(SiteDetail {
            site,
            patients: self.store.patients_for_site(site_id).collect(),
            breakdown: breakdown::dqi_breakdown(site, self.scores.as_ref()),
            insights: insights::site_insights(site),
        })
    }

    /// Patient with its owning site. `None` if either is missing.
    pub fn patient_detail(&self, patient_id: &str) -> Option<PatientDetail<'_>> {
        let (patient, site) = self.store.site_of_patient(patient_id)?;
        Some(PatientDetail { patient, site })
    }

    /// Display text for an alert subject. Falls back to the raw id.
    pub fn entity_label(&self, subject: &EntityRef) -> String {
        match self.store.resolve(subject) {
            Some(ResolvedEntity::Site(site)) => format!("{} • {}", site.id, site.country),
            Some(ResolvedEntity::Patient(patient)) => match self.store.site(&patient.site_id) {
                Some(site) => format!("{} • {}", patient.id, site.country),
                None => patient.id.clone(),
            },
            Some(ResolvedEntity::Study(_)) | None => subject.id().to_string(),
        }
    }

    /// Drill-down route for an alert subject within a study.
    pub fn entity_link(study_id: &str, subject: &EntityRef) -> Option<String> {
        match subject {
            EntityRef::Site(id) => Some(format!("/study/{study_id}/site/{id}")),
            EntityRef::Patient(id) => Some(format!("/study/{study_id}/patient/{id}")),
            EntityRef::Study(_) => None,
        }
    }

    fn entry<'a>(&self, alert: &'a Alert) -> AlertEntry<'a> {
        AlertEntry {
            alert,
            entity_label: self.entity_label(&alert.subject),
            link: Self::entity_link(&alert.study_id, &alert.subject),
        }
    }

    /// Alerts in store order, cut to `limit`, for the dashboard panel.
    pub fn alert_panel(&self, study_id: &str, limit: usize) -> Vec<AlertEntry<'_>> {
        self.store
            .alerts_for_study(study_id)
            .take(limit)
            .map(|a| self.entry(a))
            .collect()
    }

    /// Priority-sorted alert queue with counters.
    pub fn alert_queue(&self, study_id: &str) -> AlertQueue<'_> {
        let mut alerts = self.alerts_by_study(study_id);
        let count = |p: Priority| alerts.iter().filter(|a| a.priority == p).count();
        let (total, high, medium) = (alerts.len(), count(Priority::High), count(Priority::Medium));

        ordering::sort_alerts_by_priority(&mut alerts);
        AlertQueue {
            entries: alerts.into_iter().map(|a| self.entry(a)).collect(),
            total,
            high,
            medium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakdown::FixedScoreSource;
    use pretty_assertions::assert_eq;

    fn engine() -> MetricsEngine {
        MetricsEngine::new(
            trialdqi_test_utils::shared_store(),
            Arc::new(FixedScoreSource::new(0)),
        )
    }

    #[test]
    fn test_sites_by_study_filters_exactly() {
        let engine = engine();
        let sites = engine.sites_by_study("NOVA-2024-001");
        assert_eq!(sites.len(), 12);
        assert!(sites.iter().all(|s| s.study_id == "NOVA-2024-001"));
        assert_eq!(engine.sites_by_study("NEUR-2023-015").len(), 3);
        assert!(engine.sites_by_study("RESP-2024-008").is_empty());
        assert!(engine.sites_by_study("UNKNOWN").is_empty());
    }

    #[test]
    fn test_alerts_by_study_filters_exactly() {
        let engine = engine();
        let alerts = engine.alerts_by_study("NOVA-2024-001");
        assert_eq!(alerts.len(), 8);
        assert!(alerts.iter().all(|a| a.study_id == "NOVA-2024-001"));
        let ids: Vec<&str> = engine.alerts_by_study("CARD-2024-002").iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["ALT-010"]);
    }

    #[test]
    fn test_breakdown_unknown_site_is_empty() {
        let engine = engine();
        assert!(engine.dqi_breakdown("SITE-999").is_empty());
        assert_eq!(engine.dqi_breakdown("SITE-001").len(), 5);
    }

    #[test]
    fn test_insights_unknown_site_is_empty() {
        let engine = engine();
        assert!(engine.site_insights("SITE-999").is_empty());
        assert_eq!(engine.site_insights("SITE-001").len(), 4);
        assert_eq!(engine.site_insights("SITE-005").len(), 1);
    }

    #[test]
    fn test_portfolio_totals_use_declared_counts() {
        let engine = engine();
        let overview = engine.portfolio();
        assert_eq!(overview.active_count(), 4);
        assert_eq!(overview.paused.len(), 1);
        assert_eq!(overview.paused[0].id, "RESP-2024-008");
        assert_eq!(overview.total_sites, 24 + 18 + 32 + 12 + 8);
        assert_eq!(overview.total_patients, 486 + 312 + 624 + 186 + 64);
    }

    #[test]
    fn test_site_detail() {
        let engine = engine();
        let detail = engine.site_detail("SITE-001").unwrap();
        assert_eq!(detail.patients.len(), 5);
        assert_eq!(detail.breakdown.len(), 5);
        assert_eq!(detail.insights.len(), 4);
        assert!(engine.site_detail("SITE-404").is_none());
    }

    #[test]
    fn test_site_detail_with_no_patients() {
        let engine = engine();
        let detail = engine.site_detail("SITE-203").unwrap();
        assert!(detail.patients.is_empty());
    }

    #[test]
    fn test_patient_detail() {
        let engine = engine();
        let detail = engine.patient_detail("PAT-002-003").unwrap();
        assert_eq!(detail.site.id, "SITE-002");
        assert!(engine.patient_detail("PAT-404").is_none());
    }

    #[test]
    fn test_patient_with_missing_site() {
        use trialdqi_test_utils::fixtures;

        let store = DataStore::new(
            vec![fixtures::study("ST")],
            vec![],
            vec![fixtures::patient("P-1", "GONE")],
            vec![],
        );
        let engine = MetricsEngine::new(Arc::new(store), Arc::new(FixedScoreSource::new(0)));
        assert!(engine.patient_detail("P-1").is_none());
        assert_eq!(engine.entity_label(&EntityRef::Patient("P-1".into())), "P-1");
    }

    #[test]
    fn test_entity_labels() {
        let engine = engine();
        assert_eq!(
            engine.entity_label(&EntityRef::Site("SITE-010".into())),
            "SITE-010 • Brazil"
        );
        assert_eq!(
            engine.entity_label(&EntityRef::Patient("PAT-001-001".into())),
            "PAT-001-001 • United States"
        );
        assert_eq!(engine.entity_label(&EntityRef::Study("STUDY".into())), "STUDY");
        assert_eq!(engine.entity_label(&EntityRef::Site("SITE-999".into())), "SITE-999");
    }

    #[test]
    fn test_alert_queue_counts_and_order() {
        let engine = engine();
        let queue = engine.alert_queue("NOVA-2024-001");
        assert_eq!(queue.total, 8);
        assert_eq!(queue.high, 4);
        assert_eq!(queue.medium, 3);
        assert_eq!(queue.entries[0].alert.id, "ALT-001");
        assert_eq!(
            queue.entries[0].link.as_deref(),
            Some("/study/NOVA-2024-001/site/SITE-001")
        );
        let study_alert = queue.entries.iter().find(|e| e.alert.id == "ALT-006").unwrap();
        assert_eq!(study_alert.link, None);
        assert_eq!(study_alert.entity_label, "STUDY");
    }

    #[test]
    fn test_alert_entry_json() {
        let engine = engine();
        let queue = engine.alert_queue("NOVA-2024-001");
        let json = serde_json::to_value(&queue.entries[0]).unwrap();
        assert_eq!(json["alert"]["id"], "ALT-001");
        assert_eq!(json["entity_label"], "SITE-001 • United States");
        assert_eq!(json["link"], "/study/NOVA-2024-001/site/SITE-001");
    }

    #[test]
    fn test_alert_queue_unknown_study_is_empty() {
        let engine = engine();
        let queue = engine.alert_queue("NONE");
        assert_eq!(queue.total, 0);
        assert!(queue.entries.is_empty());
    }

    #[test]
    fn test_views_outlive_the_requested_id() {
        let engine = engine();
        let (sites, panel) = {
            let study_id = String::from("NEUR-2023-015");
            (engine.sites_by_study(&study_id), engine.alert_panel(&study_id, 6))
        };
        assert_eq!(sites.len(), 3);
        assert_eq!(panel[0].alert.id, "ALT-009");
        let detail = {
            let site_id = String::from("SITE-003");
            engine.site_detail(&site_id)
        };
        assert_eq!(detail.map(|d| d.patients.len()), Some(2));
    }

    #[test]
    fn test_alert_panel_keeps_store_order_and_limit() {
        let engine = engine();
        let panel = engine.alert_panel("NOVA-2024-001", 6);
        let ids: Vec<&str> = panel.iter().map(|e| e.alert.id.as_str()).collect();
        assert_eq!(ids, vec!["ALT-001", "ALT-002", "ALT-003", "ALT-004", "ALT-005", "ALT-006"]);
    }
}

//! Immutable in-memory data store.
//!
//! Records keep their insertion order; every filter over the store returns
//! matches in that order. Id indexes are built once in [`DataStore::new`].

use std::collections::HashMap;

use serde::Serialize;
use trialdqi_common::{Alert, EntityKind, EntityRef, Patient, Site, Study};

use crate::lookup::EntityLookup;
use crate::seed;

/// Row counts per table.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StoreStats {
    pub studies: usize,
    pub sites: usize,
    pub patients: usize,
    pub alerts: usize,
}

/// A referential problem found in the loaded records.
///
/// These never stop the store from loading; lookups through a dangling key
/// simply come back empty.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum IntegrityIssue {
    DuplicateId { kind: EntityKind, id: String },
    DanglingStudy { site_id: String, study_id: String },
    DanglingSite { patient_id: String, site_id: String },
    UnresolvedAlertSubject { alert_id: String, subject: EntityRef },
}

#[derive(Debug, Clone, Default)]
pub struct DataStore {
    studies: Vec<Study>,
    sites: Vec<Site>,
    patients: Vec<Patient>,
    alerts: Vec<Alert>,
    study_index: HashMap<String, usize>,
    site_index: HashMap<String, usize>,
    patient_index: HashMap<String, usize>,
    duplicates: Vec<(EntityKind, String)>,
}

fn build_index<'a>(
    ids: impl Iterator<Item = &'a str>,
    kind: EntityKind,
    duplicates: &mut Vec<(EntityKind, String)>,
) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (pos, id) in ids.enumerate() {
        // first record wins
        if index.contains_key(id) {
            duplicates.push((kind, id.to_string()));
        } else {
            index.insert(id.to_string(), pos);
        }
    }
    index
}

impl DataStore {
    pub fn new(
        studies: Vec<Study>,
        sites: Vec<Site>,
        patients: Vec<Patient>,
        alerts: Vec<Alert>,
    ) -> Self {
        let mut duplicates = Vec::new();
        let study_index =
            build_index(studies.iter().map(|s| s.id.as_str()), EntityKind::Study, &mut duplicates);
        let site_index =
            build_index(sites.iter().map(|s| s.id.as_str()), EntityKind::Site, &mut duplicates);
        let patient_index = build_index(
            patients.iter().map(|p| p.id.as_str()),
            EntityKind::Patient,
            &mut duplicates,
        );

        let store = Self {
            studies,
            sites,
            patients,
            alerts,
            study_index,
            site_index,
            patient_index,
            duplicates,
        };
        tracing::debug!(stats = ?store.stats(), "data store loaded");
        store
    }

    /// Store populated with the built-in sample dataset.
    pub fn seeded() -> Self {
        Self::new(seed::studies(), seed::sites(), seed::patients(), seed::alerts())
    }

    pub fn studies(&self) -> &[Study] {
        &self.studies
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Sites belonging to a study, in store order.
    pub fn sites_for_study<'a: 'b, 'b>(
        &'a self,
        study_id: &'b str,
    ) -> impl Iterator<Item = &'a Site> + 'b {
        self.sites.iter().filter(move |s| s.study_id == study_id)
    }

    /// Patients enrolled at a site, in store order.
    pub fn patients_for_site<'a: 'b, 'b>(
        &'a self,
        site_id: &'b str,
    ) -> impl Iterator<Item = &'a Patient> + 'b {
        self.patients.iter().filter(move |p| p.site_id == site_id)
    }

    /// Alerts raised against a study, in store order.
    pub fn alerts_for_study<'a: 'b, 'b>(
        &'a self,
        study_id: &'b str,
    ) -> impl Iterator<Item = &'a Alert> + 'b {
        self.alerts.iter().filter(move |a| a.study_id == study_id)
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            studies: self.studies.len(),
            sites: self.sites.len(),
            patients: self.patients.len(),
            alerts: self.alerts.len(),
        }
    }

    /// Referential problems in the loaded data.
    ///
    /// Declared study totals that disagree with the child rows are not
    /// reported here; those figures are kept as recorded.
    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        let mut issues: Vec<IntegrityIssue> = self
            .duplicates
            .iter()
            .map(|(kind, id)| IntegrityIssue::DuplicateId { kind: *kind, id: id.clone() })
            .collect();

        for site in &self.sites {
            if self.study(&site.study_id).is_none() {
                issues.push(IntegrityIssue::DanglingStudy {
                    site_id: site.id.clone(),
                    study_id: site.study_id.clone(),
                });
            }
        }

        for patient in &self.patients {
            if self.site(&patient.site_id).is_none() {
                issues.push(IntegrityIssue::DanglingSite {
                    patient_id: patient.id.clone(),
                    site_id: patient.site_id.clone(),
                });
            }
        }

        for alert in &self.alerts {
            if self.resolve(&alert.subject).is_none() {
                issues.push(IntegrityIssue::UnresolvedAlertSubject {
                    alert_id: alert.id.clone(),
                    subject: alert.subject.clone(),
                });
            }
        }

        issues
    }
}

impl EntityLookup for DataStore {
    fn study(&self, id: &str) -> Option<&Study> {
        self.study_index.get(id).map(|&i| &self.studies[i])
    }

    fn site(&self, id: &str) -> Option<&Site> {
        self.site_index.get(id).map(|&i| &self.sites[i])
    }

    fn patient(&self, id: &str) -> Option<&Patient> {
        self.patient_index.get(id).map(|&i| &self.patients[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_seeded_stats() {
        let store = DataStore::seeded();
        assert_eq!(
            store.stats(),
            StoreStats { studies: 5, sites: 18, patients: 12, alerts: 10 }
        );
    }

    #[test]
    fn test_filters_keep_store_order() {
        let store = DataStore::seeded();
        let ids: Vec<&str> = store.sites_for_study("CARD-2024-002").map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["SITE-101", "SITE-102", "SITE-103"]);

        let ids: Vec<&str> = store.patients_for_site("SITE-003").map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["PAT-003-001", "PAT-003-002"]);
    }

    #[test]
    fn test_filtered_records_outlive_the_id_argument() {
        let store = DataStore::seeded();
        let (sites, patients, alerts): (Vec<&Site>, Vec<&Patient>, Vec<&Alert>) = {
            let study_id = String::from("CARD-2024-002");
            let site_id = String::from("SITE-001");
            (
                store.sites_for_study(&study_id).collect(),
                store.patients_for_site(&site_id).collect(),
                store.alerts_for_study(&study_id).collect(),
            )
        };
        assert_eq!(sites.len(), 3);
        assert_eq!(patients.len(), 5);
        assert_eq!(alerts[0].id, "ALT-010");
    }

    #[test]
    fn test_seeded_integrity_flags_placeholder_study_alert() {
        let store = DataStore::seeded();
        let issues = store.integrity_issues();
        assert_eq!(
            issues,
            vec![IntegrityIssue::UnresolvedAlertSubject {
                alert_id: "ALT-006".to_string(),
                subject: EntityRef::Study("STUDY".to_string()),
            }]
        );
    }

    #[test]
    fn test_integrity_reports_dangling_and_duplicates() {
        let mut sites = seed::sites();
        sites[0].study_id = "GONE".to_string();
        let mut patients = seed::patients();
        patients.push(patients[0].clone());
        let store = DataStore::new(seed::studies(), sites, patients, vec![]);

        let issues = store.integrity_issues();
        assert!(issues.contains(&IntegrityIssue::DuplicateId {
            kind: EntityKind::Patient,
            id: "PAT-001-001".to_string(),
        }));
        assert!(issues.contains(&IntegrityIssue::DanglingStudy {
            site_id: "SITE-001".to_string(),
            study_id: "GONE".to_string(),
        }));
    }

    #[test]
    fn test_integrity_issue_json_shape() {
        let issue = IntegrityIssue::UnresolvedAlertSubject {
            alert_id: "ALT-006".to_string(),
            subject: EntityRef::Study("STUDY".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&issue).unwrap(),
            serde_json::json!({
                "issue": "unresolved_alert_subject",
                "alert_id": "ALT-006",
                "subject": { "type": "study", "entity_id": "STUDY" },
            })
        );
    }

    #[test]
    fn test_duplicate_id_first_record_wins() {
        let mut sites = seed::sites();
        let mut dup = sites[0].clone();
        dup.country = "Elsewhere".to_string();
        sites.push(dup);
        let store = DataStore::new(vec![], sites, vec![], vec![]);
        assert_eq!(store.site("SITE-001").map(|s| s.country.as_str()), Some("United States"));
    }
}

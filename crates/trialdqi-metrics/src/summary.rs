//! Study-level KPI summary.

use chrono::NaiveDate;
use serde::Serialize;
use trialdqi_common::RiskLevel;
use trialdqi_db::{DataStore, EntityLookup};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StudySummary {
    /// `"{id}: {name}"`
    pub name: String,
    pub sponsor: String,
    pub snapshot_date: NaiveDate,
    pub overall_dqi: i32,
    pub clean_patient_percentage: u32,
    pub high_risk_sites: usize,
    pub pending_saes: u32,
    /// Copied from the study record.
    pub total_sites: u32,
    /// Copied from the study record.
    pub total_patients: u32,
}

/// Coarse step estimate of the clean-patient share from the study DQI.
/// Not an aggregate over patient records.
pub fn clean_patient_percentage(dqi: i32) -> u32 {
    if dqi >= 80 {
        82
    } else if dqi >= 70 {
        72
    } else {
        65
    }
}

/// Summarise a study. Returns `None` for unknown study ids.
pub fn study_summary(store: &DataStore, study_id: &str) -> Option<StudySummary> {
    let study = store.study(study_id)?;

    let (high_risk_sites, pending_saes) = store
        .sites_for_study(study_id)
        .fold((0usize, 0u32), |(high, saes), site| {
            let high = high + usize::from(site.risk_level == RiskLevel::High);
            (high, saes.saturating_add(site.pending_saes))
        });

    Some(StudySummary {
        name: format!("{}: {}", study.id, study.name),
        sponsor: study.sponsor.clone(),
        snapshot_date: study.last_updated,
        overall_dqi: study.dqi,
        clean_patient_percentage: clean_patient_percentage(study.dqi),
        high_risk_sites,
        pending_saes,
        total_sites: study.total_sites,
        total_patients: study.total_patients,
    })
}

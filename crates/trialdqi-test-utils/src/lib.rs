//! Shared testing utilities for the trialdqi workspace.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use trialdqi_db::DataStore;

/// Fresh store with the built-in sample dataset.
pub fn seeded_store() -> DataStore {
    DataStore::seeded()
}

pub fn shared_store() -> Arc<DataStore> {
    Arc::new(DataStore::seeded())
}

/// The moment the sample dataset was snapshotted.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 27, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Neutral records. Override fields with struct update syntax:
/// `Site { dqi: 50, ..fixtures::site("S", "ST") }`.
pub mod fixtures {
    use chrono::NaiveDate;
    use trialdqi_common::{
        Alert, CodingStatus, EntityRef, Patient, Priority, RiskLevel, SaeStatus, Site, Study,
        StudyStatus,
    };

    pub fn study(id: &str) -> Study {
        Study {
            id: id.to_string(),
            name: format!("{id} Test Study"),
            phase: "Phase II".to_string(),
            therapeutic_area: "Testing".to_string(),
            sponsor: "Test Sponsor".to_string(),
            status: StudyStatus::Active,
            total_sites: 0,
            total_patients: 0,
            dqi: 85,
            last_updated: NaiveDate::from_ymd_opt(2024, 12, 27).unwrap_or_default(),
        }
    }

    /// Low-risk site, DQI 85, every counter at zero.
    pub fn site(id: &str, study_id: &str) -> Site {
        Site {
            id: id.to_string(),
            study_id: study_id.to_string(),
            country: "Testland".to_string(),
            dqi: 85,
            risk_level: RiskLevel::Low,
            patients_enrolled: 0,
            open_queries: 0,
            pending_saes: 0,
            overdue_visits: 0,
        }
    }

    pub fn patient(id: &str, site_id: &str) -> Patient {
        Patient {
            id: id.to_string(),
            site_id: site_id.to_string(),
            dqi: 90,
            is_clean: true,
            missing_visits: 0,
            missing_pages: 0,
            open_queries: 0,
            coding_status: CodingStatus::Complete,
            sae_status: SaeStatus::None,
        }
    }

    pub fn alert(id: &str, study_id: &str, priority: Priority, subject: EntityRef) -> Alert {
        Alert {
            id: id.to_string(),
            study_id: study_id.to_string(),
            priority,
            subject,
            message: format!("{id} message"),
            timestamp: super::reference_now(),
            category: "Data Quality".to_string(),
        }
    }
}

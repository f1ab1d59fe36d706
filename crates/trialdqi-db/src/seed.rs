//! Built-in sample dataset.
//!
//! Declared study totals intentionally exceed the literal child rows for
//! several studies, and one alert points at the placeholder id `"STUDY"`.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use trialdqi_common::{
    Alert, CodingStatus, EntityRef, Patient, Priority, RiskLevel, SaeStatus, Site, Study,
    StudyStatus,
};

const SPONSOR: &str = "Novartis Pharmaceuticals";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single().unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn study(
    id: &str,
    name: &str,
    phase: &str,
    area: &str,
    status: StudyStatus,
    total_sites: u32,
    total_patients: u32,
    dqi: i32,
    last_updated: NaiveDate,
) -> Study {
    Study {
        id: id.to_string(),
        name: name.to_string(),
        phase: phase.to_string(),
        therapeutic_area: area.to_string(),
        sponsor: SPONSOR.to_string(),
        status,
        total_sites,
        total_patients,
        dqi,
        last_updated,
    }
}

pub fn studies() -> Vec<Study> {
    use StudyStatus::*;
    vec![
        study("NOVA-2024-001", "Phase III Oncology Study", "Phase III", "Oncology",
              Active, 24, 486, 78, date(2024, 12, 27)),
        study("CARD-2024-002", "Cardiovascular Outcomes Trial", "Phase II", "Cardiovascular",
              Active, 18, 312, 85, date(2024, 12, 26)),
        study("NEUR-2023-015", "Neurological Disorder Efficacy Study", "Phase III", "Neurology",
              Active, 32, 624, 72, date(2024, 12, 27)),
        study("RESP-2024-008", "Respiratory Disease Prevention Trial", "Phase II", "Respiratory",
              Paused, 12, 186, 91, date(2024, 12, 20)),
        study("IMMU-2023-022", "Immunotherapy Combination Study", "Phase I", "Immunology",
              Active, 8, 64, 88, date(2024, 12, 25)),
    ]
}

#[allow(clippy::too_many_arguments)]
fn site(
    id: &str,
    study_id: &str,
    country: &str,
    dqi: i32,
    risk_level: RiskLevel,
    patients_enrolled: u32,
    open_queries: u32,
    pending_saes: u32,
    overdue_visits: u32,
) -> Site {
    Site {
        id: id.to_string(),
        study_id: study_id.to_string(),
        country: country.to_string(),
        dqi,
        risk_level,
        patients_enrolled,
        open_queries,
        pending_saes,
        overdue_visits,
    }
}

pub fn sites() -> Vec<Site> {
    use RiskLevel::*;
    vec![
        // NOVA-2024-001
        site("SITE-001", "NOVA-2024-001", "United States", 45, High, 42, 28, 3, 8),
        site("SITE-002", "NOVA-2024-001", "Germany", 52, High, 38, 22, 2, 12),
        site("SITE-003", "NOVA-2024-001", "United Kingdom", 88, Low, 35, 4, 0, 1),
        site("SITE-004", "NOVA-2024-001", "France", 65, Medium, 28, 14, 1, 5),
        site("SITE-005", "NOVA-2024-001", "Japan", 91, Low, 45, 2, 0, 0),
        site("SITE-006", "NOVA-2024-001", "Canada", 58, Medium, 22, 18, 1, 4),
        site("SITE-007", "NOVA-2024-001", "Australia", 82, Low, 31, 6, 0, 2),
        site("SITE-008", "NOVA-2024-001", "Spain", 48, High, 26, 25, 2, 9),
        site("SITE-009", "NOVA-2024-001", "Italy", 71, Medium, 33, 11, 1, 3),
        site("SITE-010", "NOVA-2024-001", "Brazil", 44, High, 29, 31, 2, 11),
        site("SITE-011", "NOVA-2024-001", "South Korea", 86, Low, 40, 5, 0, 1),
        site("SITE-012", "NOVA-2024-001", "Netherlands", 79, Low, 24, 7, 0, 2),
        // CARD-2024-002
        site("SITE-101", "CARD-2024-002", "United States", 88, Low, 52, 5, 0, 1),
        site("SITE-102", "CARD-2024-002", "Germany", 84, Low, 45, 8, 0, 2),
        site("SITE-103", "CARD-2024-002", "France", 76, Medium, 38, 12, 1, 3),
        // NEUR-2023-015
        site("SITE-201", "NEUR-2023-015", "United States", 62, Medium, 48, 18, 2, 6),
        site("SITE-202", "NEUR-2023-015", "Japan", 45, High, 55, 32, 4, 10),
        site("SITE-203", "NEUR-2023-015", "United Kingdom", 89, Low, 42, 3, 0, 0),
    ]
}

#[allow(clippy::too_many_arguments)]
fn patient(
    id: &str,
    site_id: &str,
    dqi: i32,
    is_clean: bool,
    missing_visits: u32,
    missing_pages: u32,
    open_queries: u32,
    coding_status: CodingStatus,
    sae_status: SaeStatus,
) -> Patient {
    Patient {
        id: id.to_string(),
        site_id: site_id.to_string(),
        dqi,
        is_clean,
        missing_visits,
        missing_pages,
        open_queries,
        coding_status,
        sae_status,
    }
}

pub fn patients() -> Vec<Patient> {
    use CodingStatus::{Complete, Incomplete, Pending as CodingPending};
    use SaeStatus::{None as NoSae, Overdue, Pending as SaePending, Resolved};
    vec![
        patient("PAT-001-001", "SITE-001", 42, false, 3, 5, 4, Incomplete, Overdue),
        patient("PAT-001-002", "SITE-001", 55, false, 2, 3, 2, CodingPending, SaePending),
        patient("PAT-001-003", "SITE-001", 38, false, 4, 7, 5, Incomplete, Overdue),
        patient("PAT-001-004", "SITE-001", 91, true, 0, 0, 0, Complete, NoSae),
        patient("PAT-001-005", "SITE-001", 62, false, 1, 2, 3, CodingPending, Resolved),
        patient("PAT-002-001", "SITE-002", 48, false, 2, 4, 3, Incomplete, SaePending),
        patient("PAT-002-002", "SITE-002", 85, true, 0, 1, 1, Complete, NoSae),
        patient("PAT-002-003", "SITE-002", 52, false, 3, 5, 4, CodingPending, Overdue),
        patient("PAT-003-001", "SITE-003", 94, true, 0, 0, 0, Complete, NoSae),
        patient("PAT-003-002", "SITE-003", 88, true, 0, 0, 1, Complete, Resolved),
        patient("PAT-004-001", "SITE-004", 68, false, 1, 2, 2, CodingPending, SaePending),
        patient("PAT-005-001", "SITE-005", 96, true, 0, 0, 0, Complete, NoSae),
    ]
}

fn alert(
    id: &str,
    study_id: &str,
    priority: Priority,
    subject: EntityRef,
    message: &str,
    timestamp: DateTime<Utc>,
    category: &str,
) -> Alert {
    Alert {
        id: id.to_string(),
        study_id: study_id.to_string(),
        priority,
        subject,
        message: message.to_string(),
        timestamp,
        category: category.to_string(),
    }
}

pub fn alerts() -> Vec<Alert> {
    use Priority::*;
    let site = |id: &str| EntityRef::Site(id.to_string());
    vec![
        alert("ALT-001", "NOVA-2024-001", High, site("SITE-001"),
              "3 unresolved SAE reviews pending >7 days",
              instant(2024, 12, 27, 8, 30), "Safety"),
        alert("ALT-002", "NOVA-2024-001", High, site("SITE-010"),
              "Query backlog increased by 40% in past 2 weeks",
              instant(2024, 12, 27, 7, 15), "Data Quality"),
        alert("ALT-003", "NOVA-2024-001", High, site("SITE-002"),
              "12 overdue visits detected - immediate attention required",
              instant(2024, 12, 26, 16, 45), "Compliance"),
        alert("ALT-004", "NOVA-2024-001", Medium, EntityRef::Patient("PAT-001-001".to_string()),
              "Patient has 3 consecutive missed visits",
              instant(2024, 12, 26, 14, 20), "Compliance"),
        alert("ALT-005", "NOVA-2024-001", Medium, site("SITE-008"),
              "MedDRA coding incomplete for 8 patients",
              instant(2024, 12, 26, 11, 0), "Coding"),
        alert("ALT-006", "NOVA-2024-001", High, EntityRef::Study("STUDY".to_string()),
              "Overall DQI dropped below 80% threshold",
              instant(2024, 12, 25, 9, 30), "Data Quality"),
        alert("ALT-007", "NOVA-2024-001", Medium, site("SITE-004"),
              "Principal Investigator signature pending for 5 patients",
              instant(2024, 12, 25, 8, 0), "Verification"),
        alert("ALT-008", "NOVA-2024-001", Low, site("SITE-009"),
              "Minor protocol deviation reported - documentation pending",
              instant(2024, 12, 24, 15, 30), "Compliance"),
        alert("ALT-009", "NEUR-2023-015", High, site("SITE-202"),
              "4 SAE reviews overdue - critical attention needed",
              instant(2024, 12, 27, 9, 0), "Safety"),
        alert("ALT-010", "CARD-2024-002", Medium, site("SITE-103"),
              "Query response time exceeding SLA",
              instant(2024, 12, 26, 10, 0), "Data Quality"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_sizes() {
        assert_eq!(studies().len(), 5);
        assert_eq!(sites().len(), 18);
        assert_eq!(patients().len(), 12);
        assert_eq!(alerts().len(), 10);
    }

    #[test]
    fn test_seed_ids_unique() {
        let ids: HashSet<_> = sites().into_iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), 18);
        let ids: HashSet<_> = patients().into_iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 12);
        let ids: HashSet<_> = alerts().into_iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_seed_literals_are_valid_dates() {
        let first = &studies()[0];
        assert_eq!(first.last_updated.to_string(), "2024-12-27");
        let a = &alerts()[0];
        assert_eq!(a.timestamp.to_rfc3339(), "2024-12-27T08:30:00+00:00");
    }
}

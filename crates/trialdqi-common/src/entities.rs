//! Core entity types for the trial data-quality model.
//! Study 1—* Site 1—* Patient, with alerts attached to a study and pointing
//! at a subject by weak reference.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Study
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StudyStatus {
    Active,
    Completed,
    Paused,
}

impl StudyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyStatus::Active    => "active",
            StudyStatus::Completed => "completed",
            StudyStatus::Paused    => "paused",
        }
    }

    /// Capitalised label for badges.
    pub fn label(&self) -> &'static str {
        match self {
            StudyStatus::Active    => "Active",
            StudyStatus::Completed => "Completed",
            StudyStatus::Paused    => "Paused",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Study {
    pub id: String,
    pub name: String,
    pub phase: String,
    pub therapeutic_area: String,
    pub sponsor: String,
    pub status: StudyStatus,
    /// Declared site count. Not derived from the site records.
    pub total_sites: u32,
    /// Declared patient count. Not derived from the patient records.
    pub total_patients: u32,
    pub dqi: i32,
    pub last_updated: NaiveDate,
}

// ---------------------------------------------------------------------------
// Site
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Sort rank: high first.
    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::High   => 0,
            RiskLevel::Medium => 1,
            RiskLevel::Low    => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High   => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low    => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High   => "High Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::Low    => "Low Risk",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Site {
    pub id: String,
    pub study_id: String,
    pub country: String,
    pub dqi: i32,
    pub risk_level: RiskLevel,
    pub patients_enrolled: u32,
    pub open_queries: u32,
    pub pending_saes: u32,
    pub overdue_visits: u32,
}

// ---------------------------------------------------------------------------
// Patient
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CodingStatus {
    Complete,
    Pending,
    Incomplete,
}

impl CodingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CodingStatus::Complete   => "Complete",
            CodingStatus::Pending    => "Pending",
            CodingStatus::Incomplete => "Incomplete",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SaeStatus {
    None,
    Pending,
    Resolved,
    Overdue,
}

impl SaeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SaeStatus::None     => "None",
            SaeStatus::Pending  => "Pending",
            SaeStatus::Resolved => "Resolved",
            SaeStatus::Overdue  => "Overdue",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: String,
    pub site_id: String,
    pub dqi: i32,
    pub is_clean: bool,
    pub missing_visits: u32,
    pub missing_pages: u32,
    pub open_queries: u32,
    pub coding_status: CodingStatus,
    pub sae_status: SaeStatus,
}

// ---------------------------------------------------------------------------
// Entity references
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Study,
    Site,
    Patient,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Study   => "study",
            EntityKind::Site    => "site",
            EntityKind::Patient => "patient",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weak reference from an alert to the entity it concerns.
///
/// Serialised as `{"type": "site", "entity_id": "SITE-001"}`. The id is never
/// checked at construction, so resolving it may find nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", content = "entity_id", rename_all = "snake_case")]
pub enum EntityRef {
    Site(String),
    Patient(String),
    Study(String),
}

impl EntityRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Site(_)    => EntityKind::Site,
            EntityRef::Patient(_) => EntityKind::Patient,
            EntityRef::Study(_)   => EntityKind::Study,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            EntityRef::Site(id) | EntityRef::Patient(id) | EntityRef::Study(id) => id,
        }
    }
}

// ---------------------------------------------------------------------------
// Alert
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High   => 0,
            Priority::Medium => 1,
            Priority::Low    => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High   => "High Priority",
            Priority::Medium => "Medium Priority",
            Priority::Low    => "Low Priority",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: String,
    pub study_id: String,
    pub priority: Priority,
    pub subject: EntityRef,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entity_ref_wire_shape() {
        let r = EntityRef::Site("SITE-001".to_string());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json, serde_json::json!({"type": "site", "entity_id": "SITE-001"}));

        let parsed: EntityRef =
            serde_json::from_str(r#"{"type":"patient","entity_id":"PAT-001-001"}"#).unwrap();
        assert_eq!(parsed, EntityRef::Patient("PAT-001-001".to_string()));
        assert_eq!(parsed.kind(), EntityKind::Patient);
        assert_eq!(parsed.id(), "PAT-001-001");
    }

    #[test]
    fn test_rank_orders_high_first() {
        assert!(RiskLevel::High.rank() < RiskLevel::Medium.rank());
        assert!(RiskLevel::Medium.rank() < RiskLevel::Low.rank());
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }
}

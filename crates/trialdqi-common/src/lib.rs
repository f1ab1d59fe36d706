//! trialdqi-common: Shared entity types and errors used across all trialdqi crates.

pub mod error;
pub mod entities;

// Re-export commonly used types
pub use entities::{
    Alert, CodingStatus, EntityKind, EntityRef, Patient, Priority, RiskLevel, SaeStatus, Site,
    Study, StudyStatus,
};
pub use error::{ApiError, Result, TrialDqiError};

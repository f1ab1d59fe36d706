//! View-ready composites assembled by [`crate::MetricsEngine`].

use serde::Serialize;
use trialdqi_common::{Alert, Patient, Site, Study};

use crate::breakdown::DqiBreakdown;

/// Landing page data.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioOverview<'a> {
    pub active: Vec<&'a Study>,
    pub paused: Vec<&'a Study>,
    /// Sum of declared totals across every study.
    pub total_sites: u32,
    pub total_patients: u32,
}

impl PortfolioOverview<'_> {
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteDetail<'a> {
    pub site: &'a Site,
    pub patients: Vec<&'a Patient>,
    pub breakdown: Vec<DqiBreakdown>,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientDetail<'a> {
    pub patient: &'a Patient,
    pub site: &'a Site,
}

/// An alert with its subject resolved for display.
#[derive(Debug, Clone, Serialize)]
pub struct AlertEntry<'a> {
    pub alert: &'a Alert,
    /// "SITE-001 • United States", or the raw entity id when unresolved.
    pub entity_label: String,
    /// Drill-down route for site and patient subjects.
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertQueue<'a> {
    /// Priority order, high first.
    pub entries: Vec<AlertEntry<'a>>,
    pub total: usize,
    pub high: usize,
    pub medium: usize,
}

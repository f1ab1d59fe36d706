//! Threshold bands and KPI variants used by the views.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DqiBand {
    Good,
    Fair,
    Poor,
}

impl DqiBand {
    pub fn css_class(&self) -> &'static str {
        match self {
            DqiBand::Good => "band-good",
            DqiBand::Fair => "band-fair",
            DqiBand::Poor => "band-poor",
        }
    }
}

/// Where a DQI is shown decides its cut-offs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DqiScale {
    /// Study list: good at 80, fair at 70.
    Portfolio,
    /// Site and patient tables: good at 80, fair at 60.
    Detail,
}

impl DqiScale {
    pub fn band(&self, dqi: i32) -> DqiBand {
        let fair_from = match self {
            DqiScale::Portfolio => 70,
            DqiScale::Detail => 60,
        };
        if dqi >= 80 {
            DqiBand::Good
        } else if dqi >= fair_from {
            DqiBand::Fair
        } else {
            DqiBand::Poor
        }
    }
}

/// Zero is good, up to two is fair.
pub fn open_query_band(open_queries: u32) -> DqiBand {
    match open_queries {
        0 => DqiBand::Good,
        1..=2 => DqiBand::Fair,
        _ => DqiBand::Poor,
    }
}

/// Zero is good, anything else is poor.
pub fn count_band(count: u32) -> DqiBand {
    if count == 0 { DqiBand::Good } else { DqiBand::Poor }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KpiVariant {
    Default,
    Success,
    Warning,
    Danger,
}

impl KpiVariant {
    pub fn css_class(&self) -> &'static str {
        match self {
            KpiVariant::Default => "kpi-default",
            KpiVariant::Success => "kpi-success",
            KpiVariant::Warning => "kpi-warning",
            KpiVariant::Danger  => "kpi-danger",
        }
    }
}

pub const DQI_TARGET: i32 = 80;

pub fn dqi_kpi(dqi: i32) -> KpiVariant {
    if dqi >= DQI_TARGET { KpiVariant::Success } else { KpiVariant::Warning }
}

pub fn clean_patients_kpi(percentage: u32) -> KpiVariant {
    if percentage >= 80 { KpiVariant::Success } else { KpiVariant::Warning }
}

pub fn high_risk_sites_kpi(count: usize) -> KpiVariant {
    if count > 2 { KpiVariant::Danger } else { KpiVariant::Default }
}

pub fn pending_saes_kpi(count: u32) -> KpiVariant {
    match count {
        0 => KpiVariant::Success,
        1..=5 => KpiVariant::Warning,
        _ => KpiVariant::Danger,
    }
}

/// Estimated clean patients out of the declared total, rounded half up.
pub fn clean_patient_count(total_patients: u32, percentage: u32) -> u32 {
    ((total_patients as f64 * percentage as f64 / 100.0).round()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_and_detail_scales_differ() {
        assert_eq!(DqiScale::Portfolio.band(72), DqiBand::Fair);
        assert_eq!(DqiScale::Portfolio.band(65), DqiBand::Poor);
        assert_eq!(DqiScale::Detail.band(65), DqiBand::Fair);
        assert_eq!(DqiScale::Detail.band(59), DqiBand::Poor);
        assert_eq!(DqiScale::Detail.band(80), DqiBand::Good);
    }

    #[test]
    fn test_open_query_band() {
        assert_eq!(open_query_band(0), DqiBand::Good);
        assert_eq!(open_query_band(2), DqiBand::Fair);
        assert_eq!(open_query_band(3), DqiBand::Poor);
    }

    #[test]
    fn test_kpi_variants() {
        assert_eq!(dqi_kpi(78), KpiVariant::Warning);
        assert_eq!(dqi_kpi(80), KpiVariant::Success);
        assert_eq!(high_risk_sites_kpi(2), KpiVariant::Default);
        assert_eq!(high_risk_sites_kpi(3), KpiVariant::Danger);
        assert_eq!(pending_saes_kpi(0), KpiVariant::Success);
        assert_eq!(pending_saes_kpi(5), KpiVariant::Warning);
        assert_eq!(pending_saes_kpi(12), KpiVariant::Danger);
    }

    #[test]
    fn test_clean_patient_count_rounds() {
        // 486 * 0.72 = 349.92
        assert_eq!(clean_patient_count(486, 72), 350);
        // 186 * 0.82 = 152.52
        assert_eq!(clean_patient_count(186, 82), 153);
        assert_eq!(clean_patient_count(0, 65), 0);
    }
}

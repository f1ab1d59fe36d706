//! Templated monitoring insights for a site.
//!
//! Checks run in a fixed order and that order is the output order.

use trialdqi_common::{RiskLevel, Site};

/// Overdue visits above this count trigger a scheduling insight.
pub const OVERDUE_VISIT_THRESHOLD: u32 = 5;
/// Open queries above this count trigger a backlog insight.
pub const QUERY_BACKLOG_THRESHOLD: u32 = 15;

pub const FALLBACK_INSIGHT: &str =
    "Site performance is within acceptable parameters. Continue routine monitoring.";

pub fn site_insights(site: &Site) -> Vec<String> {
    let mut insights = Vec::new();

    if site.risk_level == RiskLevel::High {
        insights.push(format!(
            "This site is classified as HIGH RISK with a DQI score of {}. \
             Immediate CRA intervention is recommended.",
            site.dqi
        ));
    }

    if site.pending_saes > 0 {
        insights.push(format!(
            "{} SAE reviews are pending. Safety data must be prioritized for regulatory compliance.",
            site.pending_saes
        ));
    }

    if site.overdue_visits > OVERDUE_VISIT_THRESHOLD {
        insights.push(format!(
            "{} patient visits are overdue by more than 30 days. \
             Schedule site contact to address scheduling issues.",
            site.overdue_visits
        ));
    }

    if site.open_queries > QUERY_BACKLOG_THRESHOLD {
        insights.push(format!(
            "Query backlog of {} items is above threshold. Consider targeted data cleaning session.",
            site.open_queries
        ));
    }

    if insights.is_empty() {
        insights.push(FALLBACK_INSIGHT.to_string());
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use trialdqi_test_utils::fixtures;

    #[test]
    fn test_site_001_four_insights_in_order() {
        let store = trialdqi_test_utils::seeded_store();
        let site = store.sites().iter().find(|s| s.id == "SITE-001").unwrap();
        let out = site_insights(site);
        assert_eq!(out.len(), 4);
        assert!(out[0].contains("HIGH RISK") && out[0].contains("45"));
        assert!(out[1].starts_with("3 SAE reviews"));
        assert!(out[2].starts_with("8 patient visits"));
        assert!(out[3].contains("Query backlog of 28"));
    }

    #[test]
    fn test_high_risk_with_pending_saes() {
        let site = Site {
            risk_level: RiskLevel::High,
            dqi: 52,
            pending_saes: 3,
            ..fixtures::site("S", "ST")
        };
        let out = site_insights(&site);
        assert!(out.len() >= 2);
        assert!(out[0].contains("HIGH RISK"));
        assert!(out[0].contains("52"));
        assert!(out[1].contains('3'));
        assert!(out[1].contains("SAE"));
    }

    #[test]
    fn test_fallback_when_nothing_fires() {
        let site = Site {
            risk_level: RiskLevel::Medium,
            pending_saes: 0,
            overdue_visits: OVERDUE_VISIT_THRESHOLD,
            open_queries: QUERY_BACKLOG_THRESHOLD,
            ..fixtures::site("S", "ST")
        };
        assert_eq!(site_insights(&site), vec![FALLBACK_INSIGHT.to_string()]);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let site = Site {
            overdue_visits: OVERDUE_VISIT_THRESHOLD + 1,
            ..fixtures::site("S", "ST")
        };
        let out = site_insights(&site);
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with("6 patient visits"));
    }
}

//! Display orderings for sites and alerts.
//! Both sorts are stable: equal keys keep their incoming order.

use trialdqi_common::{Alert, Site};

/// Risk rank first (high, medium, low), then ascending DQI.
pub fn sort_sites_by_risk(sites: &mut [&Site]) {
    sites.sort_by_key(|s| (s.risk_level.rank(), s.dqi));
}

/// Priority rank only (high, medium, low).
pub fn sort_alerts_by_priority(alerts: &mut [&Alert]) {
    alerts.sort_by_key(|a| a.priority.rank());
}

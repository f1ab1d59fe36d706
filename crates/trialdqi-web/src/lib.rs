//! trialdqi-web: Web dashboard for clinical-trial data quality.
//! Provides:
//!   - Study portfolio landing page
//!   - Per-study KPI dashboard with risk-sorted sites and alerts
//!   - Site drill-down with DQI breakdown and insights
//!   - Patient status view
//!   - Priority-sorted alert queue
//!   - Read-only JSON API over the same data

pub mod router;
pub mod handlers;
pub mod state;

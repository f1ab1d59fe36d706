//! trialdqi-metrics: Derived views over the trial data store.
//! Study summaries, risk and priority orderings, DQI breakdowns and
//! site insights. Nothing here mutates the store.

pub mod summary;
pub mod ordering;
pub mod breakdown;
pub mod insights;
pub mod bands;
pub mod timefmt;
pub mod views;
pub mod engine;

pub use breakdown::{DqiBreakdown, FixedScoreSource, RandomScoreSource, ScoreSource};
pub use engine::MetricsEngine;
pub use summary::StudySummary;
pub use views::{AlertEntry, AlertQueue, PatientDetail, PortfolioOverview, SiteDetail};

//! Shared application state for the web server.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use trialdqi_config::MetricsConfig;
use trialdqi_db::DataStore;
use trialdqi_metrics::{MetricsEngine, RandomScoreSource};

/// Shared state injected into every Axum handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: MetricsEngine,
    /// Alerts shown on the study dashboard panel.
    pub alert_panel_limit: usize,
    /// Pinned "now" for relative timestamps. `None` reads the system clock.
    pub now: Option<DateTime<Utc>>,
}

impl AppState {
    pub fn new(engine: MetricsEngine, alert_panel_limit: usize) -> Self {
        Self { engine, alert_panel_limit, now: None }
    }

    /// State over `store`, with the breakdown source seeded from config when set.
    pub fn from_config(store: Arc<DataStore>, metrics: &MetricsConfig) -> Self {
        let engine = match metrics.breakdown_seed {
            Some(seed) => {
                tracing::info!(seed, "DQI breakdown using seeded source");
                MetricsEngine::new(store, Arc::new(RandomScoreSource::seeded(seed)))
            }
            None => MetricsEngine::unseeded(store),
        };
        Self::new(engine, metrics.alert_panel_limit)
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

pub type SharedState = Arc<AppState>;

//! trialdqi web server
//!
//! Run with: cargo run -p trialdqi-web

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use trialdqi_config::{Config, LoggingConfig};
use trialdqi_db::DataStore;
use trialdqi_web::{router::build_router, state::AppState};

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))?;

    let builder = FmtSubscriber::builder().with_env_filter(filter);
    if logging.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    init_tracing(&config.logging)?;

    info!("Starting trialdqi web server...");

    let store = Arc::new(DataStore::seeded());
    let stats = store.stats();
    info!(
        studies = stats.studies,
        sites = stats.sites,
        patients = stats.patients,
        alerts = stats.alerts,
        "data store ready"
    );
    for issue in store.integrity_issues() {
        warn!(?issue, "data integrity issue");
    }

    let state = AppState::from_config(store, &config.metrics);
    let app = build_router(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use earnings_tracker::modules::earnings::use_cases::track_earnings::handler::EarningsTracker;
use earnings_tracker::shared::core::primitives::SystemWallClock;
use earnings_tracker::shared::infrastructure::key_value_store::json_file::JsonFileKeyValueStore;
use earnings_tracker::shell::config::AppConfig;
use earnings_tracker::shell::http::router;
use earnings_tracker::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;

    let store = Arc::new(JsonFileKeyValueStore::new(&config.store_path));
    let tracker = EarningsTracker::load(store, Arc::new(SystemWallClock), config.is_dark).await;
    let state = AppState {
        tracker: Arc::new(tracker),
    };

    let app = router(state);

    tracing::info!(store = %config.store_path.display(), "using ledger store");
    tracing::info!("HTTP endpoint: http://{}/state", config.addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

use std::sync::Arc;

use cashflow_radar::config::Config;
use cashflow_radar::server;
use cashflow_radar::services::stats_client::HttpStatsProvider;
use cashflow_radar::state::SystemClock;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cashflow_radar=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        "Starting Cashflow Radar {} on {}",
        cashflow_radar::VERSION,
        config.address()
    );
    tracing::info!("Reading stats from {}", config.stats_api_url);

    let provider = HttpStatsProvider::from_config(&config).expect("Failed to build HTTP client");
    let (host, port) = (config.host.clone(), config.port);
    let (_, app) = server::build_app(config, Arc::new(provider), Arc::new(SystemClock));

    let (port, handle) = server::serve(app, &host, port)
        .await
        .expect("Failed to bind address");

    tracing::info!("Listening on http://{}:{}", host, port);

    if let Err(e) = handle.await {
        tracing::error!("Server task failed: {}", e);
    }
}

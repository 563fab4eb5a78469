use std::sync::Arc;

use crypto_dashboard::api::{run_server, AppState};
use crypto_dashboard::config::AppConfig;
use crypto_dashboard::logging::init_logging;
use crypto_dashboard::market::coingecko::CoinGeckoClient;
use crypto_dashboard::constants::DEFAULT_LOG_LEVEL;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    // Load Configuration; logging falls back to the default level when it fails
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_logging(DEFAULT_LOG_LEVEL);
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Setup Logging
    init_logging(&config.log_level);
    info!("Starting Crypto Dashboard backend...");
    info!(
        "Upstream: {} (api key: {}, timeout: {:?})",
        config.upstream.base_url,
        if config.upstream.api_key.is_some() { "set" } else { "none" },
        config.upstream.timeout_secs
    );
    info!(
        "Assets: public={} client={}",
        config.assets.public_dir.display(),
        config.assets.client_dist_dir.display()
    );

    let prices = Arc::new(CoinGeckoClient::new(config.upstream.clone())?);
    let state = Arc::new(AppState::new(config, prices)?);

    run_server(state).await
}

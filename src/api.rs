use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, Method},
    middleware,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
};
use tracing::{error, info, warn};
use url::Url;

use crate::config::AppConfig;
use crate::error::{ApiError, ConfigError};
use crate::market::{coin::Coin, traits::PriceSource};
use crate::services::dashboard::{iso_millis, load_dashboard, DashboardData};

pub struct AppState {
    pub config: AppConfig,
    pub prices: Arc<dyn PriceSource>,
    pub dashboard_base: Url,
}

impl AppState {
    pub fn new(config: AppConfig, prices: Arc<dyn PriceSource>) -> Result<Self, ConfigError> {
        let dashboard_base = config.dashboard_url()?;
        Ok(Self { config, prices, dashboard_base })
    }
}

#[derive(Debug, Deserialize)]
pub struct CryptoPriceRequest {
    pub symbol: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
}

/// API routes first, then `.well-known`, then the SPA bundle. Every GET no
/// other route answers, including `GET /crypto-price` and missing
/// `.well-known` files, gets `index.html`.
pub fn router(state: Arc<AppState>) -> Result<Router, ConfigError> {
    let config = &state.config;

    let csp = config.content_security_policy();
    let csp = HeaderValue::from_str(&csp)
        .map_err(|_| ConfigError::InvalidHeader { field: "frame_ancestors", value: csp })?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let index = ServeFile::new(config.index_path());
    let spa = ServeDir::new(&config.assets.client_dist_dir).fallback(index.clone());
    let well_known = ServeDir::new(config.well_known_dir()).fallback(index.clone());

    let app = Router::new()
        .route("/health", get(health))
        .route("/crypto-price", post(crypto_price).get_service(index))
        .route_service("/openapi.yaml", ServeFile::new(config.openapi_path()))
        .nest_service("/.well-known", well_known)
        .fallback_service(spa)
        .layer(middleware::map_response(strip_frame_options))
        .layer(SetResponseHeaderLayer::overriding(header::CONTENT_SECURITY_POLICY, csp))
        .layer(cors)
        .with_state(state);

    Ok(app)
}

pub async fn run_server(state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = state.config.bind_addr();
    let app = router(state)?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Crypto Dashboard backend running on http://{}", addr);
    info!("📊 API endpoint: POST http://{}/crypto-price", addr);
    info!("🔌 Plugin manifest: http://{}/.well-known/ai-plugin.json", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn strip_frame_options(mut response: Response) -> Response {
    response.headers_mut().remove(header::X_FRAME_OPTIONS);
    response
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        timestamp: iso_millis(&Utc::now()),
    })
}

async fn crypto_price(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CryptoPriceRequest>, JsonRejection>,
) -> Result<Json<DashboardData>, ApiError> {
    let symbol = match payload {
        Ok(Json(req)) => req.symbol,
        Err(rejection) => {
            warn!("POST /crypto-price - unreadable body: {}", rejection.body_text());
            None
        }
    };

    let coin = parse_symbol(symbol.as_deref())?;
    info!("POST /crypto-price - Fetching {}", coin);

    let data = load_dashboard(state.prices.as_ref(), coin, &state.dashboard_base)
        .await
        .map_err(|e| {
            error!("Failed to fetch {} from {}: {}", coin, state.prices.name(), e);
            ApiError::from(e)
        })?;

    Ok(Json(data))
}

fn parse_symbol(symbol: Option<&str>) -> Result<Coin, ApiError> {
    let Some(symbol) = symbol else {
        warn!("POST /crypto-price - missing symbol");
        return Err(ApiError::InvalidSymbol);
    };

    symbol.parse::<Coin>().map_err(|e| {
        warn!("POST /crypto-price - {}", e);
        ApiError::from(e)
    })
}

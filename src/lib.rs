//! Crypto Dashboard - price normalization backend
//!
//! Proxies CoinGecko coin data, reshapes it into a display-ready record and
//! serves the static assets of the dashboard frontend.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod market;
pub mod services;

// Re-export commonly used types
pub use api::{router, AppState};
pub use config::AppConfig;
pub use market::{coin::Coin, traits::PriceSource, types::CoinSnapshot};
pub use services::dashboard::{ChartPoint, DashboardData};

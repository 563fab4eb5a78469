//! Reshapes upstream coin data into the flat record the frontend renders.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use tracing::{info, warn};
use url::Url;

use super::formatting::{format_fixed2, format_percent, format_usd};
use crate::constants::{dashboard, upstream};
use crate::error::UpstreamError;
use crate::market::{coin::Coin, traits::PriceSource, types::CoinSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    #[serde(serialize_with = "serialize_iso_millis")]
    pub time: DateTime<Utc>,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub coin_name: String,
    pub current_price: String,
    #[serde(rename = "change24h")]
    pub change_24h: String,
    /// Direction of the 24h move, so clients don't re-parse `change24h`
    pub is_positive_change: bool,
    pub chart_data: Vec<ChartPoint>,
    pub dashboard_url: String,
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`
pub fn iso_millis(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_iso_millis<S>(t: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&iso_millis(t))
}

/// One point per upstream price, one hour apart, the last one at `now`.
pub fn chart_points(prices: &[f64], now: DateTime<Utc>) -> Vec<ChartPoint> {
    let n = prices.len();
    prices
        .iter()
        .enumerate()
        .map(|(i, price)| ChartPoint {
            time: now - Duration::hours((n - 1 - i) as i64),
            price: format_fixed2(*price),
        })
        .collect()
}

pub fn dashboard_url(base: &Url, coin: Coin) -> String {
    let mut url = base.clone();
    url.query_pairs_mut().append_pair(dashboard::COIN_QUERY_PARAM, coin.id());
    url.to_string()
}

/// Pure transform: same snapshot and clock in, same record out.
pub fn build_dashboard(
    coin: Coin,
    snapshot: &CoinSnapshot,
    now: DateTime<Utc>,
    dashboard_base: &Url,
) -> DashboardData {
    let prices = snapshot.sparkline();
    if prices.len() != upstream::SPARKLINE_POINTS {
        // Timestamps assume hourly spacing; a different length likely means
        // the upstream series changed shape.
        warn!(
            "⚠️ {} sparkline has {} points (expected {})",
            coin,
            prices.len(),
            upstream::SPARKLINE_POINTS
        );
    }

    let change = snapshot.change_24h_pct();

    DashboardData {
        coin_name: snapshot.name.clone(),
        current_price: format_usd(snapshot.current_price_usd()),
        change_24h: format_percent(change),
        is_positive_change: change >= 0.0,
        chart_data: chart_points(prices, now),
        dashboard_url: dashboard_url(dashboard_base, coin),
    }
}

/// Fetch once from `source` and reshape. No retry.
pub async fn load_dashboard(
    source: &dyn PriceSource,
    coin: Coin,
    dashboard_base: &Url,
) -> Result<DashboardData, UpstreamError> {
    let snapshot = source.fetch_coin(coin).await?;
    let data = build_dashboard(coin, &snapshot, Utc::now(), dashboard_base);

    info!(
        "📊 {} via {}: {} ({}), {} chart points",
        data.coin_name,
        source.name(),
        data.current_price,
        data.change_24h,
        data.chart_data.len()
    );
    Ok(data)
}

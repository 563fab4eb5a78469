use serde::Deserialize;

/// Subset of CoinGecko's `/coins/{id}` payload the dashboard reads.
/// Anything else in the response is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoinSnapshot {
    pub name: String,
    pub market_data: MarketData,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketData {
    pub current_price: CurrentPrice,
    pub price_change_percentage_24h: f64,
    pub sparkline_7d: Sparkline,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentPrice {
    pub usd: f64,
}

/// Hourly prices, oldest first
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sparkline {
    pub price: Vec<f64>,
}

impl CoinSnapshot {
    pub fn current_price_usd(&self) -> f64 {
        self.market_data.current_price.usd
    }

    pub fn change_24h_pct(&self) -> f64 {
        self.market_data.price_change_percentage_24h
    }

    pub fn sparkline(&self) -> &[f64] {
        &self.market_data.sparkline_7d.price
    }
}

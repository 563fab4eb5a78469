use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{
    coin::Coin,
    traits::{PriceSource, UpstreamResult},
    types::CoinSnapshot,
};
use crate::config::UpstreamConfig;
use crate::constants::upstream;
use crate::error::UpstreamError;

/// CoinGecko REST adapter.
///
/// Works against the public API without a key; a demo key is sent as a
/// header when configured.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut builder = Client::builder().user_agent(config.user_agent);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    fn coin_endpoint(&self, coin: Coin) -> String {
        format!("{}/coins/{}", self.base_url, coin.id())
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    async fn fetch_coin(&self, coin: Coin) -> UpstreamResult<CoinSnapshot> {
        let mut req = self
            .client
            .get(self.coin_endpoint(coin))
            .query(&upstream::COIN_QUERY);
        if let Some(key) = &self.api_key {
            req = req.header(upstream::API_KEY_HEADER, key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Http { status: status.as_u16() });
        }

        let text = resp.text().await?;
        let snapshot: CoinSnapshot = serde_json::from_str(&text)?;
        Ok(snapshot)
    }
}

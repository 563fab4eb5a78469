use async_trait::async_trait;

use super::{coin::Coin, types::CoinSnapshot};
use crate::error::UpstreamError;

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Source of current market data for a coin.
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// One request, one attempt. Callers decide what to do with failures.
    async fn fetch_coin(&self, coin: Coin) -> UpstreamResult<CoinSnapshot>;
}

//! Coins the dashboard supports.
//!
//! The provider identifier doubles as the canonical lower-case symbol:
//! - Bitcoin:  "bitcoin"
//! - Ethereum: "ethereum"

use std::fmt;
use std::str::FromStr;

use crate::error::UnsupportedCoin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coin {
    Bitcoin,
    Ethereum,
}

impl Coin {
    pub const ALL: [Coin; 2] = [Coin::Bitcoin, Coin::Ethereum];

    /// CoinGecko coin id
    pub fn id(&self) -> &'static str {
        match self {
            Coin::Bitcoin => "bitcoin",
            Coin::Ethereum => "ethereum",
        }
    }
}

impl FromStr for Coin {
    type Err = UnsupportedCoin;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase();
        Coin::ALL
            .into_iter()
            .find(|c| c.id() == normalized)
            .ok_or_else(|| UnsupportedCoin(s.to_string()))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

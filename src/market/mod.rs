pub mod coin;
pub mod coingecko;
pub mod traits;
pub mod types;

//! Application-wide constants
//!
//! Defaults for configuration fields and fixed values of the upstream
//! contract live here so they can be tuned in one place.

/// Log filter used when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Server defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 3000;
}

/// Static asset locations (relative to the working directory)
pub mod assets {
    pub const DEFAULT_PUBLIC_DIR: &str = "public";
    pub const DEFAULT_CLIENT_DIST_DIR: &str = "client/dist";
    pub const OPENAPI_FILE: &str = "openapi.yaml";
    pub const WELL_KNOWN_DIR: &str = ".well-known";
    pub const INDEX_FILE: &str = "index.html";
}

/// CoinGecko upstream contract
pub mod upstream {
    pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

    /// Header carrying a CoinGecko demo API key
    pub const API_KEY_HEADER: &str = "x-cg-demo-api-key";

    pub const DEFAULT_USER_AGENT: &str = concat!("crypto-dashboard/", env!("CARGO_PKG_VERSION"));

    /// Query flags sent with every `/coins/{id}` request: drop the heavy
    /// sub-objects, keep the 7-day sparkline.
    pub const COIN_QUERY: [(&str, &str); 5] = [
        ("localization", "false"),
        ("tickers", "false"),
        ("community_data", "false"),
        ("developer_data", "false"),
        ("sparkline", "true"),
    ];

    /// One point per hour over 7 days
    pub const SPARKLINE_POINTS: usize = 168;
}

/// Dashboard link and embedding policy
pub mod dashboard {
    pub const DEFAULT_BASE_URL: &str = "https://crypto-teck-mcp.vercel.app/";

    /// Query parameter naming the coin on the dashboard URL
    pub const COIN_QUERY_PARAM: &str = "coin";

    pub const DEFAULT_FRAME_ANCESTORS: [&str; 2] = ["https://chat.openai.com", "https://chatgpt.com"];
}

/// Client-facing error messages
pub mod messages {
    pub const INVALID_SYMBOL: &str = "Invalid symbol. Please use \"bitcoin\" or \"ethereum\".";
    pub const FETCH_FAILED: &str = "Failed to fetch cryptocurrency data";
}

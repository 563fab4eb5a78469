//! Unit tests for the dashboard transform.

#[cfg(test)]
mod dashboard_tests {
    use crate::error::UpstreamError;
    use crate::market::coin::Coin;
    use crate::market::traits::{PriceSource, UpstreamResult};
    use crate::market::types::{CoinSnapshot, CurrentPrice, MarketData, Sparkline};
    use crate::services::dashboard::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use url::Url;

    fn snapshot(name: &str, usd: f64, change: f64, prices: Vec<f64>) -> CoinSnapshot {
        CoinSnapshot {
            name: name.to_string(),
            market_data: MarketData {
                current_price: CurrentPrice { usd },
                price_change_percentage_24h: change,
                sparkline_7d: Sparkline { price: prices },
            },
        }
    }

    fn hourly_prices(n: usize) -> Vec<f64> {
        (0..n).map(|i| 44000.0 + i as f64 * 7.123456).collect()
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn base() -> Url {
        Url::parse("https://crypto-teck-mcp.vercel.app/").unwrap()
    }

    // ============= Transform Tests =============

    #[test]
    fn test_bitcoin_reference_values() {
        let snap = snapshot("Bitcoin", 45000.5, 2.345, hourly_prices(168));
        let data = build_dashboard(Coin::Bitcoin, &snap, fixed_now(), &base());

        assert_eq!(data.coin_name, "Bitcoin");
        assert_eq!(data.current_price, "$45,000.50");
        assert_eq!(data.change_24h, "2.35%");
        assert!(data.is_positive_change);
        assert_eq!(data.chart_data.len(), 168);
        assert_eq!(data.dashboard_url, "https://crypto-teck-mcp.vercel.app/?coin=bitcoin");
    }

    #[test]
    fn test_negative_change_direction() {
        let snap = snapshot("Ethereum", 3000.0, -1.5, hourly_prices(168));
        let data = build_dashboard(Coin::Ethereum, &snap, fixed_now(), &base());

        assert_eq!(data.change_24h, "-1.50%");
        assert!(!data.is_positive_change);
        assert_eq!(data.dashboard_url, "https://crypto-teck-mcp.vercel.app/?coin=ethereum");
    }

    #[test]
    fn test_zero_change_counts_as_positive() {
        let snap = snapshot("Bitcoin", 1.0, 0.0, vec![1.0]);
        let data = build_dashboard(Coin::Bitcoin, &snap, fixed_now(), &base());
        assert!(data.is_positive_change);
    }

    #[test]
    fn test_chart_spans_167_hours_oldest_first() {
        let now = fixed_now();
        let points = chart_points(&hourly_prices(168), now);

        assert_eq!(points[167].time, now);
        assert_eq!(points[0].time, now - Duration::hours(167));
        assert_eq!(points[167].time - points[0].time, Duration::hours(167));
        for pair in points.windows(2) {
            assert_eq!(pair[1].time - pair[0].time, Duration::hours(1));
        }
    }

    #[test]
    fn test_chart_preserves_order_and_formats_prices() {
        let prices = vec![66000.123, 66100.5, 67123.0, 0.004];
        let points = chart_points(&prices, fixed_now());

        let formatted: Vec<&str> = points.iter().map(|p| p.price.as_str()).collect();
        assert_eq!(formatted, vec!["66000.12", "66100.50", "67123.00", "0.00"]);
    }

    #[test]
    fn test_chart_prices_have_two_decimals() {
        let prices = vec![1.0, 2.5, 3.333333333, 12345.6789, 0.1];
        for point in chart_points(&prices, fixed_now()) {
            let (_, frac) = point.price.split_once('.').unwrap();
            assert_eq!(frac.len(), 2, "{}", point.price);
        }
    }

    #[test]
    fn test_short_sparkline_still_ends_at_now() {
        let now = fixed_now();
        let points = chart_points(&[1.0, 2.0, 3.0], now);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].time, now - Duration::hours(2));
        assert_eq!(points[2].time, now);
    }

    #[test]
    fn test_empty_sparkline() {
        assert!(chart_points(&[], fixed_now()).is_empty());
    }

    #[test]
    fn test_transform_is_deterministic() {
        let snap = snapshot("Bitcoin", 45000.5, 2.345, hourly_prices(168));
        let first = build_dashboard(Coin::Bitcoin, &snap, fixed_now(), &base());
        let second = build_dashboard(Coin::Bitcoin, &snap, fixed_now(), &base());
        assert_eq!(first, second);
    }

    #[test]
    fn test_dashboard_url_keeps_existing_query() {
        let base = Url::parse("https://example.com/app?theme=dark").unwrap();
        assert_eq!(
            dashboard_url(&base, Coin::Ethereum),
            "https://example.com/app?theme=dark&coin=ethereum"
        );
    }

    // ============= Serialization Tests =============

    #[test]
    fn test_json_field_names() {
        let snap = snapshot("Bitcoin", 45000.5, 2.345, vec![100.0, 101.0]);
        let data = build_dashboard(Coin::Bitcoin, &snap, fixed_now(), &base());
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["coinName"], "Bitcoin");
        assert_eq!(json["currentPrice"], "$45,000.50");
        assert_eq!(json["change24h"], "2.35%");
        assert_eq!(json["isPositiveChange"], true);
        assert_eq!(json["dashboardUrl"], "https://crypto-teck-mcp.vercel.app/?coin=bitcoin");
        assert_eq!(json["chartData"][0]["time"], "2024-05-01T11:00:00.000Z");
        assert_eq!(json["chartData"][0]["price"], "100.00");
        assert_eq!(json["chartData"][1]["time"], "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn test_iso_millis() {
        let t = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap() + Duration::milliseconds(67);
        assert_eq!(iso_millis(&t), "2024-01-02T03:04:05.067Z");
    }

    // ============= load_dashboard Tests =============

    struct StaticSource(Option<CoinSnapshot>);

    #[async_trait]
    impl PriceSource for StaticSource {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn fetch_coin(&self, _coin: Coin) -> UpstreamResult<CoinSnapshot> {
            self.0.clone().ok_or(UpstreamError::Http { status: 503 })
        }
    }

    #[tokio::test]
    async fn test_load_dashboard_success() {
        let source = StaticSource(Some(snapshot("Bitcoin", 45000.5, 2.345, hourly_prices(168))));
        let before = Utc::now();
        let data = load_dashboard(&source, Coin::Bitcoin, &base()).await.unwrap();
        let after = Utc::now();

        assert_eq!(data.current_price, "$45,000.50");
        let last = data.chart_data.last().unwrap().time;
        assert!(last >= before && last <= after);
    }

    #[tokio::test]
    async fn test_load_dashboard_propagates_upstream_error() {
        let source = StaticSource(None);
        let err = load_dashboard(&source, Coin::Ethereum, &base()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Http { status: 503 }));
    }
}

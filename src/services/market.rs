use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration as StdDuration;
use tracing::debug;

use crate::coins;
use crate::error::ApiError;
use crate::models::CoinStats;
use crate::utils::first_paragraph;

/// Uniform timeout for provider calls. Ten seconds is the provider's
/// worst observed tail latency on the range-chart endpoint.
const REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// Thin client over the CoinGecko REST API. Every call is synchronous and
/// unbatched; call volume is low and there is no SLA, so no cache sits in
/// front of it.
#[derive(Clone)]
pub struct MarketDataClient {
    http: Client,
    base_url: String,
}

impl MarketDataClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn resolve(&self, symbol: &str) -> Result<&'static str, ApiError> {
        coins::provider_id(symbol)
            .ok_or_else(|| ApiError::NotFound(format!("Unsupported cryptocurrency: {}", symbol)))
    }

    /// Current spot price in USD.
    pub async fn get_price(&self, symbol: &str) -> Result<f64, ApiError> {
        let coin_id = self.resolve(symbol)?;

        let url = format!("{}/simple/price", self.base_url);
        let data: Value = self
            .http
            .get(&url)
            .query(&[("ids", coin_id), ("vs_currencies", "usd")])
            .send()
            .await?
            .json()
            .await?;

        let coin = data
            .get(coin_id)
            .ok_or_else(|| ApiError::NotFound("Cryptocurrency not found".to_string()))?;

        coin.get("usd")
            .and_then(Value::as_f64)
            .ok_or_else(|| ApiError::Internal(format!("Malformed price response for {}", coin_id)))
    }

    /// Trending coins, passed through unmodified.
    pub async fn get_trending(&self) -> Result<Value, ApiError> {
        let url = format!("{}/search/trending", self.base_url);
        let data: Value = self.http.get(&url).send().await?.json().await?;

        data.get("coins")
            .cloned()
            .ok_or_else(|| ApiError::Internal("Malformed trending response".to_string()))
    }

    /// Reduced coin detail: name, market cap, 24h change and the first
    /// paragraph of the English description.
    pub async fn get_stats(&self, symbol: &str) -> Result<CoinStats, ApiError> {
        let coin_id = self.resolve(symbol)?;

        let url = format!("{}/coins/{}", self.base_url, coin_id);
        let data: Value = self.http.get(&url).send().await?.json().await?;

        let missing =
            |field: &str| ApiError::Internal(format!("Malformed coin response: missing {}", field));

        let symbol = data
            .get("symbol")
            .and_then(Value::as_str)
            .ok_or_else(|| missing("symbol"))?
            .to_uppercase();
        let name = data
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| missing("name"))?
            .to_string();
        let market_cap = data
            .pointer("/market_data/market_cap/usd")
            .and_then(Value::as_f64)
            .ok_or_else(|| missing("market_data.market_cap.usd"))?;
        let price_change_24h = data
            .pointer("/market_data/price_change_percentage_24h")
            .and_then(Value::as_f64)
            .ok_or_else(|| missing("market_data.price_change_percentage_24h"))?;
        let description = data
            .pointer("/description/en")
            .and_then(Value::as_str)
            .map(first_paragraph)
            .ok_or_else(|| missing("description.en"))?
            .to_string();

        Ok(CoinStats {
            symbol,
            name,
            market_cap,
            price_change_24h,
            description,
        })
    }

    /// Raw `[timestamp, price]` pairs over the trailing 7 days.
    pub async fn get_chart(&self, symbol: &str) -> Result<Vec<Value>, ApiError> {
        let coin_id = self.resolve(symbol)?;
        let (from, to) = trailing_week(Utc::now());
        debug!("chart window for {}: {}..{}", coin_id, from, to);

        let url = format!("{}/coins/{}/market_chart/range", self.base_url, coin_id);
        let data: Value = self
            .http
            .get(&url)
            .query(&[
                ("vs_currency", "usd".to_string()),
                ("from", from.to_string()),
                ("to", to.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let prices = data
            .get("prices")
            .and_then(Value::as_array)
            .ok_or_else(|| ApiError::NotFound("No price data available".to_string()))?;

        if prices.len() < 2 {
            return Err(ApiError::NotFound("Insufficient price data".to_string()));
        }

        Ok(prices.clone())
    }
}

/// Unix-second window covering exactly the trailing 7 days ending at `now`.
pub fn trailing_week(now: DateTime<Utc>) -> (i64, i64) {
    let start = now - Duration::days(7);
    (start.timestamp(), now.timestamp())
}

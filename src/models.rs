use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Serialize)]
pub struct PortfolioItem {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct HoldingValue {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    pub holdings: Vec<HoldingValue>,
}

#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub price: f64,
}

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub coins: Value,
}

/// Reduced coin-detail shape: the description is truncated at the first
/// line break before it is returned.
#[derive(Debug, Serialize)]
pub struct CoinStats {
    pub symbol: String,
    pub name: String,
    pub market_cap: f64,
    pub price_change_24h: f64,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub prices: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

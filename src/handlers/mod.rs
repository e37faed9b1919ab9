pub mod market;
pub mod portfolio;

use axum::Json;
use serde_json::{json, Value};

use crate::coins;

/// Service descriptor served at the root path.
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /api/price/{symbol}": "Spot price in USD",
            "GET /api/trending": "Trending coins",
            "GET /api/stats/{symbol}": "Market cap, 24h change and description",
            "GET /api/chart/{symbol}": "7-day price chart",
            "POST /api/portfolio": "Add a holding",
            "GET /api/portfolio": "Holdings with current value",
            "DELETE /api/portfolio": "Clear all holdings"
        },
        "supported_symbols": coins::supported_symbols()
    }))
}

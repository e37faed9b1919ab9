use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::warn;

use crate::coins;
use crate::error::ApiError;
use crate::models::{HoldingValue, PortfolioResponse};
use crate::services::market::MarketDataClient;
use crate::utils::decimal_from_price;

#[derive(Debug, sqlx::FromRow)]
pub struct HoldingRow {
    pub symbol: String,
    pub amount: Decimal,
}

/// Append a holding row. Inserts are additive: repeated symbols create
/// separate rows, never an upsert. The symbol is stored uppercased but is
/// not validated against the supported set; unsupported rows are ignored
/// at valuation time.
pub async fn add_holding(pool: &PgPool, symbol: &str, amount: Decimal) -> Result<(), ApiError> {
    sqlx::query("INSERT INTO portfolio (symbol, amount) VALUES ($1, $2)")
        .bind(symbol.to_uppercase())
        .bind(amount)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn list_holdings_with_value(
    pool: &PgPool,
    market: &MarketDataClient,
) -> Result<PortfolioResponse, ApiError> {
    let rows: Vec<HoldingRow> = sqlx::query_as("SELECT symbol, amount FROM portfolio")
        .fetch_all(pool)
        .await?;

    Ok(value_holdings(market, rows).await)
}

pub async fn clear_holdings(pool: &PgPool) -> Result<(), ApiError> {
    sqlx::query("DELETE FROM portfolio").execute(pool).await?;

    Ok(())
}

/// Values each holding at its current USD price, strictly sequentially and
/// in store order. Rows that cannot be valued are skipped rather than
/// aborting the response: symbols outside the supported set silently, and
/// rows whose price lookup fails or whose value overflows with a warning.
/// Skipped rows appear in neither the holdings list nor the total.
async fn value_holdings(market: &MarketDataClient, rows: Vec<HoldingRow>) -> PortfolioResponse {
    let mut total_value = Decimal::ZERO;
    let mut holdings = Vec::new();

    for row in rows {
        if coins::provider_id(&row.symbol).is_none() {
            continue;
        }

        let price = match market.get_price(&row.symbol).await {
            Ok(price) => price,
            Err(err) => {
                warn!("skipping {} during valuation: {}", row.symbol, err);
                continue;
            }
        };
        let Some(unit_price) = decimal_from_price(price) else {
            warn!("skipping {}: price {} is not representable", row.symbol, price);
            continue;
        };

        let Some(value) = unit_price.checked_mul(row.amount) else {
            warn!("skipping {}: value overflows at amount {}", row.symbol, row.amount);
            continue;
        };
        let Some(new_total) = total_value.checked_add(value) else {
            warn!("skipping {}: running total would overflow", row.symbol);
            continue;
        };

        total_value = new_total;
        holdings.push(HoldingValue {
            symbol: row.symbol,
            amount: row.amount,
            value,
        });
    }

    PortfolioResponse {
        total_value,
        holdings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::{Json, Router};
    use rust_decimal_macros::dec;
    use serde_json::json;

    // Serves fixed prices for every supported id; get_price picks its own
    // id out of the map.
    async fn spawn_price_stub() -> String {
        let stub = Router::new().route(
            "/simple/price",
            get(|| async {
                Json(json!({
                    "bitcoin": {"usd": 50000.0},
                    "ethereum": {"usd": 2000.0}
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, stub).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn row(symbol: &str, amount: Decimal) -> HoldingRow {
        HoldingRow {
            symbol: symbol.to_string(),
            amount,
        }
    }

    #[tokio::test]
    async fn value_is_price_times_amount() {
        let market = MarketDataClient::new(spawn_price_stub().await).unwrap();

        let response = value_holdings(&market, vec![row("ETH", dec!(2.5))]).await;

        assert_eq!(response.holdings.len(), 1);
        assert_eq!(response.holdings[0].symbol, "ETH");
        assert_eq!(response.holdings[0].amount, dec!(2.5));
        assert_eq!(response.holdings[0].value, dec!(5000));
        assert_eq!(response.total_value, dec!(5000));
    }

    #[tokio::test]
    async fn unsupported_rows_are_silently_excluded() {
        let market = MarketDataClient::new(spawn_price_stub().await).unwrap();

        let rows = vec![row("FAKECOIN", dec!(10)), row("BTC", dec!(1))];
        let response = value_holdings(&market, rows).await;

        assert_eq!(response.holdings.len(), 1);
        assert_eq!(response.holdings[0].symbol, "BTC");
        assert_eq!(response.total_value, dec!(50000));
    }

    #[tokio::test]
    async fn failed_price_lookup_skips_the_row() {
        // SOL is supported but absent from the stub's price map.
        let market = MarketDataClient::new(spawn_price_stub().await).unwrap();

        let rows = vec![row("SOL", dec!(3)), row("ETH", dec!(1))];
        let response = value_holdings(&market, rows).await;

        assert_eq!(response.holdings.len(), 1);
        assert_eq!(response.holdings[0].symbol, "ETH");
        assert_eq!(response.total_value, dec!(2000));
    }

    #[tokio::test]
    async fn overflowing_value_skips_the_row() {
        let market = MarketDataClient::new(spawn_price_stub().await).unwrap();

        // 1e27 is a storable amount, but times the BTC price it exceeds
        // what a Decimal can hold.
        let huge = Decimal::from_scientific("1e27").unwrap();
        let rows = vec![row("BTC", huge), row("ETH", dec!(1))];
        let response = value_holdings(&market, rows).await;

        assert_eq!(response.holdings.len(), 1);
        assert_eq!(response.holdings[0].symbol, "ETH");
        assert_eq!(response.total_value, dec!(2000));
    }

    #[tokio::test]
    async fn empty_store_values_to_zero() {
        let market = MarketDataClient::new(spawn_price_stub().await).unwrap();

        let response = value_holdings(&market, Vec::new()).await;

        assert_eq!(response.total_value, Decimal::ZERO);
        assert!(response.holdings.is_empty());
    }

    #[tokio::test]
    async fn repeated_symbols_stay_separate_rows() {
        let market = MarketDataClient::new(spawn_price_stub().await).unwrap();

        let rows = vec![row("BTC", dec!(1)), row("BTC", dec!(2))];
        let response = value_holdings(&market, rows).await;

        assert_eq!(response.holdings.len(), 2);
        assert_eq!(response.holdings[0].value, dec!(50000));
        assert_eq!(response.holdings[1].value, dec!(100000));
        assert_eq!(response.total_value, dec!(150000));
    }
}

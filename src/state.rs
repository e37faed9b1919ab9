use sqlx::PgPool;

use crate::services::market::MarketDataClient;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub market: MarketDataClient,
}

use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiError;
use crate::models::{ChartResponse, CoinStats, PriceResponse, TrendingResponse};
use crate::state::AppState;

pub async fn get_price(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<PriceResponse>, ApiError> {
    let price = state.market.get_price(&symbol).await?;
    Ok(Json(PriceResponse { price }))
}

pub async fn get_trending(
    State(state): State<AppState>,
) -> Result<Json<TrendingResponse>, ApiError> {
    let coins = state.market.get_trending().await?;
    Ok(Json(TrendingResponse { coins }))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<CoinStats>, ApiError> {
    Ok(Json(state.market.get_stats(&symbol).await?))
}

pub async fn get_chart(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ChartResponse>, ApiError> {
    let prices = state.market.get_chart(&symbol).await?;
    Ok(Json(ChartResponse { prices }))
}

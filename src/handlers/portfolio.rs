use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::models::{MessageResponse, PortfolioItem, PortfolioResponse};
use crate::services::portfolio;
use crate::state::AppState;

pub async fn update_portfolio(
    State(state): State<AppState>,
    Json(item): Json<PortfolioItem>,
) -> Result<Json<MessageResponse>, ApiError> {
    portfolio::add_holding(&state.pool, &item.symbol, item.amount).await?;
    Ok(Json(MessageResponse {
        message: "Portfolio updated successfully",
    }))
}

pub async fn get_portfolio(
    State(state): State<AppState>,
) -> Result<Json<PortfolioResponse>, ApiError> {
    let response = portfolio::list_holdings_with_value(&state.pool, &state.market).await?;
    Ok(Json(response))
}

pub async fn clear_portfolio(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    portfolio::clear_holdings(&state.pool).await?;
    Ok(Json(MessageResponse {
        message: "Portfolio cleared successfully",
    }))
}

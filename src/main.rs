use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod coins;
mod config;
mod database;
mod error;
mod handlers;
mod models;
mod services;
mod state;
mod utils;

use config::{Config, CorsConfig};
use database::Database;
use services::market::MarketDataClient;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("crypto_portfolio_backend=debug,tower_http=debug")
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Initialize database and the market data client
    let db = Database::new(&config.database_url).await?;
    let market = MarketDataClient::new(&config.coingecko_api_url)?;
    let state = AppState {
        pool: db.pool().clone(),
        market,
    };

    // Build application
    let app = Router::new()
        .route("/", get(handlers::service_info))
        .route("/api/price/:symbol", get(handlers::market::get_price))
        .route("/api/trending", get(handlers::market::get_trending))
        .route("/api/stats/:symbol", get(handlers::market::get_stats))
        .route("/api/chart/:symbol", get(handlers::market::get_chart))
        .route(
            "/api/portfolio",
            post(handlers::portfolio::update_portfolio)
                .get(handlers::portfolio::get_portfolio)
                .delete(handlers::portfolio::clear_portfolio),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("🚀 Crypto portfolio backend running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    if cors.allowed_origins.iter().any(|origin| origin == "*") {
        // tower-http rejects a wildcard origin combined with credentials,
        // so the wildcard variant never sends allow-credentials.
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .max_age(cors.max_age);
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|method| Method::from_bytes(method.as_bytes()).ok())
        .collect();

    let headers = if cors.allowed_headers.iter().any(|header| header == "*") {
        // Mirroring the request keeps "all headers" legal alongside credentials.
        AllowHeaders::mirror_request()
    } else {
        AllowHeaders::list(
            cors.allowed_headers
                .iter()
                .filter_map(|header| HeaderName::from_bytes(header.as_bytes()).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(cors.allow_credentials)
        .allow_methods(AllowMethods::list(methods))
        .allow_headers(headers)
        .max_age(cors.max_age)
}

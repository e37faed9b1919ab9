use std::env;
use std::time::Duration;

const DEFAULT_COINGECKO_API: &str = "https://api.coingecko.com/api/v3";

pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub coingecko_api_url: String,
    pub cors: CorsConfig,
}

/// Cross-origin policy, treated as deployment configuration. Deployed
/// variants range from a wildcard to an explicit list of front-end domains.
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable not set"))?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("Invalid PORT value"))?;

        let coingecko_api_url = env::var("COINGECKO_API_URL")
            .unwrap_or_else(|_| DEFAULT_COINGECKO_API.to_string());

        let allow_credentials = env::var("CORS_ALLOW_CREDENTIALS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        let max_age_secs = env::var("CORS_MAX_AGE_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("Invalid CORS_MAX_AGE_SECS value"))?;

        Ok(Config {
            database_url,
            port,
            coingecko_api_url,
            cors: CorsConfig {
                allowed_origins: env_list("ALLOWED_ORIGINS", "*"),
                allow_credentials,
                allowed_methods: env_list("CORS_ALLOWED_METHODS", "GET,POST,DELETE,OPTIONS"),
                allowed_headers: env_list("CORS_ALLOWED_HEADERS", "*"),
                max_age: Duration::from_secs(max_age_secs),
            },
        })
    }
}

fn env_list(name: &str, default: &str) -> Vec<String> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

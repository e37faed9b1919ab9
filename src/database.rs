use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Managed poolers in transaction mode break with prepared statement caching.
        let options = database_url
            .parse::<PgConnectOptions>()?
            .statement_cache_capacity(0);

        let pool = PgPoolOptions::new().connect_with(options).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

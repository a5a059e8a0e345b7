use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, Connection, PgPool};
use tracing::{info, instrument};

use crate::{config::DbConfig, error::StartupError};

/// Opens the pool and confirms the server answers before handing it out.
#[instrument(skip_all, fields(host = %cfg.host, port = cfg.port, db = %cfg.name))]
pub async fn connect(cfg: &DbConfig) -> Result<PgPool, StartupError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .connect_with(cfg.connect_options())
        .await
        .map_err(StartupError::Connect)?;

    ping(&pool).await?;
    info!("database connection established");
    Ok(pool)
}

pub async fn ping(pool: &PgPool) -> Result<(), StartupError> {
    let mut conn = pool.acquire().await.map_err(StartupError::Ping)?;
    conn.ping().await.map_err(StartupError::Ping)
}

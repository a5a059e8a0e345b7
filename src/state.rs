use std::{sync::Arc, time::Duration};

use axum::extract::FromRef;
use sqlx::PgPool;
use tracing::info;

use crate::auth::JwtKeys;
use crate::config::{AppConfig, DbConfig, JwtConfig, ServerConfig};
use crate::db;
use crate::error::StartupError;
use crate::meals::{InMemoryMealRepository, MealRepository, PgMealRepository};

/// Resources acquired at startup.
pub struct Bootstrap {
    pub db: PgPool,
    pub signer: JwtKeys,
    pub expires_in: Duration,
}

pub async fn bootstrap(config: &AppConfig) -> Result<Bootstrap, StartupError> {
    let db = db::connect(&config.database).await?;
    let signer = JwtKeys::from(&config.jwt);
    let expires_in = signer.expires_in;
    Ok(Bootstrap {
        db,
        signer,
        expires_in,
    })
}

#[derive(Clone)]
pub struct AppState {
    pub meals: Arc<dyn MealRepository>,
    pub jwt: JwtKeys,
    pub config: Arc<AppConfig>,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let Bootstrap {
            db,
            signer,
            expires_in,
        } = bootstrap(&config).await?;
        info!(token_ttl_secs = expires_in.as_secs(), "bootstrap complete");

        let meals = Arc::new(PgMealRepository::new(db)) as Arc<dyn MealRepository>;
        Ok(Self::from_parts(meals, signer, Arc::new(config)))
    }

    pub fn from_parts(
        meals: Arc<dyn MealRepository>,
        jwt: JwtKeys,
        config: Arc<AppConfig>,
    ) -> Self {
        Self { meals, jwt, config }
    }

    /// State over the in-memory backend with a fixed test secret.
    pub fn fake() -> Self {
        let config = AppConfig {
            database: DbConfig {
                host: "localhost".into(),
                port: 5432,
                user: "postgres".into(),
                password: "postgres".into(),
                name: "postgres".into(),
                connect_timeout_secs: 30,
            },
            jwt: JwtConfig {
                secret: "test".into(),
                expires_in_secs: 300,
            },
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
        };
        let jwt = JwtKeys::from(&config.jwt);
        let meals = Arc::new(InMemoryMealRepository::new()) as Arc<dyn MealRepository>;
        Self::from_parts(meals, jwt, Arc::new(config))
    }
}

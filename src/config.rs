use std::collections::HashMap;

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

const DEFAULT_PG_PORT: u16 = 5432;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Upper bound on establishing the first connection at startup.
    pub connect_timeout_secs: u64,
}

impl DbConfig {
    /// Connection description for the meals database. TLS is off, the
    /// service talks to a database on the same private network.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(PgSslMode::Disable)
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_in_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DbConfig,
    pub jwt: JwtConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    /// Builds the config from an explicit variable map. Does no I/O.
    pub fn from_env_map(env: HashMap<String, String>) -> Result<Self, ConfigError> {
        let var = |key: &str| env.get(key).cloned().unwrap_or_default();

        let database = DbConfig {
            host: var("DB_HOST"),
            port: parse_port(&env, "DB_PORT", DEFAULT_PG_PORT)?,
            user: var("DB_USER"),
            password: var("DB_PASSWORD"),
            name: var("DB_NAME"),
            connect_timeout_secs: match var("DB_CONNECT_TIMEOUT_SECS").trim() {
                "" => DEFAULT_CONNECT_TIMEOUT_SECS,
                v => v.parse::<u64>().map_err(|_| {
                    ConfigError::InvalidValue(
                        "DB_CONNECT_TIMEOUT_SECS".into(),
                        format!("expected seconds: {v:?}"),
                    )
                })?,
            },
        };

        let expires_in_secs = var("JWT_EXPIRESIN").trim().parse::<u64>().map_err(|e| {
            ConfigError::InvalidValue("JWT_EXPIRESIN".into(), format!("expected seconds: {e}"))
        })?;
        let jwt = JwtConfig {
            secret: var("JWT_SECRET"),
            expires_in_secs,
        };

        let server = ServerConfig {
            host: env
                .get("APP_HOST")
                .cloned()
                .unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_port(&env, "APP_PORT", 8080)?,
        };

        Ok(Self {
            database,
            jwt,
            server,
        })
    }
}

fn parse_port(env: &HashMap<String, String>, key: &str, default: u16) -> Result<u16, ConfigError> {
    match env.get(key).map(|v| v.trim()) {
        None | Some("") => Ok(default),
        Some(v) => v
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue(key.into(), format!("not a port: {v:?}"))),
    }
}

use std::collections::HashMap;

use daily_diet::{bootstrap, config::DbConfig, db, AppConfig, StartupError};

fn unreachable_db() -> DbConfig {
    DbConfig {
        host: "127.0.0.1".into(),
        port: 1,
        user: "postgres".into(),
        password: "postgres".into(),
        name: "postgres".into(),
        connect_timeout_secs: 1,
    }
}

#[tokio::test]
async fn connect_to_unreachable_database_is_a_connect_error() {
    let err = db::connect(&unreachable_db()).await.unwrap_err();
    assert!(matches!(err, StartupError::Connect(_)), "{err:?}");
}

#[tokio::test]
async fn bootstrap_surfaces_connect_error() {
    let env: HashMap<String, String> = [
        ("DB_HOST", "127.0.0.1"),
        ("DB_PORT", "1"),
        ("DB_CONNECT_TIMEOUT_SECS", "1"),
        ("JWT_SECRET", "dev-secret"),
        ("JWT_EXPIRESIN", "3600"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let config = AppConfig::from_env_map(env).expect("config loads");

    let err = bootstrap(&config).await.err().expect("bootstrap fails");
    assert!(matches!(err, StartupError::Connect(_)), "{err:?}");
}

/// Needs a reachable database described by the usual `DB_*` variables.
#[tokio::test]
#[ignore]
async fn bootstrap_against_live_database() {
    let mut env: HashMap<String, String> = std::env::vars().collect();
    env.insert("JWT_SECRET".into(), "dev-secret".into());
    env.insert("JWT_EXPIRESIN".into(), "900".into());
    let config = AppConfig::from_env_map(env).expect("config loads");

    let boot = bootstrap(&config).await.expect("bootstrap");
    assert_eq!(boot.expires_in.as_secs(), 900);
    db::ping(&boot.db).await.expect("pool answers ping");

    let token = boot.signer.sign("u1").expect("sign");
    assert_eq!(boot.signer.verify(&token).expect("verify").sub, "u1");
}

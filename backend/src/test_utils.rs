//! Shared fixtures for unit tests.

use crate::config::Config;
use crate::database::migrate;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        acquire_timeout_seconds: 3,
        jwt_secret: "test-jwt-secret".to_string(),
        jwt_expires_in_seconds: 3600,
        cookie_secret: "0123456789abcdef".repeat(4),
        cookie_secure: false,
        bcrypt_cost: 4,
        server_port: 0,
    }
}

/// A migrated in-memory database. A single connection keeps the data alive.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    migrate(&pool).await.expect("Failed to migrate test database");
    pool
}

//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, and the secrets used to sign session
//! tokens and cookies.

use anyhow::{Context, Result, ensure};
use std::env;
use tower_cookies::Key;

/// Minimum length of the cookie signing secret, in bytes.
pub const MIN_COOKIE_SECRET_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub cookie_secret: String,
    pub cookie_secure: bool,
    pub bcrypt_cost: u32,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;

        let jwt_expires_in_seconds = env::var("JWT_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<u64>()
            .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;

        let cookie_secret = env::var("COOKIE_SECRET").context("COOKIE_SECRET not set")?;

        let cookie_secure = env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .context("COOKIE_SECURE must be true or false")?;

        let bcrypt_cost = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let config = Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            cookie_secret,
            cookie_secure,
            bcrypt_cost,
            server_port,
        };
        config.validate()?;

        Ok(config)
    }

    /// Checks invariants that the individual parsers cannot express.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.jwt_secret.is_empty(), "JWT_SECRET must not be empty");
        ensure!(
            self.cookie_secret.len() >= MIN_COOKIE_SECRET_LEN,
            "COOKIE_SECRET must be at least {} bytes",
            MIN_COOKIE_SECRET_LEN
        );
        ensure!(
            (4..=31).contains(&self.bcrypt_cost),
            "BCRYPT_COST must be between 4 and 31"
        );
        Ok(())
    }

    /// Builds the key used to sign and verify the session cookie.
    pub fn cookie_key(&self) -> Result<Key> {
        Key::try_from(self.cookie_secret.as_bytes())
            .map_err(|e| anyhow::anyhow!("Invalid COOKIE_SECRET: {}", e))
    }
}

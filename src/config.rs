// src/config.rs

use std::{env, net::SocketAddr};

use dotenvy::dotenv;

use crate::{cleaner::AttributePolicy, error::AppError};

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. `None` runs against the in-memory store.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub listen_addr: SocketAddr,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub attribute_policy: AttributePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let database_url = optional_var("DATABASE_URL");

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::InternalServerError("JWT_SECRET must be set".to_string()))?;

        let jwt_expiration = match optional_var("JWT_EXPIRATION") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::InternalServerError(format!("JWT_EXPIRATION is invalid: {}", e))
            })?,
            None => 86400,
        };

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let listen_addr = optional_var("LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::InternalServerError(format!("LISTEN_ADDR is invalid: {}", e)))?;

        let attribute_policy = match optional_var("CLEANER_ATTRIBUTE_POLICY") {
            Some(raw) => raw.parse().map_err(AppError::InternalServerError)?,
            None => AttributePolicy::default(),
        };

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            listen_addr,
            admin_username: optional_var("ADMIN_USERNAME"),
            admin_password: optional_var("ADMIN_PASSWORD"),
            attribute_policy,
        })
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into a typed ServerConfig at startup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration for production deployment.
//!
//! Everything the server needs is read once at startup via
//! [`ServerConfig::from_env`]; there is no configuration file.

use anyhow::{Context, Result};
use std::env;

/// Default HTTP port when `HTTP_PORT` is unset
const DEFAULT_HTTP_PORT: u16 = 8080;
/// Default token lifetime in hours when `TOKEN_EXPIRY_HOURS` is unset
const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;
/// Default per-request timeout in seconds when `REQUEST_TIMEOUT_SECS` is unset
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Credentials used to bootstrap the admin account on first run
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    /// Admin sign-in email
    pub email: String,
    /// Admin sign-in password, hashed before storage
    pub password: String,
}

/// Complete server configuration parsed from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// SQLite connection string, e.g. `sqlite:./data/portfolio.db`
    pub database_url: String,
    /// Secret for signing session tokens
    pub jwt_secret: String,
    /// Session token lifetime in hours
    pub token_expiry_hours: i64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Admin account installed when the users table is empty, if configured
    pub admin_bootstrap: Option<AdminBootstrap>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is missing or a numeric variable
    /// fails to parse.
    pub fn from_env() -> Result<Self> {
        let http_port = env_or_default("HTTP_PORT", DEFAULT_HTTP_PORT)?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./data/portfolio.db".into());
        let jwt_secret = env::var("JWT_SECRET")
            .context("JWT_SECRET must be set; session tokens cannot be signed without it")?;
        let token_expiry_hours = env_or_default("TOKEN_EXPIRY_HOURS", DEFAULT_TOKEN_EXPIRY_HOURS)?;
        let request_timeout_secs =
            env_or_default("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        let admin_bootstrap = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminBootstrap { email, password }),
            _ => None,
        };

        Ok(Self {
            http_port,
            database_url,
            jwt_secret,
            token_expiry_hours,
            request_timeout_secs,
            admin_bootstrap,
        })
    }

    /// One-line startup summary, with secrets elided
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "http_port={} database_url={} token_expiry_hours={} request_timeout_secs={} admin_bootstrap={}",
            self.http_port,
            self.database_url,
            self.token_expiry_hours,
            self.request_timeout_secs,
            self.admin_bootstrap.is_some(),
        )
    }
}

/// Read an environment variable, falling back to a default when unset
fn env_or_default<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(key).map_or(Ok(default), |raw| {
        raw.parse::<T>()
            .with_context(|| format!("{key} has an invalid value: {raw}"))
    })
}

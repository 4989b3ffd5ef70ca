// ABOUTME: Tests for environment-based configuration parsing
// ABOUTME: Serialized because environment variables are process-global
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use serial_test::serial;

use portfolio_content_server::config::ServerConfig;

const VARS: &[&str] = &[
    "HTTP_PORT",
    "DATABASE_URL",
    "JWT_SECRET",
    "TOKEN_EXPIRY_HOURS",
    "REQUEST_TIMEOUT_SECS",
    "ADMIN_EMAIL",
    "ADMIN_PASSWORD",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_with_only_jwt_secret() {
    clear_env();
    env::set_var("JWT_SECRET", "test-secret");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.database_url, "sqlite:./data/portfolio.db");
    assert_eq!(config.token_expiry_hours, 24);
    assert_eq!(config.request_timeout_secs, 30);
    assert!(config.admin_bootstrap.is_none());

    clear_env();
}

#[test]
#[serial]
fn test_missing_jwt_secret_is_an_error() {
    clear_env();
    assert!(ServerConfig::from_env().is_err());
}

#[test]
#[serial]
fn test_overrides_and_bootstrap_pair() {
    clear_env();
    env::set_var("JWT_SECRET", "test-secret");
    env::set_var("HTTP_PORT", "9000");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("TOKEN_EXPIRY_HOURS", "1");
    env::set_var("ADMIN_EMAIL", "admin@example.com");
    env::set_var("ADMIN_PASSWORD", "rahasia-admin");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 9000);
    assert_eq!(config.database_url, "sqlite::memory:");
    assert_eq!(config.token_expiry_hours, 1);
    let bootstrap = config.admin_bootstrap.unwrap();
    assert_eq!(bootstrap.email, "admin@example.com");

    clear_env();
}

#[test]
#[serial]
fn test_invalid_port_is_an_error() {
    clear_env();
    env::set_var("JWT_SECRET", "test-secret");
    env::set_var("HTTP_PORT", "not-a-port");

    assert!(ServerConfig::from_env().is_err());

    clear_env();
}

// ABOUTME: Configuration module for the portfolio content server
// ABOUTME: Environment-only configuration, no config files
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Server configuration, read exclusively from environment variables.

pub mod environment;

pub use environment::ServerConfig;

// ABOUTME: Main library entry point for the portfolio content server
// ABOUTME: Content store access, session gate, admin draft editing, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Portfolio Content Server
//!
//! Backend for a single-operator portfolio site: one profile record plus
//! three ordered collections (skills, pricing packages, projects) stored in
//! `SQLite`, read publicly and mutated only through a password-gated admin
//! surface.
//!
//! ## Architecture
//!
//! - [`database`] — the content store boundary: pool, migrations, per-entity
//!   reads and transactional full-collection replaces
//! - [`services`] — the data access layer: authorization-gated mutations and
//!   the best-effort batch save
//! - [`auth`] — the session gate: bcrypt credentials, signed session tokens
//! - [`draft`] — the admin editing surface: staged draft, single-flight save,
//!   stale snapshot discard
//! - [`routes`] — axum HTTP surface over all of the above
//! - [`contact`] — deterministic WhatsApp deep-link composer

/// JWT-based authentication and the admin mutation gate
pub mod auth;
/// Environment-based server configuration
pub mod config;
/// WhatsApp deep-link message composer
pub mod contact;
/// Shared server context with an explicit lifecycle
pub mod context;
/// Content store: pool, migrations, per-entity operations
pub mod database;
/// Admin editing surface with draft staging
pub mod draft;
/// Unified error taxonomy and HTTP error envelope
pub mod errors;
/// Structured logging setup
pub mod logging;
/// HTTP middleware and extractors
pub mod middleware;
/// Core domain models
pub mod models;
/// HTTP route handlers
pub mod routes;
/// Business logic services
pub mod services;

// ABOUTME: Route assembly for the portfolio content server
// ABOUTME: Mounts health, auth, portfolio, and contact routes with shared layers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! HTTP route assembly. Handlers are thin wrappers that delegate to the
//! service layer; the shared [`ServerContext`] is the axum state.

pub mod auth;
pub mod contact;
pub mod health;
pub mod portfolio;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::context::ServerContext;

/// Build the complete application router
#[must_use]
pub fn router(context: Arc<ServerContext>) -> Router {
    let timeout = Duration::from_secs(context.config.request_timeout_secs);

    Router::new()
        .merge(auth::routes())
        .merge(portfolio::routes())
        .merge(contact::routes())
        .with_state(context.clone())
        .merge(health::HealthRoutes::routes(context))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
}

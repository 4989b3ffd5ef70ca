// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Liveness plus a readiness probe that pings the content store
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Health check routes. `/health` is pure liveness; `/ready` answers only
//! when the content store responds to a probe query.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;

use crate::context::ServerContext;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    #[must_use]
    pub fn routes(context: Arc<ServerContext>) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(context)
    }
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn ready_handler(
    State(context): State<Arc<ServerContext>>,
) -> (StatusCode, Json<serde_json::Value>) {
    let store_ok = sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(context.database.pool())
        .await
        .is_ok();

    let status = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "status": if store_ok { "ready" } else { "degraded" },
            "content_store": store_ok,
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}

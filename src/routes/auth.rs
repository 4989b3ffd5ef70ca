// ABOUTME: Authentication route handlers for sign-in, sign-out, and session introspection
// ABOUTME: Thin wrappers delegating credential checks to the session gate
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Authentication routes. Handlers delegate to [`AuthManager`]; no
//! credential logic lives at the HTTP layer.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::auth::AuthManager;
use crate::context::ServerContext;
use crate::errors::AppResult;
use crate::middleware::AuthenticatedUser;
use crate::models::{AuthRequest, AuthResponse, Role};

/// Session introspection response
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    /// Authenticated user id
    pub user_id: Uuid,
    /// Role carried by the validated token
    pub role: Role,
}

/// Sign-out response
#[derive(Debug, Serialize)]
pub struct SignOutResponse {
    /// Always true; sign-out is unconditional
    pub success: bool,
}

/// Build the auth route tree
pub fn routes() -> Router<Arc<ServerContext>> {
    Router::new()
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/logout", post(logout_handler))
        .route("/api/auth/me", get(me_handler))
}

async fn login_handler(
    State(context): State<Arc<ServerContext>>,
    Json(request): Json<AuthRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = context
        .auth
        .sign_in(&context.database, &request)
        .await
        .inspect_err(|e| error!(error = %e, "Sign-in failed"))?;

    Ok(Json(response))
}

async fn logout_handler(
    AuthenticatedUser(auth): AuthenticatedUser,
) -> Json<SignOutResponse> {
    AuthManager::sign_out(&auth);
    Json(SignOutResponse { success: true })
}

async fn me_handler(AuthenticatedUser(auth): AuthenticatedUser) -> Json<SessionInfo> {
    Json(SessionInfo {
        user_id: auth.user_id,
        role: auth.role,
    })
}

// ABOUTME: Bearer token extractor validating sessions on every request
// ABOUTME: Produces an AuthContext or rejects with the unified error envelope
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Request extractor for authenticated callers.
//!
//! Sessions are stateless: every request re-validates the bearer token
//! against the session gate, so a tampered or expired token is rejected
//! here rather than trusted from any client-side flag.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::auth::AuthContext;
use crate::context::ServerContext;
use crate::errors::AppError;

/// An authenticated caller, any role
///
/// Route handlers that mutate still call [`AuthContext::require_admin`];
/// this extractor only establishes identity.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub AuthContext);

#[async_trait]
impl FromRequestParts<Arc<ServerContext>> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ServerContext>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(AppError::auth_required)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::auth_invalid("expected a Bearer token"))?;

        let context = state.auth.restore_session(token)?;
        Ok(Self(context))
    }
}

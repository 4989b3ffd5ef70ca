// ABOUTME: JWT-based authentication and session gate
// ABOUTME: Handles sign-in, token generation, validation, and the admin mutation gate
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Authentication and Session Gate
//!
//! The session gate has two states: unauthenticated, or authenticated with
//! a role. Signing in validates credentials against bcrypt hashes in the
//! users table and issues a signed HS256 token carrying the role. Restoring
//! a session always re-validates the token signature and expiry, so a stale
//! or tampered token can never grant admin rights on its own.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{AuthRequest, AuthResponse, Role, User};

/// Minimum accepted password length at sign-in
const MIN_PASSWORD_LEN: usize = 6;

/// JWT claims for an authenticated session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// User email
    pub email: String,
    /// Role deciding mutation rights
    pub role: Role,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a user id
    ///
    /// # Errors
    ///
    /// Returns an auth error if the subject is not a valid UUID.
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| AppError::auth_invalid(format!("token subject is not a user id: {e}")))
    }
}

/// Caller identity handed to mutating operations after token validation
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    /// Authenticated user id
    pub user_id: Uuid,
    /// Role carried by the validated token
    pub role: Role,
}

impl AuthContext {
    /// Build a context from validated claims
    ///
    /// # Errors
    ///
    /// Returns an auth error if the claims carry a malformed subject.
    pub fn from_claims(claims: &Claims) -> AppResult<Self> {
        Ok(Self {
            user_id: claims.user_id()?,
            role: claims.role,
        })
    }

    /// Enforce the admin gate for mutating operations
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when the role is not admin.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::unauthorized())
        }
    }
}

/// Authentication manager for session tokens
#[derive(Clone)]
pub struct AuthManager {
    jwt_secret: Vec<u8>,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager
    #[must_use]
    pub fn new(jwt_secret: &str, token_expiry_hours: i64) -> Self {
        Self {
            jwt_secret: jwt_secret.as_bytes().to_vec(),
            token_expiry_hours,
        }
    }

    /// Sign in with email and password
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a malformed email or short password,
    /// `InvalidCredentials` when the account is unknown, inactive, or the
    /// password does not match, and `PersistenceError` when the lookup
    /// fails.
    pub async fn sign_in(&self, database: &Database, request: &AuthRequest) -> AppResult<AuthResponse> {
        validate_credentials_shape(request)?;

        let user = database
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AppError::persistence(format!("user lookup failed: {e}")))?
            .filter(|user| user.is_active)
            .ok_or_else(|| {
                warn!(email = %request.email, "Sign-in attempt for unknown or inactive account");
                AppError::invalid_credentials("Email atau password salah")
            })?;

        let password_matches = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::internal(format!("password verification failed: {e}")))?;

        if !password_matches {
            warn!(email = %request.email, "Sign-in attempt with wrong password");
            return Err(AppError::invalid_credentials("Email atau password salah"));
        }

        if let Err(e) = database.update_last_active(user.id).await {
            // Sign-in bookkeeping only; the session is still valid.
            warn!(error = %e, "Failed to update last_active");
        }

        let (token, expires_at) = self.generate_token(&user)?;
        info!(user_id = %user.id, role = %user.role, "User signed in");

        Ok(AuthResponse {
            token,
            expires_at,
            role: user.role,
        })
    }

    /// Sign out
    ///
    /// Tokens are stateless, so signing out is unconditional: the caller
    /// discards the token and the gate returns to unauthenticated.
    pub fn sign_out(context: &AuthContext) {
        info!(user_id = %context.user_id, "User signed out");
    }

    /// Generate a signed session token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails.
    pub fn generate_token(&self, user: &User) -> AppResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.jwt_secret),
        )
        .map_err(|e| AppError::internal(format!("token encoding failed: {e}")))?;

        Ok((token, expires_at))
    }

    /// Validate a session token and return its claims
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` for expired, tampered, or malformed tokens.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.jwt_secret),
            &validation,
        )
        .map_err(|e| {
            warn!(error = %e, "Token validation failed");
            AppError::auth_invalid(format!("token rejected: {e}"))
        })?;

        Ok(token_data.claims)
    }

    /// Restore a session from a persisted token
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` when the token no longer validates; the caller
    /// must fall back to unauthenticated.
    pub fn restore_session(&self, token: &str) -> AppResult<AuthContext> {
        let claims = self.validate_token(token)?;
        AuthContext::from_claims(&claims)
    }

    /// Hash a password for storage
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails.
    pub fn hash_password(password: &str) -> AppResult<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
    }
}

/// Basic credential shape checks before touching the store
fn validate_credentials_shape(request: &AuthRequest) -> AppResult<()> {
    if !request.email.contains('@') || request.email.trim().is_empty() {
        return Err(AppError::validation("Email tidak valid"));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation("Password minimal 6 karakter"));
    }
    Ok(())
}

// ABOUTME: Shared server context passed by reference to routes and services
// ABOUTME: Owns the database, auth manager, and content service for the process lifetime
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Shared server state with an explicit lifecycle: built once at startup,
//! handed to every consumer by reference, torn down when the process exits.
//! No ambient globals.

use anyhow::Result;
use tracing::info;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::models::{Role, User};
use crate::services::ContentService;

/// Process-wide server resources
pub struct ServerContext {
    /// Parsed startup configuration
    pub config: ServerConfig,
    /// Content store connection
    pub database: Database,
    /// Session gate
    pub auth: AuthManager,
    /// Data access layer over the content store
    pub content: ContentService,
}

impl ServerContext {
    /// Initialize all server resources from configuration
    ///
    /// Connects the database, runs migrations, installs default content on
    /// first run, and bootstraps the admin account when credentials are
    /// configured and no account exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized or any
    /// bootstrap write fails.
    pub async fn initialize(config: ServerConfig) -> Result<Self> {
        let database = Database::new(&config.database_url).await?;
        database.seed_default_content().await?;

        let auth = AuthManager::new(&config.jwt_secret, config.token_expiry_hours);

        if let Some(bootstrap) = &config.admin_bootstrap {
            if database.count_users().await? == 0 {
                let user = User::new(
                    bootstrap.email.clone(),
                    AuthManager::hash_password(&bootstrap.password)?,
                    Role::Admin,
                );
                database.create_user(&user).await?;
                info!(email = %bootstrap.email, "Bootstrapped admin account");
            }
        }

        let content = ContentService::new(database.clone());

        Ok(Self {
            config,
            database,
            auth,
            content,
        })
    }
}

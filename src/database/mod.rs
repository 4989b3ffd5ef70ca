// ABOUTME: Database management for portfolio content and admin accounts
// ABOUTME: Owns the SQLite pool, schema migrations, and first-run content seeding
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Database Management
//!
//! This module is the content store boundary. It owns the `SQLite` pool and
//! exposes per-entity operations from its submodules: the singleton profile,
//! the three ordered collections, and admin user accounts.

mod packages;
mod profile;
mod projects;
mod skills;
mod users;

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use tracing::info;

use crate::models::{seed_packages, seed_projects, seed_skills, Profile};

/// Database manager for portfolio content and account storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        // In-memory databases exist per connection; a single-connection pool
        // keeps migrations and queries on the same instance.
        let in_memory = database_url.contains(":memory:");

        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if !in_memory && database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .connect(&connection_options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails.
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_profile().await?;
        self.migrate_skills().await?;
        self.migrate_packages().await?;
        self.migrate_projects().await?;
        Ok(())
    }

    /// Install the built-in default content on first run
    ///
    /// A no-op when a profile row already exists; the seed never overwrites
    /// operator-edited content.
    ///
    /// # Errors
    ///
    /// Returns an error if any seed write fails.
    pub async fn seed_default_content(&self) -> Result<()> {
        if self.get_profile().await?.is_some() {
            return Ok(());
        }

        info!("Empty content store, installing default content");

        let profile = Profile::seed();
        self.insert_profile(&profile).await?;
        self.replace_skills(&seed_skills()).await?;
        self.replace_packages(&seed_packages()).await?;
        self.replace_projects(&seed_projects()).await?;

        Ok(())
    }
}

/// Decode a JSON-encoded string list column
fn decode_string_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Encode a string list for storage in a TEXT column
fn encode_string_list(items: &[String]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

// ABOUTME: Content data access service implementing load, patch, replace, and batch save
// ABOUTME: Enforces the admin gate on every mutation and the best-effort batch contract
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Content Service
//!
//! The data access layer over the content store. Reads are open to anyone;
//! every mutation passes through the admin gate first ([`AuthContext::require_admin`])
//! and the store is left untouched when the gate rejects.
//!
//! `save_all` is a best-effort sequential batch: each entity commits or
//! fails independently, there is no transaction spanning entities. A partial
//! failure is reported as one aggregate persistence error whose details name
//! which entities committed and which failed.

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::AuthContext;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{
    CollectionKind, Package, PortfolioSnapshot, Profile, ProfilePatch, Project, Skill,
};

/// A full admin draft submitted as one coordinated save
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioDraft {
    /// Profile fields to write; `None` fields keep their stored values
    #[serde(default)]
    pub profile: ProfilePatch,
    /// Complete replacement skills collection
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Complete replacement packages collection
    #[serde(default)]
    pub packages: Vec<Package>,
    /// Complete replacement projects collection
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Typed contents for a full-collection replace
#[derive(Debug, Clone)]
pub enum CollectionItems {
    /// Replacement skills
    Skills(Vec<Skill>),
    /// Replacement packages
    Packages(Vec<Package>),
    /// Replacement projects
    Projects(Vec<Project>),
}

impl CollectionItems {
    /// Which collection these items belong to
    #[must_use]
    pub const fn kind(&self) -> CollectionKind {
        match self {
            Self::Skills(_) => CollectionKind::Skills,
            Self::Packages(_) => CollectionKind::Packages,
            Self::Projects(_) => CollectionKind::Projects,
        }
    }

    /// Validate every item before any row is touched
    fn validate(&self) -> AppResult<()> {
        match self {
            Self::Skills(items) => items.iter().try_for_each(Skill::validate),
            Self::Packages(items) => items.iter().try_for_each(Package::validate),
            Self::Projects(items) => items.iter().try_for_each(Project::validate),
        }
    }
}

/// Data access layer over the content store
#[derive(Clone)]
pub struct ContentService {
    database: Database,
}

impl ContentService {
    /// Create a content service over a database
    #[must_use]
    pub const fn new(database: Database) -> Self {
        Self { database }
    }

    /// Access the underlying database
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// Fetch a fully assembled snapshot
    ///
    /// The profile read and the three ordered collection reads are issued
    /// concurrently; all four must succeed before the snapshot is ready. On
    /// any sub-fetch failure the whole call fails and the caller keeps its
    /// previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` when any sub-fetch fails.
    pub async fn load_all(&self) -> AppResult<PortfolioSnapshot> {
        let (profile, skills, packages, projects) = tokio::try_join!(
            self.database.get_profile(),
            self.database.get_skills(),
            self.database.get_packages(),
            self.database.get_projects(),
        )
        .map_err(|e| {
            error!(error = %e, "Snapshot load failed");
            AppError::persistence(format!("snapshot load failed: {e}"))
        })?;

        Ok(PortfolioSnapshot {
            // Absence of a stored profile falls back to the built-in
            // defaults; the fallback is not persisted by a read.
            profile: profile.unwrap_or_else(Profile::seed),
            skills,
            packages,
            projects,
        })
    }

    /// Write only the supplied profile fields
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when the gate rejects, `ValidationError` for
    /// malformed fields, and `PersistenceError` when the write fails.
    pub async fn save_profile(
        &self,
        auth: &AuthContext,
        patch: &ProfilePatch,
    ) -> AppResult<Profile> {
        auth.require_admin()?;
        patch.validate()?;

        let profile = self
            .database
            .update_profile(patch)
            .await
            .map_err(|e| AppError::persistence(format!("profile update failed: {e}")))?;

        info!(user_id = %auth.user_id, "Profile updated");
        Ok(profile)
    }

    /// Replace one collection wholesale
    ///
    /// Destructive full-replace: rows absent from `items` do not survive,
    /// and sort keys are assigned from array position.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when the gate rejects, `ValidationError` when
    /// any item is invalid, and `PersistenceError` when the replace fails.
    pub async fn replace_collection(
        &self,
        auth: &AuthContext,
        items: &CollectionItems,
    ) -> AppResult<()> {
        auth.require_admin()?;
        items.validate()?;

        let kind = items.kind();
        let result = match items {
            CollectionItems::Skills(skills) => self.database.replace_skills(skills).await,
            CollectionItems::Packages(packages) => self.database.replace_packages(packages).await,
            CollectionItems::Projects(projects) => self.database.replace_projects(projects).await,
        };

        result.map_err(|e| {
            error!(collection = %kind, error = %e, "Collection replace failed");
            AppError::persistence(format!("{kind} replace failed: {e}"))
        })?;

        info!(user_id = %auth.user_id, collection = %kind, "Collection replaced");
        Ok(())
    }

    /// Save a full draft: profile plus all three collections
    ///
    /// Sequential and best-effort per entity. Entities that committed
    /// before a failure stay committed; the aggregate error names both
    /// sides. On full success the canonical snapshot is reloaded and
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when the gate rejects, or a single aggregate
    /// `PersistenceError` carrying per-entity outcome when any entity
    /// fails.
    pub async fn save_all(
        &self,
        auth: &AuthContext,
        draft: &PortfolioDraft,
    ) -> AppResult<PortfolioSnapshot> {
        auth.require_admin()?;

        let mut committed: Vec<&'static str> = Vec::new();
        let mut failed: Vec<(&'static str, String)> = Vec::new();

        match self.save_profile(auth, &draft.profile).await {
            Ok(_) => committed.push("profile"),
            Err(e) => failed.push(("profile", e.message)),
        }

        let collections = [
            CollectionItems::Skills(draft.skills.clone()),
            CollectionItems::Packages(draft.packages.clone()),
            CollectionItems::Projects(draft.projects.clone()),
        ];
        for items in &collections {
            let name = items.kind().as_str();
            match self.replace_collection(auth, items).await {
                Ok(()) => committed.push(name),
                Err(e) => failed.push((name, e.message)),
            }
        }

        if !failed.is_empty() {
            let failed_names: Vec<&str> = failed.iter().map(|(name, _)| *name).collect();
            error!(
                committed = ?committed,
                failed = ?failed_names,
                "Batch save partially failed"
            );
            let failures: serde_json::Map<String, serde_json::Value> = failed
                .into_iter()
                .map(|(name, message)| (name.to_owned(), serde_json::Value::String(message)))
                .collect();
            return Err(
                AppError::persistence("batch save failed for one or more entities").with_details(
                    serde_json::json!({
                        "committed": committed,
                        "failed": failures,
                    }),
                ),
            );
        }

        // Refresh observers with the canonical state.
        self.load_all().await
    }

    /// Append a single project to the collection
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when the gate rejects, `ValidationError` for
    /// an invalid project, and `PersistenceError` when the insert fails.
    pub async fn create_project(&self, auth: &AuthContext, project: &Project) -> AppResult<()> {
        auth.require_admin()?;
        project.validate()?;

        self.database
            .create_project(project)
            .await
            .map_err(|e| AppError::persistence(format!("project create failed: {e}")))?;

        info!(user_id = %auth.user_id, project_id = %project.id, "Project created");
        Ok(())
    }

    /// Delete a single project by id
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when the gate rejects and `PersistenceError`
    /// when the delete fails.
    pub async fn delete_project(&self, auth: &AuthContext, project_id: Uuid) -> AppResult<()> {
        auth.require_admin()?;

        self.database
            .delete_project(project_id)
            .await
            .map_err(|e| AppError::persistence(format!("project delete failed: {e}")))?;

        info!(user_id = %auth.user_id, project_id = %project_id, "Project deleted");
        Ok(())
    }
}

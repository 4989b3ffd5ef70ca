// ABOUTME: Admin editing surface holding an in-memory draft of the portfolio content
// ABOUTME: Implements single-flight batch save and generation-id stale snapshot discard
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Draft Editor
//!
//! The admin editing surface stages a local copy of the profile and the
//! three collections. Edits touch only the draft; the canonical store is
//! untouched until an explicit save submits the whole draft through the
//! data access layer's batch save.
//!
//! Two pieces of coordination live here:
//! - a save is single-flight per draft: duplicate save triggers while one
//!   is in flight are suppressed, not queued;
//! - every applied snapshot carries a generation id, so a load that
//!   resolves after the editor has moved on (navigation, completed save)
//!   is discarded instead of clobbering newer state.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::auth::AuthContext;
use crate::errors::AppResult;
use crate::models::{Package, PortfolioSnapshot, Profile, Project, Skill};
use crate::services::{ContentService, PortfolioDraft};

/// Outcome of a save trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The draft was committed and replaced by the reloaded snapshot
    Saved,
    /// Another save was already in flight; this trigger was suppressed
    Suppressed,
}

/// Draft state guarded by one lock
struct DraftInner {
    profile: Profile,
    skills: Vec<Skill>,
    packages: Vec<Package>,
    projects: Vec<Project>,
    /// Bumped whenever canonical state is applied; loads issued under an
    /// older generation are discarded on arrival
    generation: u64,
}

/// Admin editing surface over the content service
pub struct DraftEditor {
    service: ContentService,
    inner: Mutex<DraftInner>,
    save_in_flight: AtomicBool,
}

impl DraftEditor {
    /// Seed a draft editor from the latest snapshot
    #[must_use]
    pub fn new(service: ContentService, snapshot: PortfolioSnapshot) -> Self {
        Self {
            service,
            inner: Mutex::new(DraftInner {
                profile: snapshot.profile,
                skills: snapshot.skills,
                packages: snapshot.packages,
                projects: snapshot.projects,
                generation: 0,
            }),
            save_in_flight: AtomicBool::new(false),
        }
    }

    /// Current generation, recorded by callers before issuing a load
    pub async fn generation(&self) -> u64 {
        self.inner.lock().await.generation
    }

    /// Read the current draft contents
    pub async fn draft(&self) -> PortfolioDraft {
        let inner = self.inner.lock().await;
        PortfolioDraft {
            profile: inner.profile.to_patch(),
            skills: inner.skills.clone(),
            packages: inner.packages.clone(),
            projects: inner.projects.clone(),
        }
    }

    /// Edit the draft profile in place
    pub async fn edit_profile<F: FnOnce(&mut Profile)>(&self, edit: F) {
        let mut inner = self.inner.lock().await;
        edit(&mut inner.profile);
    }

    /// Replace the draft skills list
    pub async fn set_skills(&self, skills: Vec<Skill>) {
        self.inner.lock().await.skills = skills;
    }

    /// Replace the draft packages list
    pub async fn set_packages(&self, packages: Vec<Package>) {
        self.inner.lock().await.packages = packages;
    }

    /// Replace the draft projects list
    pub async fn set_projects(&self, projects: Vec<Project>) {
        self.inner.lock().await.projects = projects;
    }

    /// Apply a snapshot that was loaded under `load_generation`
    ///
    /// Returns `true` when applied. A snapshot from a superseded generation
    /// is discarded so a late-arriving load never overwrites newer state.
    pub async fn apply_snapshot(&self, load_generation: u64, snapshot: PortfolioSnapshot) -> bool {
        let mut inner = self.inner.lock().await;
        if load_generation < inner.generation {
            debug!(
                load_generation,
                current = inner.generation,
                "Discarding stale snapshot"
            );
            return false;
        }

        inner.profile = snapshot.profile;
        inner.skills = snapshot.skills;
        inner.packages = snapshot.packages;
        inner.projects = snapshot.projects;
        inner.generation += 1;
        true
    }

    /// Submit the entire draft as one coordinated save
    ///
    /// Single-flight: a trigger while another save is in flight returns
    /// [`SaveOutcome::Suppressed`] without touching the store. On failure
    /// the draft is preserved for retry; on success the draft is replaced
    /// by the freshly reloaded canonical snapshot, discarding edits made
    /// while the save was in flight (last-write-wins).
    ///
    /// # Errors
    ///
    /// Propagates `Unauthorized` and persistence errors from the batch
    /// save; the draft is left intact in every error path.
    pub async fn save(&self, auth: &AuthContext) -> AppResult<SaveOutcome> {
        if self
            .save_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Save already in flight, suppressing duplicate trigger");
            return Ok(SaveOutcome::Suppressed);
        }

        let result = self.save_inner(auth).await;
        self.save_in_flight.store(false, Ordering::Release);
        result
    }

    async fn save_inner(&self, auth: &AuthContext) -> AppResult<SaveOutcome> {
        // Clone the draft outside the save so edits stay possible while the
        // save is in flight; those edits lose to the reloaded snapshot.
        let draft = self.draft().await;

        match self.service.save_all(auth, &draft).await {
            Ok(snapshot) => {
                let mut inner = self.inner.lock().await;
                inner.profile = snapshot.profile;
                inner.skills = snapshot.skills;
                inner.packages = snapshot.packages;
                inner.projects = snapshot.projects;
                inner.generation += 1;
                info!(generation = inner.generation, "Draft saved and refreshed");
                Ok(SaveOutcome::Saved)
            }
            Err(e) => {
                warn!(error = %e, "Draft save failed, draft preserved for retry");
                Err(e)
            }
        }
    }
}

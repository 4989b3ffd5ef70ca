// ABOUTME: Portfolio content route handlers for public reads and admin mutations
// ABOUTME: Snapshot read, profile patch, collection replace, batch save, project create/delete
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Portfolio content routes.
//!
//! Reads are public. Every mutation requires a bearer token whose role
//! passes the admin gate; the gate check happens in the service layer so
//! the store is untouched on rejection.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use crate::context::ServerContext;
use crate::errors::{AppError, AppResult};
use crate::middleware::AuthenticatedUser;
use crate::models::{Package, PortfolioSnapshot, Profile, ProfilePatch, Project, Skill};
use crate::services::{CollectionItems, PortfolioDraft};

/// Build the portfolio route tree
pub fn routes() -> Router<Arc<ServerContext>> {
    Router::new()
        .route("/api/portfolio", get(get_snapshot_handler))
        .route("/api/portfolio", put(save_all_handler))
        .route("/api/portfolio/profile", put(save_profile_handler))
        .route("/api/portfolio/skills", put(replace_skills_handler))
        .route("/api/portfolio/packages", put(replace_packages_handler))
        .route("/api/portfolio/projects", put(replace_projects_handler))
        .route("/api/portfolio/projects", post(create_project_handler))
        .route(
            "/api/portfolio/projects/:project_id",
            delete(delete_project_handler),
        )
}

async fn get_snapshot_handler(
    State(context): State<Arc<ServerContext>>,
) -> AppResult<Json<PortfolioSnapshot>> {
    let snapshot = context.content.load_all().await?;
    Ok(Json(snapshot))
}

async fn save_all_handler(
    State(context): State<Arc<ServerContext>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Json(draft): Json<PortfolioDraft>,
) -> AppResult<Json<PortfolioSnapshot>> {
    let snapshot = context.content.save_all(&auth, &draft).await?;
    Ok(Json(snapshot))
}

async fn save_profile_handler(
    State(context): State<Arc<ServerContext>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Json(patch): Json<ProfilePatch>,
) -> AppResult<Json<Profile>> {
    let profile = context.content.save_profile(&auth, &patch).await?;
    Ok(Json(profile))
}

async fn replace_skills_handler(
    State(context): State<Arc<ServerContext>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Json(skills): Json<Vec<Skill>>,
) -> AppResult<Json<Vec<Skill>>> {
    context
        .content
        .replace_collection(&auth, &CollectionItems::Skills(skills))
        .await?;
    let stored = context
        .content
        .database()
        .get_skills()
        .await
        .map_err(|e| AppError::persistence(e.to_string()))?;
    Ok(Json(stored))
}

async fn replace_packages_handler(
    State(context): State<Arc<ServerContext>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Json(packages): Json<Vec<Package>>,
) -> AppResult<Json<Vec<Package>>> {
    context
        .content
        .replace_collection(&auth, &CollectionItems::Packages(packages))
        .await?;
    let stored = context
        .content
        .database()
        .get_packages()
        .await
        .map_err(|e| AppError::persistence(e.to_string()))?;
    Ok(Json(stored))
}

async fn replace_projects_handler(
    State(context): State<Arc<ServerContext>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Json(projects): Json<Vec<Project>>,
) -> AppResult<Json<Vec<Project>>> {
    context
        .content
        .replace_collection(&auth, &CollectionItems::Projects(projects))
        .await?;
    let stored = context
        .content
        .database()
        .get_projects()
        .await
        .map_err(|e| AppError::persistence(e.to_string()))?;
    Ok(Json(stored))
}

async fn create_project_handler(
    State(context): State<Arc<ServerContext>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Json(project): Json<Project>,
) -> AppResult<Json<Project>> {
    context.content.create_project(&auth, &project).await?;
    Ok(Json(project))
}

async fn delete_project_handler(
    State(context): State<Arc<ServerContext>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(project_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    context.content.delete_project(&auth, project_id).await?;
    Ok(Json(serde_json::json!({ "deleted": project_id })))
}

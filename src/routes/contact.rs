// ABOUTME: Contact route handler generating WhatsApp deep links
// ABOUTME: Uses the stored profile contact number and the pure message composer
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Contact routes. The server never sends messages; it hands back a
//! pre-filled WhatsApp deep link built from the stored contact number.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::contact::whatsapp_link;
use crate::context::ServerContext;
use crate::errors::{AppError, AppResult};

/// Contact form fields submitted by a visitor
#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Free-text message body
    pub message: String,
}

/// Generated deep link response
#[derive(Debug, Serialize)]
pub struct ContactLinkResponse {
    /// Complete wa.me URL with the pre-filled, percent-encoded message
    pub url: String,
}

/// Build the contact route tree
pub fn routes() -> Router<Arc<ServerContext>> {
    Router::new().route("/api/contact/whatsapp-link", get(whatsapp_link_handler))
}

async fn whatsapp_link_handler(
    State(context): State<Arc<ServerContext>>,
    Query(query): Query<ContactQuery>,
) -> AppResult<Json<ContactLinkResponse>> {
    let snapshot = context.content.load_all().await?;
    let number = snapshot
        .profile
        .whatsapp
        .ok_or_else(|| AppError::not_found("contact number"))?;

    let url = whatsapp_link(&number, &query.name, &query.email, &query.message)?;
    Ok(Json(ContactLinkResponse { url }))
}

// ABOUTME: End-to-end HTTP tests driving the router with in-process requests
// ABOUTME: Covers health, snapshot reads, the login flow, and gate rejections at the HTTP boundary
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use portfolio_content_server::auth::AuthManager;
use portfolio_content_server::config::environment::AdminBootstrap;
use portfolio_content_server::config::ServerConfig;
use portfolio_content_server::context::ServerContext;
use portfolio_content_server::models::{Role, User};
use portfolio_content_server::routes;

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "rahasia-admin";

fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        database_url: "sqlite::memory:".into(),
        jwt_secret: "route-test-secret".into(),
        token_expiry_hours: 24,
        request_timeout_secs: 30,
        admin_bootstrap: Some(AdminBootstrap {
            email: ADMIN_EMAIL.into(),
            password: ADMIN_PASSWORD.into(),
        }),
    }
}

async fn test_app() -> (Router, Arc<ServerContext>) {
    let context = Arc::new(ServerContext::initialize(test_config()).await.unwrap());
    (routes::router(context.clone()), context)
}

async fn body_json(body: Body) -> Value {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({"email": email, "password": password}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    body["token"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn test_health_and_readiness() {
    let (app, _context) = test_app().await;

    let response = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["content_store"], true);
}

#[tokio::test]
async fn test_snapshot_read_is_open_and_seeded() {
    let (app, _context) = test_app().await;

    let response = app
        .oneshot(Request::get("/api/portfolio").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    assert!(body["profile"]["name"].is_string());
    assert!(!body["skills"].as_array().unwrap().is_empty());
    assert!(!body["packages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_mutation_without_token_is_401() {
    let (app, context) = test_app().await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/portfolio/profile",
            None,
            &json!({"name": "Intruder"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");

    let stored = context.database.get_profile().await.unwrap().unwrap();
    assert_ne!(stored.name, "Intruder");
}

#[tokio::test]
async fn test_login_then_update_profile() {
    let (app, context) = test_app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/portfolio/profile",
            Some(&token),
            &json!({"tagline": "Web Developer & Pentester"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["tagline"], "Web Developer & Pentester");

    let stored = context.database.get_profile().await.unwrap().unwrap();
    assert_eq!(stored.tagline, "Web Developer & Pentester");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_401() {
    let (app, _context) = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({"email": ADMIN_EMAIL, "password": "salah-semua"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_non_admin_token_is_403_and_store_unchanged() {
    let (app, context) = test_app().await;

    let viewer = User::new(
        "viewer@example.com".into(),
        AuthManager::hash_password("rahasia-viewer").unwrap(),
        Role::User,
    );
    context.database.create_user(&viewer).await.unwrap();
    let token = login(&app, "viewer@example.com", "rahasia-viewer").await;

    let skills_before = context.database.get_skills().await.unwrap();
    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/portfolio/skills",
            Some(&token),
            &json!([{"name": "Phishing", "percentage": 99, "category": "security"}]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert_eq!(context.database.get_skills().await.unwrap(), skills_before);
}

#[tokio::test]
async fn test_replace_skills_returns_stored_order() {
    let (app, _context) = test_app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/portfolio/skills",
            Some(&token),
            &json!([
                {"name": "Rust", "percentage": 40, "category": "webdev"},
                {"name": "Burp Suite", "percentage": 60, "category": "security"}
            ]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    let skills = body.as_array().unwrap();
    assert_eq!(skills.len(), 2);
    assert_eq!(skills[0]["name"], "Rust");
    assert_eq!(skills[1]["name"], "Burp Suite");
    assert_eq!(skills[1]["sort_order"], 1);
}

#[tokio::test]
async fn test_out_of_range_percentage_is_400_at_the_boundary() {
    let (app, _context) = test_app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/portfolio/skills",
            Some(&token),
            &json!([{"name": "Overflow", "percentage": 120, "category": "webdev"}]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_whatsapp_link_endpoint() {
    let (app, _context) = test_app().await;

    let response = app
        .oneshot(
            Request::get(
                "/api/contact/whatsapp-link?name=Ana&email=ana%40example.com&message=Halo",
            )
            .body(Body::empty())
            .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("https://wa.me/"));
    assert!(url.contains("Ana"));
    assert!(url.contains("%0A"));
}

#[tokio::test]
async fn test_session_info_roundtrip() {
    let (app, _context) = test_app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["role"], "admin");

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/logout",
            Some(&token),
            &json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["success"], true);
}

// ABOUTME: Integration tests for sign-in, session restore, and the admin gate
// ABOUTME: Exercises the authentication manager against a real user table
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use portfolio_content_server::auth::AuthManager;
use portfolio_content_server::database::Database;
use portfolio_content_server::errors::ErrorCode;
use portfolio_content_server::models::{AuthRequest, Role, User};

const TEST_SECRET: &str = "integration-test-secret";
const TEST_PASSWORD: &str = "rahasia-123";

async fn setup(role: Role) -> (Database, AuthManager, User) {
    let database = Database::new("sqlite::memory:").await.unwrap();
    let manager = AuthManager::new(TEST_SECRET, 24);
    let user = User::new(
        "raka@example.com".into(),
        AuthManager::hash_password(TEST_PASSWORD).unwrap(),
        role,
    );
    database.create_user(&user).await.unwrap();
    (database, manager, user)
}

fn request(email: &str, password: &str) -> AuthRequest {
    AuthRequest {
        email: email.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn test_sign_in_issues_token_with_role() {
    let (database, manager, user) = setup(Role::Admin).await;

    let response = manager
        .sign_in(&database, &request("raka@example.com", TEST_PASSWORD))
        .await
        .unwrap();
    assert_eq!(response.role, Role::Admin);

    let context = manager.restore_session(&response.token).unwrap();
    assert_eq!(context.user_id, user.id);
    assert!(context.require_admin().is_ok());
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let (database, manager, _user) = setup(Role::Admin).await;

    let err = manager
        .sign_in(&database, &request("raka@example.com", "salah-semua"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCredentials);
}

#[tokio::test]
async fn test_sign_in_unknown_email() {
    let (database, manager, _user) = setup(Role::Admin).await;

    let err = manager
        .sign_in(&database, &request("nobody@example.com", TEST_PASSWORD))
        .await
        .unwrap_err();
    // Unknown account and wrong password share one error code.
    assert_eq!(err.code, ErrorCode::InvalidCredentials);
}

#[tokio::test]
async fn test_sign_in_rejects_malformed_credentials_before_lookup() {
    let (database, manager, _user) = setup(Role::Admin).await;

    let err = manager
        .sign_in(&database, &request("not-an-email", TEST_PASSWORD))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let err = manager
        .sign_in(&database, &request("raka@example.com", "abc"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
}

#[tokio::test]
async fn test_inactive_account_cannot_sign_in() {
    let database = Database::new("sqlite::memory:").await.unwrap();
    let manager = AuthManager::new(TEST_SECRET, 24);
    let mut user = User::new(
        "dormant@example.com".into(),
        AuthManager::hash_password(TEST_PASSWORD).unwrap(),
        Role::Admin,
    );
    user.is_active = false;
    database.create_user(&user).await.unwrap();

    let err = manager
        .sign_in(&database, &request("dormant@example.com", TEST_PASSWORD))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCredentials);
}

#[tokio::test]
async fn test_restored_session_carries_non_admin_role() {
    let (database, manager, _user) = setup(Role::User).await;

    let response = manager
        .sign_in(&database, &request("raka@example.com", TEST_PASSWORD))
        .await
        .unwrap();

    let context = manager.restore_session(&response.token).unwrap();
    assert_eq!(context.role, Role::User);
    let err = context.require_admin().unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let manager = AuthManager::new(TEST_SECRET, 24);
    let err = manager.restore_session("not.a.token").unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthInvalid);
}

#[tokio::test]
async fn test_sign_in_updates_last_active() {
    let database = Database::new("sqlite::memory:").await.unwrap();
    let manager = AuthManager::new(TEST_SECRET, 24);
    let mut user = User::new(
        "raka@example.com".into(),
        AuthManager::hash_password(TEST_PASSWORD).unwrap(),
        Role::Admin,
    );
    // Backdate so the sign-in bump is unambiguous.
    user.last_active = chrono::Utc::now() - chrono::Duration::days(30);
    database.create_user(&user).await.unwrap();

    manager
        .sign_in(&database, &request("raka@example.com", TEST_PASSWORD))
        .await
        .unwrap();

    let stored = database
        .get_user_by_email("raka@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.last_active > user.last_active);
}

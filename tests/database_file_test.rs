// ABOUTME: Tests for file-backed SQLite storage
// ABOUTME: Verifies database file creation and content persistence across reconnects
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use portfolio_content_server::database::Database;
use portfolio_content_server::models::{Skill, SkillCategory};

#[tokio::test]
async fn test_creates_database_file_on_first_connect() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portfolio.db");
    let url = format!("sqlite:{}", path.display());

    let _database = Database::new(&url).await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn test_content_survives_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("portfolio.db").display());

    {
        let database = Database::new(&url).await.unwrap();
        database.seed_default_content().await.unwrap();
        database
            .replace_skills(&[Skill::new("Laravel", 45, SkillCategory::Webdev)])
            .await
            .unwrap();
        database.pool().close().await;
    }

    let database = Database::new(&url).await.unwrap();
    let profile = database.get_profile().await.unwrap();
    assert!(profile.is_some());

    let skills = database.get_skills().await.unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0].name, "Laravel");

    // Reconnecting must never re-seed over stored content.
    database.seed_default_content().await.unwrap();
    assert_eq!(database.get_skills().await.unwrap().len(), 1);
}

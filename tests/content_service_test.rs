// ABOUTME: Integration tests for the content data access layer
// ABOUTME: Covers snapshot loads, patch updates, collection replaces, and the batch save contract
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use portfolio_content_server::auth::AuthContext;
use portfolio_content_server::database::Database;
use portfolio_content_server::errors::ErrorCode;
use portfolio_content_server::models::{
    Package, Profile, ProfilePatch, Project, Role, Skill, SkillCategory,
};
use portfolio_content_server::services::{CollectionItems, ContentService, PortfolioDraft};
use uuid::Uuid;

async fn test_service() -> ContentService {
    let database = Database::new("sqlite::memory:").await.unwrap();
    ContentService::new(database)
}

fn admin() -> AuthContext {
    AuthContext {
        user_id: Uuid::new_v4(),
        role: Role::Admin,
    }
}

fn viewer() -> AuthContext {
    AuthContext {
        user_id: Uuid::new_v4(),
        role: Role::User,
    }
}

fn sample_draft() -> PortfolioDraft {
    PortfolioDraft {
        profile: ProfilePatch {
            name: Some("Budi Santoso".into()),
            tagline: Some("Fullstack Developer".into()),
            age: Some(14),
            whatsapp: Some("+62 812-9999-8888".into()),
            ..ProfilePatch::default()
        },
        skills: vec![
            Skill::new("HTML", 95, SkillCategory::Webdev),
            Skill::new("Nmap", 55, SkillCategory::Security),
            Skill::new("CSS", 90, SkillCategory::Webdev),
        ],
        packages: vec![
            Package::new("Basic", 100_000, 200_000, vec!["1 halaman".into()]),
            Package::new("Pro", 200_000, 500_000, vec!["5 halaman".into(), "Admin".into()]),
        ],
        projects: vec![Project::new("Toko Online"), Project::new("Blog Sekolah")],
    }
}

#[tokio::test]
async fn test_empty_store_falls_back_to_defaults_without_persisting() {
    let service = test_service().await;

    let snapshot = service.load_all().await.unwrap();
    assert!(!snapshot.profile.name.is_empty());
    assert!(snapshot.skills.is_empty());

    // The read-time fallback must not write a row.
    let stored = service.database().get_profile().await.unwrap();
    assert!(stored.is_none());
}

#[tokio::test]
async fn test_save_all_then_load_all_round_trips() {
    let service = test_service().await;
    let draft = sample_draft();

    let saved = service.save_all(&admin(), &draft).await.unwrap();
    let loaded = service.load_all().await.unwrap();
    assert_eq!(saved, loaded);

    assert_eq!(loaded.profile.name, "Budi Santoso");
    assert_eq!(loaded.profile.age, 14);

    let skill_ids: Vec<Uuid> = loaded.skills.iter().map(|s| s.id).collect();
    let draft_ids: Vec<Uuid> = draft.skills.iter().map(|s| s.id).collect();
    assert_eq!(skill_ids, draft_ids);

    let names: Vec<&str> = loaded.packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Basic", "Pro"]);
    assert_eq!(loaded.packages[1].features, ["5 halaman", "Admin"]);
}

#[tokio::test]
async fn test_replace_preserves_submitted_length_and_order() {
    let service = test_service().await;
    let auth = admin();

    let first = vec![
        Skill::new("A", 10, SkillCategory::Webdev),
        Skill::new("B", 20, SkillCategory::Webdev),
        Skill::new("C", 30, SkillCategory::Security),
    ];
    service
        .replace_collection(&auth, &CollectionItems::Skills(first))
        .await
        .unwrap();

    // Replace again in a different order with fewer entries; stale rows
    // must not survive.
    let second = vec![
        Skill::new("C", 30, SkillCategory::Security),
        Skill::new("A", 10, SkillCategory::Webdev),
    ];
    service
        .replace_collection(&auth, &CollectionItems::Skills(second))
        .await
        .unwrap();

    let stored = service.database().get_skills().await.unwrap();
    assert_eq!(stored.len(), 2);
    let names: Vec<&str> = stored.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["C", "A"]);
    let orders: Vec<i64> = stored.iter().map(|s| s.sort_order).collect();
    assert_eq!(orders, [0, 1]);
}

#[tokio::test]
async fn test_out_of_range_percentage_is_rejected_not_stored() {
    let service = test_service().await;
    let auth = admin();

    let invalid = vec![Skill::new("Overclocked", 150, SkillCategory::Webdev)];
    let err = service
        .replace_collection(&auth, &CollectionItems::Skills(invalid))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    assert!(service.database().get_skills().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_admin_mutation_rejected_and_store_unchanged() {
    let service = test_service().await;

    let err = service
        .save_profile(
            &viewer(),
            &ProfilePatch {
                name: Some("Mallory".into()),
                ..ProfilePatch::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);

    let err = service
        .replace_collection(
            &viewer(),
            &CollectionItems::Packages(vec![Package::new("X", 1, 2, vec![])]),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);

    let err = service
        .save_all(&viewer(), &sample_draft())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);

    assert!(service.database().get_profile().await.unwrap().is_none());
    assert!(service.database().get_packages().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_packages_collection_round_trips() {
    let service = test_service().await;
    let auth = admin();

    service
        .replace_collection(&auth, &CollectionItems::Packages(Vec::new()))
        .await
        .unwrap();

    let snapshot = service.load_all().await.unwrap();
    assert!(snapshot.packages.is_empty());
}

#[tokio::test]
async fn test_profile_patch_writes_only_supplied_fields() {
    let service = test_service().await;
    let auth = admin();

    let initial = Profile::seed();
    service.database().insert_profile(&initial).await.unwrap();

    let patch = ProfilePatch {
        tagline: Some("Security Researcher".into()),
        ..ProfilePatch::default()
    };
    let updated = service.save_profile(&auth, &patch).await.unwrap();

    assert_eq!(updated.tagline, "Security Researcher");
    assert_eq!(updated.name, initial.name);
    assert_eq!(updated.bio, initial.bio);
}

#[tokio::test]
async fn test_batch_save_reports_partial_failure_with_detail() {
    let service = test_service().await;
    let auth = admin();

    let mut draft = sample_draft();
    draft.skills = vec![Skill::new("Broken", 200, SkillCategory::Webdev)];

    let err = service.save_all(&auth, &draft).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PersistenceError);

    let committed = err.details["committed"]
        .as_array()
        .expect("aggregate error names committed entities");
    assert!(committed.iter().any(|v| v == "profile"));
    assert!(committed.iter().any(|v| v == "packages"));
    assert!(err.details["failed"]["skills"].is_string());

    // Best-effort: entities before and after the failed one stay committed.
    let stored = service.load_all().await.unwrap();
    assert_eq!(stored.profile.name, "Budi Santoso");
    assert_eq!(stored.packages.len(), 2);
    assert!(stored.skills.is_empty());
}

#[tokio::test]
async fn test_project_create_and_delete() {
    let service = test_service().await;
    let auth = admin();

    let mut project = Project::new("Aplikasi Kasir");
    project.technologies = vec!["React".into(), "SQLite".into()];
    service.create_project(&auth, &project).await.unwrap();

    let second = Project::new("Landing Page");
    service.create_project(&auth, &second).await.unwrap();

    let stored = service.database().get_projects().await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].title, "Aplikasi Kasir");
    assert_eq!(stored[0].technologies, ["React", "SQLite"]);
    assert_eq!(stored[1].sort_order, 1);

    service.delete_project(&auth, project.id).await.unwrap();
    let stored = service.database().get_projects().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Landing Page");

    let err = service.delete_project(&auth, project.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PersistenceError);
}

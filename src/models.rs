// ABOUTME: Core domain models for portfolio content and admin accounts
// ABOUTME: Defines Profile, Skill, Package, Project, patches, snapshots, and user roles
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Domain models shared across the database, service, and route layers.
//!
//! The content side of the model is one singleton [`Profile`] plus three
//! owned, ordered collections ([`Skill`], [`Package`], [`Project`]). The
//! account side is [`User`] with a [`Role`] that gates mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Role attached to an authenticated account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May read and mutate portfolio content
    Admin,
    /// May read only; any mutation attempt is rejected
    User,
}

impl Role {
    /// String form stored in the database and JWT claims
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Whether this role may invoke mutating operations
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(AppError::validation(format!("unknown role: {other}"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account that can sign in to the admin surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique account id
    pub id: Uuid,
    /// Sign-in email, unique
    pub email: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// Bcrypt hash of the password, never the password itself
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role deciding mutation rights
    pub role: Role,
    /// Whether the account may sign in
    pub is_active: bool,
    /// Account creation time
    pub created_at: DateTime<Utc>,
    /// Last successful sign-in
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new active account with the given role
    #[must_use]
    pub fn new(email: String, password_hash: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name: None,
            password_hash,
            role,
            is_active: true,
            created_at: now,
            last_active: now,
        }
    }
}

/// The singleton record describing the site owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Singleton row id
    pub id: Uuid,
    /// Owner name shown in the hero section
    pub name: String,
    /// Short tagline under the name
    pub tagline: String,
    /// Owner age in years
    pub age: i64,
    /// School grade or occupation line
    pub grade: String,
    /// Free-text biography
    pub bio: String,
    /// Profile image reference (URL or data URI)
    pub profile_image: Option<String>,
    /// Logo image reference
    pub logo_image: Option<String>,
    /// WhatsApp contact number, stored as entered
    pub whatsapp: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// GitHub profile URL
    pub github: Option<String>,
    /// Instagram profile URL
    pub instagram: Option<String>,
    /// Location line
    pub location: Option<String>,
}

impl Profile {
    /// Express the whole profile as a patch, every field supplied
    #[must_use]
    pub fn to_patch(&self) -> ProfilePatch {
        ProfilePatch {
            name: Some(self.name.clone()),
            tagline: Some(self.tagline.clone()),
            age: Some(self.age),
            grade: Some(self.grade.clone()),
            bio: Some(self.bio.clone()),
            profile_image: self.profile_image.clone(),
            logo_image: self.logo_image.clone(),
            whatsapp: self.whatsapp.clone(),
            email: self.email.clone(),
            github: self.github.clone(),
            instagram: self.instagram.clone(),
            location: self.location.clone(),
        }
    }

    /// Built-in default profile used when the store holds no row yet
    #[must_use]
    pub fn seed() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "Raka Pratama".into(),
            tagline: "Web Developer & Security Enthusiast".into(),
            age: 13,
            grade: "Kelas 8 SMP".into(),
            bio: "Siswa SMP yang suka membangun website dan belajar keamanan siber.".into(),
            profile_image: None,
            logo_image: None,
            whatsapp: Some("+62 812-0000-0000".into()),
            email: Some("halo@example.com".into()),
            github: None,
            instagram: None,
            location: Some("Indonesia".into()),
        }
    }
}

/// Partial profile update: only `Some` fields are written, `None` fields
/// preserve the stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    /// New owner name
    pub name: Option<String>,
    /// New tagline
    pub tagline: Option<String>,
    /// New age
    pub age: Option<i64>,
    /// New grade line
    pub grade: Option<String>,
    /// New biography
    pub bio: Option<String>,
    /// New profile image reference
    pub profile_image: Option<String>,
    /// New logo image reference
    pub logo_image: Option<String>,
    /// New WhatsApp number
    pub whatsapp: Option<String>,
    /// New contact email
    pub email: Option<String>,
    /// New GitHub URL
    pub github: Option<String>,
    /// New Instagram URL
    pub instagram: Option<String>,
    /// New location line
    pub location: Option<String>,
}

impl ProfilePatch {
    /// Whether the patch carries no fields at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.tagline.is_none()
            && self.age.is_none()
            && self.grade.is_none()
            && self.bio.is_none()
            && self.profile_image.is_none()
            && self.logo_image.is_none()
            && self.whatsapp.is_none()
            && self.email.is_none()
            && self.github.is_none()
            && self.instagram.is_none()
            && self.location.is_none()
    }

    /// Merge this patch into an existing profile, field by field
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(v) = &self.name {
            profile.name.clone_from(v);
        }
        if let Some(v) = &self.tagline {
            profile.tagline.clone_from(v);
        }
        if let Some(v) = self.age {
            profile.age = v;
        }
        if let Some(v) = &self.grade {
            profile.grade.clone_from(v);
        }
        if let Some(v) = &self.bio {
            profile.bio.clone_from(v);
        }
        if let Some(v) = &self.profile_image {
            profile.profile_image = Some(v.clone());
        }
        if let Some(v) = &self.logo_image {
            profile.logo_image = Some(v.clone());
        }
        if let Some(v) = &self.whatsapp {
            profile.whatsapp = Some(v.clone());
        }
        if let Some(v) = &self.email {
            profile.email = Some(v.clone());
        }
        if let Some(v) = &self.github {
            profile.github = Some(v.clone());
        }
        if let Some(v) = &self.instagram {
            profile.instagram = Some(v.clone());
        }
        if let Some(v) = &self.location {
            profile.location = Some(v.clone());
        }
    }

    /// Validate patch contents before writing
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name or a negative age.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("profile name must not be empty"));
            }
        }
        if let Some(age) = self.age {
            if age < 0 {
                return Err(AppError::validation("age must not be negative"));
            }
        }
        Ok(())
    }
}

/// Fixed skill categories shown as two groups on the public page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    /// Web development skills
    Webdev,
    /// Cyber security skills
    Security,
}

impl SkillCategory {
    /// String form stored in the database
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Webdev => "webdev",
            Self::Security => "security",
        }
    }
}

impl FromStr for SkillCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "webdev" => Ok(Self::Webdev),
            "security" => Ok(Self::Security),
            other => Err(AppError::validation(format!(
                "unknown skill category: {other}"
            ))),
        }
    }
}

/// A single skill with a proficiency percentage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Unique row id, generated when omitted in a submitted draft
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Skill name
    pub name: String,
    /// Proficiency, 0 to 100 inclusive
    pub percentage: i16,
    /// Stored category tag
    pub category: SkillCategory,
    /// Position within the collection, ascending; reassigned from array
    /// position at save time
    #[serde(default)]
    pub sort_order: i64,
}

impl Skill {
    /// Create a skill; the sort order is assigned at save time
    #[must_use]
    pub fn new(name: impl Into<String>, percentage: i16, category: SkillCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            percentage,
            category,
            sort_order: 0,
        }
    }

    /// Validate name and percentage range
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name or a percentage
    /// outside 0..=100. Out-of-range values are rejected, never clamped.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("skill name must not be empty"));
        }
        if !(0..=100).contains(&self.percentage) {
            return Err(AppError::validation(format!(
                "skill percentage {} is outside 0..=100",
                self.percentage
            )));
        }
        Ok(())
    }
}

/// A service package with a price range and feature list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Unique row id, generated when omitted in a submitted draft
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Package name
    pub name: String,
    /// Minimum price in whole currency units
    pub price_min: i64,
    /// Maximum price in whole currency units
    pub price_max: i64,
    /// Ordered feature descriptions
    pub features: Vec<String>,
    /// Position within the collection, ascending; reassigned from array
    /// position at save time
    #[serde(default)]
    pub sort_order: i64,
}

impl Package {
    /// Create a package; the sort order is assigned at save time
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        price_min: i64,
        price_max: i64,
        features: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price_min,
            price_max,
            features,
            sort_order: 0,
        }
    }

    /// Validate name and price range
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name, a negative price, or
    /// `price_min > price_max`.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("package name must not be empty"));
        }
        if self.price_min < 0 || self.price_max < 0 {
            return Err(AppError::validation("package prices must not be negative"));
        }
        if self.price_min > self.price_max {
            return Err(AppError::validation(format!(
                "package price_min {} exceeds price_max {}",
                self.price_min, self.price_max
            )));
        }
        Ok(())
    }
}

/// A portfolio project entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique row id, generated when omitted in a submitted draft
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Project title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Image reference
    pub image: Option<String>,
    /// Category label
    pub category: Option<String>,
    /// Ordered technology tags
    pub technologies: Vec<String>,
    /// Link to the live deployment
    pub live_url: Option<String>,
    /// Link to the source repository
    pub github_url: Option<String>,
    /// Position within the collection, ascending; reassigned from array
    /// position at save time
    #[serde(default)]
    pub sort_order: i64,
}

impl Project {
    /// Create a project; the sort order is assigned at save time
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            image: None,
            category: None,
            technologies: Vec::new(),
            live_url: None,
            github_url: None,
            sort_order: 0,
        }
    }

    /// Validate the title
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty title.
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("project title must not be empty"));
        }
        Ok(())
    }
}

/// Identifies one of the three ordered collections owned by the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// The skills collection
    Skills,
    /// The packages collection
    Packages,
    /// The projects collection
    Projects,
}

impl CollectionKind {
    /// Entity name used in logs and batch error details
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Packages => "packages",
            Self::Projects => "projects",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully assembled read of the content store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// The authoritative profile, default-seeded when the table is empty
    pub profile: Profile,
    /// Skills ordered by sort key ascending
    pub skills: Vec<Skill>,
    /// Packages ordered by sort key ascending
    pub packages: Vec<Package>,
    /// Projects ordered by sort key ascending
    pub projects: Vec<Project>,
}

/// Sign-in request body
#[derive(Debug, Clone, Deserialize)]
pub struct AuthRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Successful sign-in response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// Token expiry time
    pub expires_at: DateTime<Utc>,
    /// Role carried by the token
    pub role: Role,
}

/// Built-in default collections installed when the store is empty
#[must_use]
pub fn seed_skills() -> Vec<Skill> {
    vec![
        Skill::new("HTML & CSS", 90, SkillCategory::Webdev),
        Skill::new("JavaScript", 80, SkillCategory::Webdev),
        Skill::new("React", 75, SkillCategory::Webdev),
        Skill::new("Node.js", 65, SkillCategory::Webdev),
        Skill::new("Tailwind CSS", 85, SkillCategory::Webdev),
        Skill::new("Network Security", 60, SkillCategory::Security),
        Skill::new("Linux", 70, SkillCategory::Security),
        Skill::new("Penetration Testing", 50, SkillCategory::Security),
    ]
}

/// Default pricing packages
#[must_use]
pub fn seed_packages() -> Vec<Package> {
    vec![
        Package::new(
            "Basic",
            150_000,
            300_000,
            vec![
                "Landing page 1 halaman".into(),
                "Desain responsif".into(),
                "Revisi 1x".into(),
            ],
        ),
        Package::new(
            "Standard",
            300_000,
            600_000,
            vec![
                "Sampai 5 halaman".into(),
                "Desain responsif".into(),
                "Form kontak WhatsApp".into(),
                "Revisi 3x".into(),
            ],
        ),
        Package::new(
            "Premium",
            600_000,
            1_200_000,
            vec![
                "Halaman tak terbatas".into(),
                "Panel admin".into(),
                "Integrasi database".into(),
                "Revisi bebas".into(),
            ],
        ),
    ]
}

/// Default projects
#[must_use]
pub fn seed_projects() -> Vec<Project> {
    let mut portfolio = Project::new("Website Portfolio");
    portfolio.description = Some("Website portfolio pribadi dengan panel admin.".into());
    portfolio.category = Some("Web".into());
    portfolio.technologies = vec!["React".into(), "Tailwind".into()];

    let mut warung = Project::new("Warung Online");
    warung.description = Some("Katalog produk sederhana untuk warung keluarga.".into());
    warung.category = Some("Web".into());
    warung.technologies = vec!["HTML".into(), "CSS".into(), "JavaScript".into()];

    vec![portfolio, warung]
}

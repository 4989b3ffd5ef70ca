// ABOUTME: Profile singleton database operations
// ABOUTME: Handles the portfolio_profile table read, insert, and patch-update paths

use super::Database;
use crate::models::{Profile, ProfilePatch};
use anyhow::{anyhow, Result};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the profile table
    pub(super) async fn migrate_profile(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS portfolio_profile (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                tagline TEXT NOT NULL,
                age INTEGER NOT NULL,
                grade TEXT NOT NULL,
                bio TEXT NOT NULL,
                profile_image TEXT,
                logo_image TEXT,
                whatsapp TEXT,
                email TEXT,
                github TEXT,
                instagram TEXT,
                location TEXT,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get the authoritative profile row, at most one
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_profile(&self) -> Result<Option<Profile>> {
        let row = sqlx::query(
            r"
            SELECT id, name, tagline, age, grade, bio, profile_image, logo_image,
                   whatsapp, email, github, instagram, location
            FROM portfolio_profile
            LIMIT 1
            ",
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_profile(&row)).transpose()
    }

    /// Insert a profile row
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_profile(&self, profile: &Profile) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO portfolio_profile (
                id, name, tagline, age, grade, bio, profile_image, logo_image,
                whatsapp, email, github, instagram, location
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(profile.id.to_string())
        .bind(&profile.name)
        .bind(&profile.tagline)
        .bind(profile.age)
        .bind(&profile.grade)
        .bind(&profile.bio)
        .bind(&profile.profile_image)
        .bind(&profile.logo_image)
        .bind(&profile.whatsapp)
        .bind(&profile.email)
        .bind(&profile.github)
        .bind(&profile.instagram)
        .bind(&profile.location)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Apply a partial update to the stored profile
    ///
    /// Merge rule: `Some` fields overwrite, `None` fields preserve the
    /// stored value. When no row exists yet the built-in defaults are
    /// materialized first so the patch always has a base to merge into.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or write fails
    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<Profile> {
        let mut profile = match self.get_profile().await? {
            Some(existing) => existing,
            None => {
                let seeded = Profile::seed();
                self.insert_profile(&seeded).await?;
                seeded
            }
        };

        patch.apply_to(&mut profile);

        sqlx::query(
            r"
            UPDATE portfolio_profile SET
                name = $2,
                tagline = $3,
                age = $4,
                grade = $5,
                bio = $6,
                profile_image = $7,
                logo_image = $8,
                whatsapp = $9,
                email = $10,
                github = $11,
                instagram = $12,
                location = $13,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            ",
        )
        .bind(profile.id.to_string())
        .bind(&profile.name)
        .bind(&profile.tagline)
        .bind(profile.age)
        .bind(&profile.grade)
        .bind(&profile.bio)
        .bind(&profile.profile_image)
        .bind(&profile.logo_image)
        .bind(&profile.whatsapp)
        .bind(&profile.email)
        .bind(&profile.github)
        .bind(&profile.instagram)
        .bind(&profile.location)
        .execute(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Convert a database row to a Profile struct
    fn row_to_profile(row: &sqlx::sqlite::SqliteRow) -> Result<Profile> {
        let id: String = row.try_get("id")?;

        Ok(Profile {
            id: Uuid::parse_str(&id).map_err(|e| anyhow!("invalid profile id: {e}"))?,
            name: row.try_get("name")?,
            tagline: row.try_get("tagline")?,
            age: row.try_get("age")?,
            grade: row.try_get("grade")?,
            bio: row.try_get("bio")?,
            profile_image: row.try_get("profile_image")?,
            logo_image: row.try_get("logo_image")?,
            whatsapp: row.try_get("whatsapp")?,
            email: row.try_get("email")?,
            github: row.try_get("github")?,
            instagram: row.try_get("instagram")?,
            location: row.try_get("location")?,
        })
    }
}

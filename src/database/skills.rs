// ABOUTME: Skills collection database operations
// ABOUTME: Ordered reads and transactional full-replace of the skills table

use super::Database;
use crate::models::{Skill, SkillCategory};
use anyhow::{anyhow, Result};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the skills table
    pub(super) async fn migrate_skills(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS skills (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                percentage INTEGER NOT NULL CHECK (percentage BETWEEN 0 AND 100),
                category TEXT NOT NULL CHECK (category IN ('webdev', 'security')),
                sort_order INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_skills_sort_order ON skills(sort_order)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get all skills ordered by sort key ascending
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_skills(&self) -> Result<Vec<Skill>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, percentage, category, sort_order
            FROM skills
            ORDER BY sort_order ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_skill).collect()
    }

    /// Replace the entire skills collection
    ///
    /// Delete-all-then-insert-all: entries absent from `skills` do not
    /// survive. Sort keys are assigned from array position. The delete and
    /// inserts run inside one transaction so a failure mid-replace leaves
    /// the previous collection intact.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails at any point
    pub async fn replace_skills(&self, skills: &[Skill]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM skills").execute(&mut *tx).await?;

        for (position, skill) in skills.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO skills (id, name, percentage, category, sort_order)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(skill.id.to_string())
            .bind(&skill.name)
            .bind(i64::from(skill.percentage))
            .bind(skill.category.as_str())
            .bind(i64::try_from(position)?)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Convert a database row to a Skill struct
    fn row_to_skill(row: &sqlx::sqlite::SqliteRow) -> Result<Skill> {
        let id: String = row.try_get("id")?;
        let category: String = row.try_get("category")?;

        Ok(Skill {
            id: Uuid::parse_str(&id).map_err(|e| anyhow!("invalid skill id: {e}"))?,
            name: row.try_get("name")?,
            percentage: row.try_get("percentage")?,
            category: category.parse::<SkillCategory>()?,
            sort_order: row.try_get("sort_order")?,
        })
    }
}

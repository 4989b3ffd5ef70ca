// ABOUTME: Project collection database operations
// ABOUTME: Ordered reads, transactional full-replace, and single create/delete paths

use super::{decode_string_list, encode_string_list, Database};
use crate::models::Project;
use anyhow::{anyhow, Result};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the projects table
    pub(super) async fn migrate_projects(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                image TEXT,
                category TEXT,
                technologies TEXT NOT NULL DEFAULT '[]',
                live_url TEXT,
                github_url TEXT,
                sort_order INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_projects_sort_order ON projects(sort_order)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get all projects ordered by sort key ascending
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_projects(&self) -> Result<Vec<Project>> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, image, category, technologies,
                   live_url, github_url, sort_order
            FROM projects
            ORDER BY sort_order ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_project).collect()
    }

    /// Replace the entire projects collection
    ///
    /// Delete-all-then-insert-all with sort keys assigned from array
    /// position, inside one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails at any point
    pub async fn replace_projects(&self, projects: &[Project]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM projects")
            .execute(&mut *tx)
            .await?;

        for (position, project) in projects.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO projects (
                    id, title, description, image, category, technologies,
                    live_url, github_url, sort_order
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ",
            )
            .bind(project.id.to_string())
            .bind(&project.title)
            .bind(&project.description)
            .bind(&project.image)
            .bind(&project.category)
            .bind(encode_string_list(&project.technologies)?)
            .bind(&project.live_url)
            .bind(&project.github_url)
            .bind(i64::try_from(position)?)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Insert a single project at the end of the collection
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_project(&self, project: &Project) -> Result<()> {
        let next_order: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(sort_order) + 1, 0) FROM projects")
                .fetch_one(&self.pool)
                .await?;

        sqlx::query(
            r"
            INSERT INTO projects (
                id, title, description, image, category, technologies,
                live_url, github_url, sort_order
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(project.id.to_string())
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.image)
        .bind(&project.category)
        .bind(encode_string_list(&project.technologies)?)
        .bind(&project.live_url)
        .bind(&project.github_url)
        .bind(next_order)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a single project by id
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails or no row matches
    pub async fn delete_project(&self, project_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project_id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("project not found: {project_id}"));
        }

        Ok(())
    }

    /// Convert a database row to a Project struct
    fn row_to_project(row: &sqlx::sqlite::SqliteRow) -> Result<Project> {
        let id: String = row.try_get("id")?;
        let technologies: String = row.try_get("technologies")?;

        Ok(Project {
            id: Uuid::parse_str(&id).map_err(|e| anyhow!("invalid project id: {e}"))?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            image: row.try_get("image")?,
            category: row.try_get("category")?,
            technologies: decode_string_list(&technologies),
            live_url: row.try_get("live_url")?,
            github_url: row.try_get("github_url")?,
            sort_order: row.try_get("sort_order")?,
        })
    }
}

// ABOUTME: Pricing package collection database operations
// ABOUTME: Ordered reads and transactional full-replace of the packages table

use super::{decode_string_list, encode_string_list, Database};
use crate::models::Package;
use anyhow::{anyhow, Result};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the packages table
    pub(super) async fn migrate_packages(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS packages (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                price_min INTEGER NOT NULL CHECK (price_min >= 0),
                price_max INTEGER NOT NULL CHECK (price_max >= price_min),
                features TEXT NOT NULL DEFAULT '[]',
                sort_order INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_packages_sort_order ON packages(sort_order)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get all packages ordered by sort key ascending
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_packages(&self) -> Result<Vec<Package>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, price_min, price_max, features, sort_order
            FROM packages
            ORDER BY sort_order ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_package).collect()
    }

    /// Replace the entire packages collection
    ///
    /// Delete-all-then-insert-all with sort keys assigned from array
    /// position, inside one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails at any point
    pub async fn replace_packages(&self, packages: &[Package]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM packages")
            .execute(&mut *tx)
            .await?;

        for (position, package) in packages.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO packages (id, name, price_min, price_max, features, sort_order)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(package.id.to_string())
            .bind(&package.name)
            .bind(package.price_min)
            .bind(package.price_max)
            .bind(encode_string_list(&package.features)?)
            .bind(i64::try_from(position)?)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Convert a database row to a Package struct
    fn row_to_package(row: &sqlx::sqlite::SqliteRow) -> Result<Package> {
        let id: String = row.try_get("id")?;
        let features: String = row.try_get("features")?;

        Ok(Package {
            id: Uuid::parse_str(&id).map_err(|e| anyhow!("invalid package id: {e}"))?,
            name: row.try_get("name")?,
            price_min: row.try_get("price_min")?,
            price_max: row.try_get("price_max")?,
            features: decode_string_list(&features),
            sort_order: row.try_get("sort_order")?,
        })
    }
}

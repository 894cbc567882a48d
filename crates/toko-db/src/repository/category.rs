//! # Category Repository
//!
//! Plain single-table persistence for categories. Checkout never
//! touches this store; product create/update validates the referenced
//! category through it.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use toko_core::Category;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Inserts a category, returning it with the server-assigned id.
    pub async fn insert(&self, name: &str, description: &str) -> DbResult<Category> {
        debug!(name = %name, "inserting category");

        let result = sqlx::query("INSERT INTO categories (name, description) VALUES (?1, ?2)")
            .bind(name)
            .bind(description)
            .execute(&self.pool)
            .await?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    /// Updates an existing category.
    pub async fn update(&self, category: &Category) -> DbResult<()> {
        debug!(id = category.id, "updating category");

        let result =
            sqlx::query("UPDATE categories SET name = ?2, description = ?3 WHERE id = ?1")
                .bind(category.id)
                .bind(&category.name)
                .bind(&category.description)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", category.id));
        }

        Ok(())
    }

    /// Deletes a category.
    ///
    /// Deleting a category that products still reference fails with
    /// [`DbError::ForeignKeyViolation`]; existing products keep their
    /// category intact.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

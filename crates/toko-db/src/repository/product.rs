//! # Product Repository
//!
//! Database operations for products.
//!
//! Besides plain CRUD, this store exposes the two transactional
//! variants the checkout engine runs inside its unit of work:
//! a locked read ([`ProductRepository::get_for_update`]) and a guarded
//! stock decrement ([`ProductRepository::decrement_stock`]). Both take
//! an explicit connection so they observe - and are observed by - the
//! surrounding transaction, never a separate read path.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use toko_core::Product;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products, oldest first. Category snapshots are not
    /// populated here; the read path attaches them.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, stock, category_id FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by id through the plain read path.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, stock, category_id FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Reads a product inside a unit of work, taking the write lock.
    ///
    /// SQLite has no `SELECT ... FOR UPDATE`; the row-touch update
    /// acquires the database write lock, so a concurrent checkout
    /// blocks here (bounded by `busy_timeout`) until this unit of work
    /// commits or rolls back. The read that follows therefore sees
    /// committed stock, never a value another in-flight checkout is
    /// about to change.
    pub async fn get_for_update(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> DbResult<Option<Product>> {
        sqlx::query("UPDATE products SET stock = stock WHERE id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, stock, category_id FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(product)
    }

    /// Decrements stock inside a unit of work.
    ///
    /// The `stock >= quantity` guard makes the decrement atomic with
    /// its own check: it can never drive stock negative even if the
    /// caller's validation raced. Affecting zero rows means the
    /// product vanished or the guard failed; under the write lock
    /// taken by [`ProductRepository::get_for_update`] neither happens
    /// after a successful validation.
    pub async fn decrement_stock(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        quantity: i64,
    ) -> DbResult<()> {
        debug!(id = id, quantity = quantity, "decrementing stock");

        let result =
            sqlx::query("UPDATE products SET stock = stock - ?2 WHERE id = ?1 AND stock >= ?2")
                .bind(id)
                .bind(quantity)
                .execute(&mut *conn)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Inserts a product, returning it with the server-assigned id.
    ///
    /// An unknown `category_id` surfaces as
    /// [`DbError::ForeignKeyViolation`]; callers usually pre-check the
    /// category to report a friendlier error.
    pub async fn insert(
        &self,
        name: &str,
        price: i64,
        stock: i64,
        category_id: i64,
    ) -> DbResult<Product> {
        debug!(name = %name, "inserting product");

        let result = sqlx::query(
            "INSERT INTO products (name, price, stock, category_id) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name)
        .bind(price)
        .bind(stock)
        .bind(category_id)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            price,
            stock,
            category_id,
            category: None,
        })
    }

    /// Updates an existing product.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "updating product");

        let result = sqlx::query(
            "UPDATE products SET name = ?2, price = ?3, stock = ?4, category_id = ?5 WHERE id = ?1",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .bind(product.category_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// Transaction details carry no foreign key to products, so
    /// deleting a sold product leaves history intact (reports read the
    /// name snapshot on the detail rows).
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

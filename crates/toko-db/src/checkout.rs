//! # Checkout Engine
//!
//! Converts a validated cart into a persisted transaction while
//! decrementing product stock - the one multi-table atomic unit of
//! work in the system.
//!
//! ## Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Checkout Unit of Work                       │
//! │                                                                 │
//! │  BEGIN                                                          │
//! │    │  for each item, in request order:                          │
//! │    ├── locked read of the product row      ── ProductNotFound?  │
//! │    ├── requested > stock?                  ── InsufficientStock │
//! │    ├── guarded decrement (stock >= qty)                         │
//! │    └── accumulate line item                                     │
//! │    │       (name snapshot, subtotal = price × qty)              │
//! │    ├── insert transaction header (server id + timestamp)        │
//! │    ├── insert each detail row (server ids)                      │
//! │  COMMIT ──► fully populated Transaction                         │
//! │                                                                 │
//! │  ANY failure, at ANY step ──► ROLLBACK: no partial stock        │
//! │  decrement and no partial transaction ever survives.            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The locked read takes SQLite's write lock, so two concurrent
//! checkouts touching the same product serialize there; the loser sees
//! committed stock, never a stale value, and oversell is impossible.
//! The wait is bounded by the pool's busy timeout, and the whole
//! operation runs under a deadline that aborts the unit of work
//! exactly like a persistence failure.
//!
//! ## Idempotency
//! There is none, on purpose: requests carry no idempotency key, so
//! re-submitting an identical cart after a successful commit creates a
//! second transaction and decrements stock again.

use std::time::Duration;

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::DbError;
use crate::repository::product::ProductRepository;
use crate::repository::transaction::TransactionRepository;
use toko_core::validation::validate_checkout_request;
use toko_core::{CheckoutRequest, CoreError, Money, Transaction, TransactionDetail};

/// Default deadline for a whole checkout operation.
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Error Taxonomy
// =============================================================================

/// The closed set of checkout failure kinds. Callers branch on the
/// variant, never on message text.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A requested product id does not exist.
    #[error("product not found: {0}")]
    ProductNotFound(i64),

    /// Requested quantity exceeds available stock.
    #[error("insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        requested: i64,
        available: i64,
    },

    /// The request failed validation before any store was touched
    /// (empty cart, non-positive quantity, amount overflow).
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// An underlying store operation failed; the unit of work was
    /// rolled back. An expired checkout deadline also lands here.
    #[error("persistence failure: {0}")]
    Persistence(#[from] DbError),
}

// =============================================================================
// Engine
// =============================================================================

/// Orchestrates the checkout unit of work across the product and
/// transaction stores.
///
/// Store handles are injected at construction; the engine holds no
/// other state and is cheap to clone.
#[derive(Debug, Clone)]
pub struct CheckoutEngine {
    pool: SqlitePool,
    products: ProductRepository,
    transactions: TransactionRepository,
    timeout: Duration,
}

impl CheckoutEngine {
    /// Creates an engine over the given pool with the default deadline.
    pub fn new(pool: SqlitePool) -> Self {
        CheckoutEngine {
            products: ProductRepository::new(pool.clone()),
            transactions: TransactionRepository::new(pool.clone()),
            pool,
            timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Overrides the overall operation deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Executes a checkout.
    ///
    /// On success every stock decrement and the full transaction
    /// record are committed together and the populated [`Transaction`]
    /// (server-assigned ids and timestamp included) is returned. On
    /// any failure the unit of work is discarded wholesale and the
    /// first encountered error comes back - fail fast, no aggregation
    /// of multiple bad items, no internal retries.
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<Transaction, CheckoutError> {
        validate_checkout_request(request).map_err(CoreError::from)?;

        match tokio::time::timeout(self.timeout, self.run(request)).await {
            Ok(result) => result,
            // Dropping the in-flight future rolls the unit of work
            // back; surface the deadline as a persistence failure.
            Err(_) => Err(CheckoutError::Persistence(DbError::TransactionFailed(
                "checkout deadline exceeded".to_string(),
            ))),
        }
    }

    async fn run(&self, request: &CheckoutRequest) -> Result<Transaction, CheckoutError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let mut details: Vec<TransactionDetail> = Vec::with_capacity(request.items.len());
        let mut total = Money::zero();

        for item in &request.items {
            // Read through the unit of work with the write lock held:
            // stock checks see decrements from earlier items in this
            // same checkout and are isolated from concurrent ones.
            let product = self
                .products
                .get_for_update(&mut tx, item.product_id)
                .await?
                .ok_or(CheckoutError::ProductNotFound(item.product_id))?;

            if item.quantity > product.stock {
                return Err(CheckoutError::InsufficientStock {
                    product_id: product.id,
                    requested: item.quantity,
                    available: product.stock,
                });
            }

            self.products
                .decrement_stock(&mut tx, product.id, item.quantity)
                .await?;

            let subtotal = Money::from_minor(product.price)
                .checked_mul(item.quantity)
                .ok_or(CoreError::AmountOverflow)?;
            total = total
                .checked_add(subtotal)
                .ok_or(CoreError::AmountOverflow)?;

            debug!(
                product_id = product.id,
                quantity = item.quantity,
                subtotal = subtotal.minor(),
                "line item accepted"
            );

            details.push(TransactionDetail {
                id: 0,
                transaction_id: 0,
                product_id: product.id,
                product_name: product.name,
                quantity: item.quantity,
                subtotal: subtotal.minor(),
            });
        }

        let transaction = self
            .transactions
            .create_with_details(&mut tx, total.minor(), details)
            .await?;

        tx.commit().await.map_err(DbError::from)?;

        info!(
            transaction_id = transaction.id,
            total_amount = transaction.total_amount,
            lines = transaction.details.len(),
            "checkout committed"
        );

        Ok(transaction)
    }
}

// Rollback on failure is implicit: every early return drops `tx`, and
// an uncommitted sqlx transaction rolls back on drop.

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::{Duration as ChronoDuration, Utc};
    use toko_core::{CheckoutItem, CheckoutRequest};

    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::testutil::{memory_db, seed_category, seed_product};

    fn cart(items: &[(i64, i64)]) -> CheckoutRequest {
        CheckoutRequest {
            items: items
                .iter()
                .map(|&(product_id, quantity)| CheckoutItem {
                    product_id,
                    quantity,
                })
                .collect(),
        }
    }

    async fn stock_of(db: &Database, id: i64) -> i64 {
        db.products().get_by_id(id).await.unwrap().unwrap().stock
    }

    async fn transaction_count(db: &Database) -> usize {
        let now = Utc::now();
        db.transactions()
            .list_in_range(now - ChronoDuration::hours(1), now + ChronoDuration::hours(1))
            .await
            .unwrap()
            .len()
    }

    #[tokio::test]
    async fn successful_checkout_decrements_stock_and_records_sale() {
        // The worked example: price 1000, stock 10, buy 3.
        let db = memory_db().await;
        let category = seed_category(&db, "Minuman").await;
        let product = seed_product(&db, category.id, "Teh Botol", 1_000, 10).await;
        let engine = CheckoutEngine::new(db.pool().clone());

        let transaction = engine.checkout(&cart(&[(product.id, 3)])).await.unwrap();

        assert!(transaction.id > 0);
        assert_eq!(transaction.total_amount, 3_000);
        assert_eq!(transaction.details.len(), 1);
        assert_eq!(transaction.details[0].product_id, product.id);
        assert_eq!(transaction.details[0].product_name, "Teh Botol");
        assert_eq!(transaction.details[0].quantity, 3);
        assert_eq!(transaction.details[0].subtotal, 3_000);
        assert!(transaction.details[0].id > 0);
        assert_eq!(transaction.details[0].transaction_id, transaction.id);

        assert_eq!(stock_of(&db, product.id).await, 7);

        // Follow-up for more than remains fails and changes nothing.
        let err = engine.checkout(&cart(&[(product.id, 8)])).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::InsufficientStock {
                requested: 8,
                available: 7,
                ..
            }
        ));
        assert_eq!(stock_of(&db, product.id).await, 7);
        assert_eq!(transaction_count(&db).await, 1);
    }

    #[tokio::test]
    async fn multi_item_totals_and_stock_conservation() {
        let db = memory_db().await;
        let category = seed_category(&db, "Minuman").await;
        let teh = seed_product(&db, category.id, "Teh Botol", 1_000, 10).await;
        let kopi = seed_product(&db, category.id, "Kopi Susu", 15_000, 5).await;
        let engine = CheckoutEngine::new(db.pool().clone());

        let transaction = engine
            .checkout(&cart(&[(teh.id, 2), (kopi.id, 3)]))
            .await
            .unwrap();

        // Line items keep request order.
        assert_eq!(transaction.details[0].product_name, "Teh Botol");
        assert_eq!(transaction.details[1].product_name, "Kopi Susu");

        // total = Σ quantity × unit price at sale time
        assert_eq!(transaction.details[0].subtotal, 2_000);
        assert_eq!(transaction.details[1].subtotal, 45_000);
        assert_eq!(transaction.total_amount, 47_000);
        let sum: i64 = transaction.details.iter().map(|d| d.subtotal).sum();
        assert_eq!(transaction.total_amount, sum);

        // All decrements applied simultaneously.
        assert_eq!(stock_of(&db, teh.id).await, 8);
        assert_eq!(stock_of(&db, kopi.id).await, 2);
    }

    #[tokio::test]
    async fn unknown_product_aborts_whole_checkout() {
        let db = memory_db().await;
        let category = seed_category(&db, "Minuman").await;
        let teh = seed_product(&db, category.id, "Teh Botol", 1_000, 10).await;
        let engine = CheckoutEngine::new(db.pool().clone());

        let err = engine
            .checkout(&cart(&[(teh.id, 2), (999, 1)]))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::ProductNotFound(999)));

        // Atomicity: the valid first item was rolled back too.
        assert_eq!(stock_of(&db, teh.id).await, 10);
        assert_eq!(transaction_count(&db).await, 0);
    }

    #[tokio::test]
    async fn insufficient_second_item_rolls_back_first() {
        let db = memory_db().await;
        let category = seed_category(&db, "Minuman").await;
        let teh = seed_product(&db, category.id, "Teh Botol", 1_000, 10).await;
        let kopi = seed_product(&db, category.id, "Kopi Susu", 15_000, 2).await;
        let engine = CheckoutEngine::new(db.pool().clone());

        let err = engine
            .checkout(&cart(&[(teh.id, 5), (kopi.id, 3)]))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::InsufficientStock { .. }));

        assert_eq!(stock_of(&db, teh.id).await, 10);
        assert_eq!(stock_of(&db, kopi.id).await, 2);
        assert_eq!(transaction_count(&db).await, 0);
    }

    #[tokio::test]
    async fn repeated_product_sees_in_progress_decrement() {
        // Two lines for the same product within one cart: the second
        // stock check must observe the first line's decrement.
        let db = memory_db().await;
        let category = seed_category(&db, "Minuman").await;
        let teh = seed_product(&db, category.id, "Teh Botol", 1_000, 10).await;
        let engine = CheckoutEngine::new(db.pool().clone());

        let err = engine
            .checkout(&cart(&[(teh.id, 6), (teh.id, 5)]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::InsufficientStock {
                requested: 5,
                available: 4,
                ..
            }
        ));
        assert_eq!(stock_of(&db, teh.id).await, 10);

        // Within bounds, both lines commit.
        let transaction = engine
            .checkout(&cart(&[(teh.id, 6), (teh.id, 4)]))
            .await
            .unwrap();
        assert_eq!(transaction.details.len(), 2);
        assert_eq!(stock_of(&db, teh.id).await, 0);
    }

    #[tokio::test]
    async fn expired_deadline_aborts_like_a_persistence_failure() {
        // Hold the write lock from a second connection so the checkout
        // blocks at its locked read until past its deadline. The
        // bounded busy wait (5s default) outlasts the deadline, so the
        // timer always fires first.
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("toko.db")).max_connections(4);
        let db = Database::new(config).await.unwrap();

        let category = seed_category(&db, "Minuman").await;
        let teh = seed_product(&db, category.id, "Teh Botol", 1_000, 10).await;

        let mut blocker = db.pool().begin().await.unwrap();
        sqlx::query("UPDATE products SET stock = stock WHERE id = ?1")
            .bind(teh.id)
            .execute(&mut *blocker)
            .await
            .unwrap();

        let engine = CheckoutEngine::new(db.pool().clone())
            .with_timeout(Duration::from_millis(100));
        let err = engine.checkout(&cart(&[(teh.id, 3)])).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Persistence(_)));

        blocker.rollback().await.unwrap();

        // Nothing of the aborted unit of work survives.
        assert_eq!(stock_of(&db, teh.id).await, 10);
        assert_eq!(transaction_count(&db).await, 0);
    }

    #[tokio::test]
    async fn empty_cart_is_rejected_before_any_store_access() {
        let db = memory_db().await;
        let engine = CheckoutEngine::new(db.pool().clone());

        let err = engine.checkout(&cart(&[])).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Invalid(_)));
    }

    #[tokio::test]
    async fn checkout_is_deliberately_not_idempotent() {
        // No idempotency key exists: the same cart twice is two sales
        // and a double decrement. Expected behavior, not a bug.
        let db = memory_db().await;
        let category = seed_category(&db, "Minuman").await;
        let teh = seed_product(&db, category.id, "Teh Botol", 1_000, 10).await;
        let engine = CheckoutEngine::new(db.pool().clone());

        let first = engine.checkout(&cart(&[(teh.id, 3)])).await.unwrap();
        let second = engine.checkout(&cart(&[(teh.id, 3)])).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(stock_of(&db, teh.id).await, 4);
        assert_eq!(transaction_count(&db).await, 2);
    }

    #[tokio::test]
    async fn concurrent_checkouts_never_oversell() {
        // Two checkouts each want 7 from a stock of 10: exactly one
        // may win, and final stock must be 3.
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("toko.db")).max_connections(4);
        let db = Database::new(config).await.unwrap();

        let category = seed_category(&db, "Minuman").await;
        let teh = seed_product(&db, category.id, "Teh Botol", 1_000, 10).await;
        let engine = CheckoutEngine::new(db.pool().clone());

        let a = {
            let engine = engine.clone();
            let request = cart(&[(teh.id, 7)]);
            tokio::spawn(async move { engine.checkout(&request).await })
        };
        let b = {
            let engine = engine.clone();
            let request = cart(&[(teh.id, 7)]);
            tokio::spawn(async move { engine.checkout(&request).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert!(results.iter().any(|r| matches!(
            r,
            Err(CheckoutError::InsufficientStock { available: 3, .. })
        )));

        assert_eq!(stock_of(&db, teh.id).await, 3);
        assert_eq!(transaction_count(&db).await, 1);
    }
}

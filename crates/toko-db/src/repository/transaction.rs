//! # Transaction Repository
//!
//! Append-only persistence for sale records.
//!
//! A transaction row and its detail rows are only ever written inside
//! the checkout unit of work, in the same SQLite transaction as the
//! stock decrements - either everything commits or nothing does. Reads
//! ([`TransactionRepository::list_in_range`]) serve the summary
//! aggregator and run outside any write transaction.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use toko_core::{Transaction, TransactionDetail};

/// Repository for transaction database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Persists a transaction header and its line items inside a unit
    /// of work.
    ///
    /// The creation timestamp and all ids are server-assigned here;
    /// details come in request order and keep it. Returns the fully
    /// populated transaction.
    pub async fn create_with_details(
        &self,
        conn: &mut SqliteConnection,
        total_amount: i64,
        mut details: Vec<TransactionDetail>,
    ) -> DbResult<Transaction> {
        let created_at = Utc::now();

        let result =
            sqlx::query("INSERT INTO transactions (total_amount, created_at) VALUES (?1, ?2)")
                .bind(total_amount)
                .bind(created_at)
                .execute(&mut *conn)
                .await?;
        let transaction_id = result.last_insert_rowid();

        debug!(
            id = transaction_id,
            total_amount = total_amount,
            lines = details.len(),
            "inserting transaction"
        );

        for detail in &mut details {
            detail.transaction_id = transaction_id;

            let result = sqlx::query(
                "INSERT INTO transaction_details \
                 (transaction_id, product_id, product_name, quantity, subtotal) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(detail.transaction_id)
            .bind(detail.product_id)
            .bind(&detail.product_name)
            .bind(detail.quantity)
            .bind(detail.subtotal)
            .execute(&mut *conn)
            .await?;

            detail.id = result.last_insert_rowid();
        }

        Ok(Transaction {
            id: transaction_id,
            total_amount,
            created_at,
            details,
        })
    }

    /// Lists transactions whose creation timestamp falls in the
    /// inclusive range `[from, to]`, most recent first, with details
    /// attached in insertion order.
    pub async fn list_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DbResult<Vec<Transaction>> {
        let mut transactions = sqlx::query_as::<_, Transaction>(
            "SELECT id, total_amount, created_at FROM transactions \
             WHERE created_at BETWEEN ?1 AND ?2 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        for transaction in &mut transactions {
            transaction.details = self.details_for(transaction.id).await?;
        }

        Ok(transactions)
    }

    /// Gets a transaction by id with its details, or `None`.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>(
            "SELECT id, total_amount, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match transaction {
            Some(mut transaction) => {
                transaction.details = self.details_for(transaction.id).await?;
                Ok(Some(transaction))
            }
            None => Ok(None),
        }
    }

    async fn details_for(&self, transaction_id: i64) -> DbResult<Vec<TransactionDetail>> {
        let details = sqlx::query_as::<_, TransactionDetail>(
            "SELECT id, transaction_id, product_id, product_name, quantity, subtotal \
             FROM transaction_details WHERE transaction_id = ?1 ORDER BY id",
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use toko_core::TransactionDetail;

    use crate::repository::testutil::memory_db;

    fn detail(product_id: i64, name: &str, quantity: i64, subtotal: i64) -> TransactionDetail {
        TransactionDetail {
            id: 0,
            transaction_id: 0,
            product_id,
            product_name: name.to_string(),
            quantity,
            subtotal,
        }
    }

    #[tokio::test]
    async fn create_assigns_ids_and_links_details() {
        let db = memory_db().await;
        let repo = db.transactions();

        let mut conn = db.pool().begin().await.unwrap();
        let created = repo
            .create_with_details(
                &mut conn,
                45_000,
                vec![
                    detail(1, "Kopi Susu", 3, 45_000),
                ],
            )
            .await
            .unwrap();
        conn.commit().await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.details.len(), 1);
        assert!(created.details[0].id > 0);
        assert_eq!(created.details[0].transaction_id, created.id);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn list_in_range_is_inclusive_and_newest_first() {
        let db = memory_db().await;
        let repo = db.transactions();

        for total in [1_000i64, 2_000, 3_000] {
            let mut conn = db.pool().begin().await.unwrap();
            repo.create_with_details(&mut conn, total, vec![detail(1, "Teh", 1, total)])
                .await
                .unwrap();
            conn.commit().await.unwrap();
        }

        let now = Utc::now();
        let listed = repo
            .list_in_range(now - Duration::minutes(5), now + Duration::minutes(5))
            .await
            .unwrap();

        assert_eq!(listed.len(), 3);
        // Newest first; identical timestamps fall back to id order.
        assert!(listed[0].id > listed[1].id);
        assert!(listed[1].id > listed[2].id);
        assert_eq!(listed[0].details.len(), 1);
    }

    #[tokio::test]
    async fn list_outside_range_is_empty() {
        let db = memory_db().await;
        let repo = db.transactions();

        let mut conn = db.pool().begin().await.unwrap();
        repo.create_with_details(&mut conn, 1_000, vec![detail(1, "Teh", 1, 1_000)])
            .await
            .unwrap();
        conn.commit().await.unwrap();

        let long_ago = Utc::now() - Duration::days(30);
        let listed = repo
            .list_in_range(long_ago - Duration::days(1), long_ago)
            .await
            .unwrap();
        assert!(listed.is_empty());
    }
}

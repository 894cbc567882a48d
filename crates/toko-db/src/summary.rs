//! # Sales Summary
//!
//! Read-only aggregation over committed transactions: total revenue,
//! transaction count, and the best-selling product for an inclusive
//! time range.
//!
//! The aggregator reads detail rows, not the product table, so the
//! product name it reports is the snapshot taken at sale time. A
//! renamed or deleted product never distorts history; two snapshots
//! with the same name accumulate together.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::transaction::TransactionRepository;
use toko_core::{BestSeller, Money, SummaryResponse};

/// Computes sales summaries from the transaction store.
#[derive(Debug, Clone)]
pub struct SummaryAggregator {
    transactions: TransactionRepository,
}

impl SummaryAggregator {
    /// Creates an aggregator over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        SummaryAggregator {
            transactions: TransactionRepository::new(pool),
        }
    }

    /// Summarizes all transactions created in the inclusive range
    /// `[from, to]`.
    ///
    /// Revenue and count are additive over disjoint ranges. The best
    /// seller is the snapshot name with the highest cumulative
    /// quantity; on a tie the first name to reach the winning quantity
    /// in scan order (newest transaction first, details in insertion
    /// order) keeps the title. An empty range yields zeros and an
    /// empty-named best seller rather than an error.
    pub async fn summarize(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DbResult<SummaryResponse> {
        let transactions = self.transactions.list_in_range(from, to).await?;

        let mut summary = SummaryResponse::default();
        let mut sold: HashMap<String, i64> = HashMap::new();

        for transaction in &transactions {
            // Same checked arithmetic as checkout: a pathological
            // range errors instead of wrapping.
            summary.total_revenue = Money::from_minor(summary.total_revenue)
                .checked_add(Money::from_minor(transaction.total_amount))
                .ok_or_else(|| DbError::Internal("summary revenue overflowed".to_string()))?
                .minor();
            summary.total_transactions += 1;

            for detail in &transaction.details {
                let quantity = sold
                    .entry(detail.product_name.clone())
                    .and_modify(|q| *q += detail.quantity)
                    .or_insert(detail.quantity);

                // Strictly greater: ties keep the earlier titleholder.
                if *quantity > summary.best_seller.qty_sold {
                    summary.best_seller = BestSeller {
                        name: detail.product_name.clone(),
                        qty_sold: *quantity,
                    };
                }
            }
        }

        debug!(
            from = %from,
            to = %to,
            transactions = summary.total_transactions,
            revenue = summary.total_revenue,
            "summary computed"
        );

        Ok(summary)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

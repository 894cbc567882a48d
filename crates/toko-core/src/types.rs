//! # Domain Types
//!
//! Core domain types used throughout Toko.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                             │
//! │                                                                 │
//! │  ┌──────────────┐    ┌──────────────┐    ┌───────────────────┐  │
//! │  │   Category   │◄───│   Product    │    │    Transaction    │  │
//! │  │ ──────────── │ FK │ ──────────── │    │ ───────────────── │  │
//! │  │ id           │    │ id           │    │ id                │  │
//! │  │ name         │    │ name         │    │ total_amount      │  │
//! │  │ description  │    │ price, stock │    │ created_at        │  │
//! │  └──────────────┘    │ category_id  │    │ details ──────┐   │  │
//! │                      └──────────────┘    └───────────────│───┘  │
//! │                                                          ▼      │
//! │  ┌──────────────────┐    ┌───────────────────────────────────┐  │
//! │  │ CheckoutRequest  │    │        TransactionDetail          │  │
//! │  │ ──────────────── │    │ ───────────────────────────────── │  │
//! │  │ items:           │──► │ product_id, product_name (snap),  │  │
//! │  │  [id, quantity]  │    │ quantity, subtotal                │  │
//! │  └──────────────────┘    └───────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `TransactionDetail.product_name` is copied from the product at sale
//! time. Reporting reads the snapshot, so renaming or deleting a
//! product never changes historical summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Category
// =============================================================================

/// A product category. Master data, mutated only by CRUD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Unique identifier, assigned by the database.
    pub id: i64,

    /// Display name. Must be non-empty.
    pub name: String,

    /// Free-text description. May be empty.
    pub description: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier, assigned by the database.
    pub id: i64,

    /// Display name, also snapshotted onto transaction details.
    pub name: String,

    /// Price in the smallest currency unit. Never negative.
    pub price: i64,

    /// Current stock level. Never negative after a committed operation.
    pub stock: i64,

    /// The category this product belongs to. Must resolve to an
    /// existing category at create/update time.
    pub category_id: i64,

    /// Embedded category snapshot, populated on read paths only.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub category: Option<Category>,
}

// =============================================================================
// Checkout Request
// =============================================================================

/// One requested line of a checkout: which product, how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub product_id: i64,

    /// Requested quantity. Must be positive.
    pub quantity: i64,
}

/// A cart submitted for checkout. Transient, never persisted.
///
/// Items are processed in request order; line items are numbered in
/// the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

// =============================================================================
// Transaction
// =============================================================================

/// A completed sale. Created exactly once per successful checkout and
/// immutable thereafter: there is no update or delete operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    /// Unique identifier, assigned by the database.
    pub id: i64,

    /// Sum of all detail subtotals, in the smallest currency unit.
    pub total_amount: i64,

    /// Server-assigned creation timestamp (UTC).
    pub created_at: DateTime<Utc>,

    /// Line items in request order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub details: Vec<TransactionDetail>,
}

/// One product line within a transaction. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionDetail {
    /// Unique identifier, assigned by the database.
    pub id: i64,

    /// Parent transaction.
    pub transaction_id: i64,

    /// The product sold. Intentionally not a foreign key: history
    /// outlives the product row.
    pub product_id: i64,

    /// Product name snapshot taken at sale time.
    pub product_name: String,

    /// Quantity sold. Always positive.
    pub quantity: i64,

    /// quantity × unit price at sale time. Never negative.
    pub subtotal: i64,
}

// =============================================================================
// Summary
// =============================================================================

/// The product with the highest cumulative quantity sold in a range.
///
/// Wire field names (`nama`, `qty_terjual`) preserve the original API
/// contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSeller {
    /// Product name (snapshot). Empty when the range has no sales.
    #[serde(rename = "nama")]
    pub name: String,

    /// Cumulative quantity sold across the range.
    #[serde(rename = "qty_terjual")]
    pub qty_sold: i64,
}

/// Aggregated sales figures over an inclusive timestamp range.
/// Derived on demand, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Sum of `total_amount` over all transactions in range.
    pub total_revenue: i64,

    /// Number of transactions in range.
    #[serde(rename = "total_transaksi")]
    pub total_transactions: i64,

    /// Best-selling product in range, or the empty default.
    #[serde(rename = "produk_terlaris")]
    pub best_seller: BestSeller,
}

// =============================================================================
// Unit Tests
// =============================================================================

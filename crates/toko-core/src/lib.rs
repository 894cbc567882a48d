//! # toko-core: Pure Business Logic for Toko
//!
//! This crate is the heart of the Toko backend. It contains the domain
//! types and business rules as pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Toko Architecture                          │
//! │                                                                 │
//! │  HTTP client ──► apps/server (axum routes, status mapping)      │
//! │                       │                                         │
//! │                       ▼                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │              ★ toko-core (THIS CRATE) ★                   │  │
//! │  │                                                           │  │
//! │  │   ┌─────────┐  ┌─────────┐  ┌────────────┐  ┌─────────┐  │  │
//! │  │   │  types  │  │  money  │  │ validation │  │  error  │  │  │
//! │  │   │ Product │  │  Money  │  │   rules    │  │  enums  │  │  │
//! │  │   │ Txn ... │  │ checked │  │   checks   │  │         │  │  │
//! │  │   └─────────┘  └─────────┘  └────────────┘  └─────────┘  │  │
//! │  │                                                           │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS      │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                       │                                         │
//! │                       ▼                                         │
//! │  toko-db (SQLite stores, checkout engine, summary aggregator)   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic, side-effect free
//! 2. **Integer Money**: all monetary values are in the smallest
//!    currency unit (i64), never floats
//! 3. **Explicit Errors**: typed enums, never strings or panics

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// Re-export the most commonly used items at crate root.
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{
    BestSeller, Category, CheckoutItem, CheckoutRequest, Product, SummaryResponse, Transaction,
    TransactionDetail,
};

// =============================================================================
// Business Constants
// =============================================================================

/// Maximum number of line items in a single checkout request.
pub const MAX_CHECKOUT_ITEMS: usize = 100;

/// Maximum quantity for a single line item.
pub const MAX_ITEM_QUANTITY: i64 = 999;

//! # toko-db: Database Layer for Toko
//!
//! SQLite persistence with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Toko Data Flow                            │
//! │                                                                 │
//! │  HTTP handler (POST /api/checkout)                              │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                  toko-db (THIS CRATE)                     │  │
//! │  │                                                           │  │
//! │  │  ┌──────────┐  ┌──────────────┐  ┌─────────────────────┐  │  │
//! │  │  │ Database │  │ Repositories │  │   CheckoutEngine    │  │  │
//! │  │  │ (pool.rs)│  │ category     │  │ one atomic unit of  │  │  │
//! │  │  │          │◄─│ product      │◄─│ work: lock, check,  │  │  │
//! │  │  │SqlitePool│  │ transaction  │  │ decrement, record   │  │  │
//! │  │  └──────────┘  └──────────────┘  └─────────────────────┘  │  │
//! │  │                                  ┌─────────────────────┐  │  │
//! │  │                                  │  SummaryAggregator  │  │  │
//! │  │                                  │  read-only reports  │  │  │
//! │  │                                  └─────────────────────┘  │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  SQLite (WAL mode, foreign keys on, bounded busy timeout)       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Category, product and transaction stores
//! - [`checkout`] - The checkout engine (atomic stock decrement + sale record)
//! - [`summary`] - Daily sales summary aggregation

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod summary;

pub use checkout::{CheckoutEngine, CheckoutError};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use summary::SummaryAggregator;

pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
pub use repository::transaction::TransactionRepository;

//! # Router and Shared State
//!
//! Route tree:
//! ```text
//! GET    /health
//! GET    /api/category            GET    /api/product
//! POST   /api/category            POST   /api/product
//! GET    /api/category/:id        GET    /api/product/:id
//! PUT    /api/category/:id        PUT    /api/product/:id
//! DELETE /api/category/:id        DELETE /api/product/:id
//! POST   /api/checkout
//! GET    /api/transaction/:id
//! GET    /api/transaction/summary
//! ```

use std::time::Duration;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use toko_db::{CheckoutEngine, Database, SummaryAggregator};

use crate::handlers::{category, product, transaction};

/// Shared application state. Cheap to clone; everything inside shares
/// the one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub checkout: CheckoutEngine,
    pub summary: SummaryAggregator,
}

impl AppState {
    pub fn new(db: Database, checkout_timeout: Duration) -> Self {
        let pool = db.pool().clone();
        AppState {
            checkout: CheckoutEngine::new(pool.clone()).with_timeout(checkout_timeout),
            summary: SummaryAggregator::new(pool),
            db,
        }
    }
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/category", get(category::list).post(category::create))
        .route(
            "/api/category/:id",
            get(category::get)
                .put(category::update)
                .delete(category::remove),
        )
        .route("/api/product", get(product::list).post(product::create))
        .route(
            "/api/product/:id",
            get(product::get)
                .put(product::update)
                .delete(product::remove),
        )
        .route("/api/checkout", post(transaction::checkout))
        .route("/api/transaction/summary", get(transaction::summary))
        .route("/api/transaction/:id", get(transaction::get))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running",
        "version": env!("CARGO_PKG_VERSION"),
        "database": state.db.health_check().await,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

// =============================================================================
// Route Tests
// =============================================================================

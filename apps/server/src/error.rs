//! # API Error Types
//!
//! One closed error enum for the HTTP surface. Every layer error is
//! converted into an [`ApiError`] at the handler boundary, and the
//! `IntoResponse` impl is the single place status codes are chosen.
//! Error bodies are `{"message": "..."}` like every other error this
//! API returns.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use toko_core::CoreError;
use toko_db::{CheckoutError, DbError};

/// HTTP-facing error.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The addressed resource does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The request was malformed or failed validation.
    #[error("{0}")]
    BadRequest(String),

    /// The operation conflicts with existing references
    /// (e.g. deleting a category that products still use).
    #[error("{0}")]
    Conflict(String),

    /// Checkout rejected: not enough stock.
    #[error("insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        requested: i64,
        available: i64,
    },

    /// Anything the client can't fix. The detail is logged, not sent.
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InsufficientStock { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref detail) = self {
            error!(detail = %detail, "internal error");
        }

        let status = self.status();
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::NotFound { entity, id },
            DbError::ForeignKeyViolation { message } => ApiError::Conflict(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::ProductNotFound(id) => ApiError::NotFound {
                entity: "Product",
                id,
            },
            CheckoutError::InsufficientStock {
                product_id,
                requested,
                available,
            } => ApiError::InsufficientStock {
                product_id,
                requested,
                available,
            },
            CheckoutError::Invalid(core) => core.into(),
            CheckoutError::Persistence(db) => db.into(),
        }
    }
}

/// Result alias used by all handlers.
pub type ApiResult<T> = Result<T, ApiError>;

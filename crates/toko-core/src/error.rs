//! # Error Types
//!
//! Domain-specific error types for toko-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Error Types                              │
//! │                                                                 │
//! │  toko-core errors (this file)                                   │
//! │  ├── CoreError        - Business rule violations                │
//! │  └── ValidationError  - Input validation failures               │
//! │                                                                 │
//! │  toko-db errors (separate crate)                                │
//! │  ├── DbError          - Database operation failures             │
//! │  └── CheckoutError    - Closed checkout taxonomy                │
//! │                                                                 │
//! │  HTTP layer (apps/server)                                       │
//! │  └── ApiError         - Status code + wire message              │
//! │                                                                 │
//! │  Flow: ValidationError → CoreError → CheckoutError → ApiError   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derives, no manual impls
//! 2. Errors are enum variants callers can branch on, never bare strings
//! 3. Context (field names, limits) travels in the variant

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Subtotal or total arithmetic overflowed i64. A cart that
    /// triggers this is rejected wholesale.
    #[error("monetary amount overflowed")]
    AmountOverflow,

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Collection holds too many entries.
    #[error("{field} cannot have more than {max} entries")]
    TooMany { field: &'static str, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = ValidationError::Required { field: "name" };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive { field: "quantity" };
        assert_eq!(err.to_string(), "quantity must be positive");

        assert_eq!(
            CoreError::AmountOverflow.to_string(),
            "monetary amount overflowed"
        );
    }

    #[test]
    fn validation_converts_to_core_error() {
        let err: CoreError = ValidationError::Required { field: "name" }.into();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}

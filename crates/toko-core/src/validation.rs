//! # Validation Module
//!
//! Input validation for Toko.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Validation Layers                           │
//! │                                                                 │
//! │  Layer 1: HTTP handler (serde)                                  │
//! │  └── Type validation: the checkout engine never sees raw        │
//! │      untyped input                                              │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 2: THIS MODULE                                           │
//! │  └── Business rule validation (non-empty names, positive        │
//! │      quantities, request size caps)                             │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 3: Database (SQLite)                                     │
//! │  └── NOT NULL, CHECK (stock >= 0), foreign keys                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::CheckoutRequest;
use crate::{MAX_CHECKOUT_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a category name: non-empty after trimming, at most 200
/// characters.
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates a product name: non-empty after trimming, at most 200
/// characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

fn validate_name(field: &'static str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field });
    }

    // Characters, not bytes: multi-byte names must not be penalized.
    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong { field, max: 200 });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in minor units.
///
/// Zero is allowed (free items); negative is not.
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price",
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level. Zero is allowed; negative is not.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock",
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a line item quantity: strictly positive, capped at
/// [`MAX_ITEM_QUANTITY`].
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Checkout Request
// =============================================================================

/// Validates a checkout request before it reaches the engine.
///
/// ## Rules
/// - At least one item
/// - At most [`MAX_CHECKOUT_ITEMS`] items
/// - Every quantity positive and within range
///
/// Stock availability is NOT checked here: that requires the locked
/// read inside the checkout unit of work.
pub fn validate_checkout_request(request: &CheckoutRequest) -> ValidationResult<()> {
    if request.items.is_empty() {
        return Err(ValidationError::Required { field: "items" });
    }

    if request.items.len() > MAX_CHECKOUT_ITEMS {
        return Err(ValidationError::TooMany {
            field: "items",
            max: MAX_CHECKOUT_ITEMS,
        });
    }

    for item in &request.items {
        validate_quantity(item.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CheckoutItem;

    #[test]
    fn validate_names() {
        assert!(validate_category_name("Minuman").is_ok());
        assert!(validate_product_name("Kopi Susu 250ml").is_ok());

        assert!(validate_category_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // 150 characters but 300 bytes: still within the limit.
        assert!(validate_product_name(&"é".repeat(150)).is_ok());
        assert!(validate_category_name(&"é".repeat(200)).is_ok());
        assert!(validate_category_name(&"é".repeat(201)).is_err());
    }

    #[test]
    fn validate_price_and_stock() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(15_000).is_ok());
        assert!(validate_price(-1).is_err());

        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(10).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn validate_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn checkout_request_must_have_items() {
        let empty = CheckoutRequest { items: vec![] };
        assert!(matches!(
            validate_checkout_request(&empty),
            Err(ValidationError::Required { field: "items" })
        ));
    }

    #[test]
    fn checkout_request_rejects_bad_quantity() {
        let request = CheckoutRequest {
            items: vec![CheckoutItem {
                product_id: 1,
                quantity: 0,
            }],
        };
        assert!(validate_checkout_request(&request).is_err());
    }

    #[test]
    fn checkout_request_caps_item_count() {
        let request = CheckoutRequest {
            items: (0..=MAX_CHECKOUT_ITEMS as i64)
                .map(|i| CheckoutItem {
                    product_id: i,
                    quantity: 1,
                })
                .collect(),
        };
        assert!(matches!(
            validate_checkout_request(&request),
            Err(ValidationError::TooMany { .. })
        ));
    }

    #[test]
    fn checkout_request_accepts_valid_cart() {
        let request = CheckoutRequest {
            items: vec![
                CheckoutItem {
                    product_id: 1,
                    quantity: 3,
                },
                CheckoutItem {
                    product_id: 2,
                    quantity: 1,
                },
            ],
        };
        assert!(validate_checkout_request(&request).is_ok());
    }
}

//! # Validation Module
//!
//! Input validation for order operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Browser UI                                                │
//! │  └── Immediate feedback (empty fields, obvious typos)               │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE (session layer calls it before the engine)    │
//! │  └── Quantity/price/customer rules                                  │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: HTTP backend                                              │
//! │  └── Authoritative checks (stock, order status)                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The totals engine stays total over its inputs; only callers validate.
//! Note that the percentage discount is *expected* in 0–100 but deliberately
//! not enforced here, matching production behavior.

use crate::error::ValidationError;
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0): a zero/negative quantity never reaches the
///   engine's `add` path, `set_quantity` treats it as removal instead
/// - Must not exceed MAX_LINE_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity".to_string() });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in Toman.
///
/// ## Rules
/// - Must be non-negative (zero allowed for complimentary items)
pub fn validate_unit_price(amount: i64) -> ValidationResult<()> {
    if amount < 0 {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a fixed discount amount in Toman.
///
/// Non-negative only; whether it exceeds the subtotal is NOT checked here
/// (the engine propagates negative tax bases by design).
pub fn validate_discount_amount(amount: i64) -> ValidationResult<()> {
    if amount < 0 {
        return Err(ValidationError::OutOfRange {
            field: "discount amount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the number of distinct lines in an order.
pub fn validate_line_count(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_ORDER_LINES {
        return Err(ValidationError::OutOfRange {
            field: "order lines".to_string(),
            min: 0,
            max: MAX_ORDER_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer display name.
///
/// ## Rules
/// - May be empty (walk-in customers have no profile)
/// - Must be at most 100 characters
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.trim().chars().count() > 100 {
        return Err(ValidationError::TooLong { field: "customer name".to_string(), max: 100 });
    }

    Ok(())
}

/// Validates a customer phone number.
///
/// ## Rules
/// - May be empty
/// - Digits only, at most 15 of them
pub fn validate_customer_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.len() > 15 {
        return Err(ValidationError::TooLong { field: "customer phone".to_string(), max: 15 });
    }

    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "customer phone".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a payment method label before checkout.
pub fn validate_payment_method(method: &str) -> ValidationResult<()> {
    if method.trim().is_empty() {
        return Err(ValidationError::Required { field: "payment method".to_string() });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Error Types
//!
//! Domain-specific error types for sofre-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  sofre-core errors (this file)                                      │
//! │  ├── CoreError        - Domain rule violations                      │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  sofre-client errors (separate crate)                               │
//! │  └── ClientError      - Backend / session failures                  │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → ClientError → UI               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, limits, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::discount::{ApplyState, DiscountKind};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// The totals engine itself is total over its inputs and never raises;
/// these errors come from the line-list operations and the discount
/// apply state machine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line references an item not present in the order.
    ///
    /// Only raised where absence is a programming error; `remove` is
    /// deliberately a no-op on unknown ids.
    #[error("Item {0} is not in the order")]
    LineNotFound(i64),

    /// A line's quantity would exceed the per-line cap.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// The order has exceeded the maximum number of distinct lines.
    #[error("Order cannot have more than {max} lines")]
    TooManyLines { max: usize },

    /// A discount component transition was attempted from the wrong state.
    ///
    /// ## When This Occurs
    /// - Editing an amount/percent input after it was applied
    /// - Pressing apply while a previous apply is still persisting
    /// - Pressing apply on an already-applied component
    #[error("{kind:?} discount cannot transition from {state:?}")]
    DiscountState { kind: DiscountKind, state: ApplyState },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before values reach the engine; the engine itself never
/// validates (see the contract in [`crate::totals`]).
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-digit phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityTooLarge { requested: 1_000, max: 999 };
        assert_eq!(err.to_string(), "Quantity 1000 exceeds maximum allowed (999)");

        let err = CoreError::LineNotFound(42);
        assert_eq!(err.to_string(), "Item 42 is not in the order");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive { field: "quantity".to_string() };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required { field: "customer name".to_string() };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

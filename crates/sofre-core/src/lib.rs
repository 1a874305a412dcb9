//! # sofre-core: Pure Business Logic for Sofre POS
//!
//! This crate is the **heart** of Sofre POS. It contains the order total
//! engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sofre POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Clients (counter, table, takeaway)           │   │
//! │  │    Menu grid ──► Order list ──► Discount panel ──► Receipt      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    sofre-client (Session Layer)                 │   │
//! │  │    OrderSession, RestBackend, wire types                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sofre-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   order   │  │  totals   │  │ discount  │  │   │
//! │  │   │   Money   │  │   Order   │  │ pipeline  │  │ lifecycle │  │   │
//! │  │   │   Rate    │  │ OrderLine │  │  stages   │  │  states   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money and Rate types with integer arithmetic (no floating point!)
//! - [`order`] - Order line list and aggregation operations
//! - [`totals`] - The subtotal → discount → tax → final pipeline
//! - [`discount`] - Discount apply lifecycle per component
//! - [`channel`] - Sales channels and their tax profiles
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are i64 Toman to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use sofre_core::money::{Money, Rate, RoundingMode};
//! use sofre_core::order::Order;
//! use sofre_core::totals::{compute_totals, DiscountConfig};
//!
//! let mut order = Order::new();
//! order.add_or_increment(1, "Chelo Kebab", Money::new(50_000), 2)?;
//! order.add_or_increment(2, "Doogh", Money::new(30_000), 1)?;
//!
//! let discount = DiscountConfig {
//!     amount: Money::new(10_000),
//!     percent: Rate::from_percent(5.0),
//! };
//! let totals = compute_totals(&order, discount, Rate::from_percent(9.0), RoundingMode::HalfUp);
//!
//! assert_eq!(totals.subtotal.amount(), 130_000);
//! assert_eq!(totals.final_amount.amount(), 123_715);
//! # Ok::<(), sofre_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod channel;
pub mod discount;
pub mod error;
pub mod money;
pub mod order;
pub mod totals;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sofre_core::Money` instead of
// `use sofre_core::money::Money`

pub use channel::{Channel, ChannelProfile};
pub use discount::{ApplyState, DiscountKind, DiscountWorkflow};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Rate, RoundingMode};
pub use order::{Order, OrderLine};
pub use totals::{compute_totals, DiscountConfig, OrderTotals};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line in an order
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Can be made configurable per-branch in future versions.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum distinct lines allowed in a single order
///
/// ## Business Reason
/// Prevents runaway orders and keeps receipts printable on one roll.
pub const MAX_ORDER_LINES: usize = 100;

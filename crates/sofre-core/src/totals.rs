//! # Totals Module
//!
//! The order total pipeline: subtotal through discount and tax to the
//! final payable amount.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Total Computation Order                        │
//! │                                                                     │
//! │  subtotal ──────────────── Σ(unit_price × quantity)                 │
//! │      │                                                              │
//! │      ├─► discount_from_percent ── floor(subtotal × percent / 100)   │
//! │      │        (always against the PRE-discount subtotal)            │
//! │      │                                                              │
//! │      ├─► total_discount ───────── amount + discount_from_percent    │
//! │      │                                                              │
//! │      ▼                                                              │
//! │  tax_base ──────────────── subtotal − total_discount  (may be < 0)  │
//! │      │                                                              │
//! │      ├─► tax ───────────── round(tax_base × tax_percent / 100)      │
//! │      │                     (rounding mode per channel profile)      │
//! │      ▼                                                              │
//! │  final_amount ──────────── tax_base + tax                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - The percentage discount is computed against the pre-discount subtotal,
//!   so the amount and percent components never interact
//! - The two components add without re-rounding: the only floor happens
//!   inside `discount_from_percent`
//! - No stage clamps at zero. A discount larger than the subtotal yields a
//!   negative tax base and a negative final amount; rejecting or clamping
//!   that is a policy decision for the layer above, not for arithmetic

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Rate, RoundingMode};
use crate::order::Order;

// =============================================================================
// Discount Config
// =============================================================================

/// The two discount inputs to the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiscountConfig {
    /// Flat discount in Toman.
    pub amount: Money,

    /// Percentage discount, applied to the pre-discount subtotal.
    pub percent: Rate,
}

impl DiscountConfig {
    pub fn none() -> Self {
        DiscountConfig::default()
    }

    pub fn is_none(&self) -> bool {
        self.amount.is_zero() && self.percent.is_zero()
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Every intermediate and final stage of one totals computation.
///
/// All stages are exposed because the UI renders them separately (the
/// receipt shows subtotal, discount, tax, and total as distinct rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub discount_from_percent: Money,
    pub total_discount: Money,
    pub tax_base: Money,
    pub tax: Money,
    pub final_amount: Money,
}

impl OrderTotals {
    /// Totals of an empty order: all stages zero.
    pub fn empty() -> Self {
        OrderTotals {
            subtotal: Money::zero(),
            discount_from_percent: Money::zero(),
            total_discount: Money::zero(),
            tax_base: Money::zero(),
            tax: Money::zero(),
            final_amount: Money::zero(),
        }
    }
}

// =============================================================================
// Computation
// =============================================================================

/// Runs the full pipeline for one order.
///
/// The stage order is fixed; see the module diagram. `rounding` only
/// affects the tax stage, the percentage discount always floors.
pub fn compute_totals(
    order: &Order,
    discount: DiscountConfig,
    tax_rate: Rate,
    rounding: RoundingMode,
) -> OrderTotals {
    compute_totals_from_subtotal(order.subtotal(), discount, tax_rate, rounding)
}

/// Pipeline variant taking a precomputed subtotal.
///
/// Used when the line list lives elsewhere (a backend-rendered summary, a
/// receipt reprint) and only the aggregate is at hand.
pub fn compute_totals_from_subtotal(
    subtotal: Money,
    discount: DiscountConfig,
    tax_rate: Rate,
    rounding: RoundingMode,
) -> OrderTotals {
    let discount_from_percent = subtotal.percentage_floor(discount.percent);
    let total_discount = discount.amount + discount_from_percent;
    let tax_base = subtotal - total_discount;
    let tax = tax_base.tax(tax_rate, rounding);
    let final_amount = tax_base + tax;

    OrderTotals { subtotal, discount_from_percent, total_discount, tax_base, tax, final_amount }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Money Module
//!
//! Monetary values and percentage rates for order arithmetic.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In the browser: 0.1 + 0.2 = 0.30000000000000004  ❌               │
//! │                                                                     │
//! │  OUR SOLUTION: integer Toman                                        │
//! │    The Toman has no fractional subunit in practice, so every        │
//! │    amount in the system is a plain i64. Percentages are carried     │
//! │    in basis points so fractional rates (e.g. 2.5%) stay exact.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! The three ordering surfaces disagree on how tax is rounded (the counter
//! and table flows round to nearest, the takeaway flow floors), so rounding
//! is an explicit [`RoundingMode`] parameter, never a hidden policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in Toman (the smallest currency unit in use).
///
/// ## Design Decisions
/// - **i64 (signed)**: discount arithmetic may drive intermediates negative
///   (tax base, final amount); the engine surfaces those rather than clamp
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from an integer Toman amount.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies by a line quantity.
    #[inline]
    pub const fn times(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Floored percentage of this amount: `floor(amount × rate)`.
    ///
    /// This is how the percentage discount is computed on every surface,
    /// matching the browser's `Math.floor(total * percent / 100)`, always
    /// against the pre-discount subtotal.
    ///
    /// ## Example
    /// ```rust
    /// use sofre_core::money::{Money, Rate};
    ///
    /// let subtotal = Money::new(130_000);
    /// let pct = Rate::from_percent(5.0);
    /// assert_eq!(subtotal.percentage_floor(pct).amount(), 6_500);
    /// ```
    pub fn percentage_floor(&self, rate: Rate) -> Money {
        // i128 to keep large subtotals away from overflow
        let raw = self.0 as i128 * rate.bps() as i128;
        Money((raw.div_euclid(10_000)) as i64)
    }

    /// Tax on this amount under an explicit rounding mode.
    ///
    /// The base may be negative (discount exceeding subtotal); the result
    /// then carries the sign of the base under the same rounding rules the
    /// browser's `Math.round`/`Math.floor` would produce.
    ///
    /// ## Example
    /// ```rust
    /// use sofre_core::money::{Money, Rate, RoundingMode};
    ///
    /// let base = Money::new(113_500);
    /// assert_eq!(base.tax(Rate::from_percent(9.0), RoundingMode::HalfUp).amount(), 10_215);
    /// assert_eq!(base.tax(Rate::from_percent(12.0), RoundingMode::Floor).amount(), 13_620);
    /// ```
    pub fn tax(&self, rate: Rate, mode: RoundingMode) -> Money {
        let raw = self.0 as i128 * rate.bps() as i128;
        let tax = match mode {
            // Math.round: half rounds toward +∞, for negatives too
            RoundingMode::HalfUp => (raw + 5_000).div_euclid(10_000),
            // Math.floor: toward −∞, not truncation toward zero
            RoundingMode::Floor => raw.div_euclid(10_000),
        };
        Money(tax as i64)
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A percentage rate in basis points (1 bp = 0.01%).
///
/// Used for both the tax percent and the percentage discount. Basis points
/// keep fractional UI input (e.g. `2.5`) exact through integer math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points (900 = 9%).
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage value (9.0 = 9%).
    pub fn from_percent(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage, for serialization back to the
    /// backend's `discount_percent`/`tax_percent` fields.
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Rounding Mode
// =============================================================================

/// How a fractional tax amount is brought back to whole Toman.
///
/// Two policies coexist in production and both must be supported as
/// configuration (see the per-channel defaults in [`crate::channel`]):
/// the counter and table flows round half up, the takeaway flow floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round to nearest; half goes toward +∞ (`Math.round`).
    HalfUp,
    /// Round toward −∞ (`Math.floor`).
    Floor,
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the raw Toman amount; the UI owns locale formatting
/// (thousands separators, currency word).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

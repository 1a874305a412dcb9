//! # Order Module
//!
//! The in-memory order line list and its aggregation rules.
//!
//! ## Line List Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Order Line Operations                           │
//! │                                                                     │
//! │  UI Action                 Operation              Line List Change  │
//! │  ─────────                 ─────────              ────────────────  │
//! │                                                                     │
//! │  Click menu card ────────► add_or_increment ───► merge or append    │
//! │                                                                     │
//! │  Press +/− ──────────────► set_quantity ───────► qty = n, or        │
//! │                                                  remove when n ≤ 0  │
//! │                                                                     │
//! │  Press × ────────────────► remove ─────────────► drop the line      │
//! │                                                                     │
//! │  Submit / close session ─► clear ──────────────► empty list         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `item_id` is unique within one order: re-adding merges quantities
//! - The unit price stored on the *first* add is authoritative; later adds
//!   never overwrite it (guards against stale price snapshots in the UI)
//! - Quantity is always ≥ 1; a line driven to zero is removed, never stored

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

// =============================================================================
// Order Line
// =============================================================================

/// One entry in an order: a menu item reference with a frozen price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLine {
    /// Menu item id (stable per line; duplicates merge into it).
    pub item_id: i64,

    /// Display name. Not used in any computation.
    pub name: String,

    /// Price in Toman at the time the line was created (frozen).
    pub unit_price: Money,

    /// Always ≥ 1.
    pub quantity: i64,
}

impl OrderLine {
    /// Line total: `unit_price × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

// =============================================================================
// Order
// =============================================================================

/// An open order's line list.
///
/// Created empty when a session (counter panel, table modal, takeaway
/// modal) opens, mutated by the operations below, and discarded when the
/// session closes. The backend is the durable owner of record after submit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    /// Lines, unique by `item_id`.
    pub lines: Vec<OrderLine>,

    /// When this order's session opened (or was last cleared).
    #[ts(as = "String")]
    pub opened_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new empty order.
    pub fn new() -> Self {
        Order { lines: Vec::new(), opened_at: Utc::now() }
    }

    /// Adds a line, or merges into the existing line for the same item.
    ///
    /// ## Behavior
    /// - Item already present: quantity increases; the stored price wins
    ///   over `unit_price` passed here
    /// - Item absent: a new line is appended with the given snapshot
    ///
    /// Callers validate `quantity ≥ 1` before calling (see
    /// [`crate::validation::validate_quantity`]); the caps on line count and
    /// per-line quantity are enforced here because they depend on state.
    pub fn add_or_increment(
        &mut self,
        item_id: i64,
        name: &str,
        unit_price: Money,
        quantity: i64,
    ) -> CoreResult<()> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.lines.len() >= MAX_ORDER_LINES {
            return Err(CoreError::TooManyLines { max: MAX_ORDER_LINES });
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge { requested: quantity, max: MAX_LINE_QUANTITY });
        }

        self.lines.push(OrderLine { item_id, name: name.to_string(), unit_price, quantity });
        Ok(())
    }

    /// Removes the line for `item_id`.
    ///
    /// Deliberately a no-op when the item is absent (remove is idempotent
    /// from the UI's point of view).
    pub fn remove(&mut self, item_id: i64) {
        self.lines.retain(|l| l.item_id != item_id);
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `quantity ≥ 1`: the line is updated
    /// - `quantity ≤ 0`: the line is removed. Decrementing a quantity-1
    ///   line drops it rather than leaving a zero-quantity line; this is a
    ///   deliberate policy, not an edge case
    /// - Unknown item with positive quantity: [`CoreError::LineNotFound`]
    pub fn set_quantity(&mut self, item_id: i64, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove(item_id);
            return Ok(());
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge { requested: quantity, max: MAX_LINE_QUANTITY });
        }

        match self.lines.iter_mut().find(|l| l.item_id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::LineNotFound(item_id)),
        }
    }

    /// Looks up a line by item id.
    pub fn line(&self, item_id: i64) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }

    /// Removes all lines and restarts the session clock.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.opened_at = Utc::now();
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Subtotal: Σ(unit_price × quantity), before any discount or tax.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).fold(Money::zero(), |acc, t| acc + t)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

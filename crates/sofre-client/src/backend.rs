//! # Backend Trait
//!
//! The persistence seam between a session and the restaurant backend.
//!
//! [`OrderBackend`] is everything a session needs from the outside world.
//! Production uses [`crate::rest::RestBackend`]; tests drive sessions
//! against an in-memory fake, so every session rule (call-first mutation,
//! discount revert on failure, the busy guard) is testable without a
//! server.

use async_trait::async_trait;
use sofre_core::{Channel, Money, Order, totals::DiscountConfig};

use crate::error::ClientResult;

// =============================================================================
// Session Target
// =============================================================================

/// Which backend resource a session is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTarget {
    /// Counter sales have no server-side order until submit; everything
    /// is local and goes up in one `create_order` call.
    Counter,
    /// A numbered dine-in table; line edits persist per call.
    Table(i64),
    /// A takeaway order id from `create_takeaway`; line edits persist
    /// per call.
    Takeaway(i64),
}

impl SessionTarget {
    /// The sales channel this target belongs to.
    pub const fn channel(&self) -> Channel {
        match self {
            SessionTarget::Counter => Channel::Counter,
            SessionTarget::Table(_) => Channel::Table,
            SessionTarget::Takeaway(_) => Channel::Takeaway,
        }
    }

    /// True when each line edit must be persisted by its own call.
    pub const fn persists_per_line(&self) -> bool {
        !matches!(self, SessionTarget::Counter)
    }
}

// =============================================================================
// Backend Data Types
// =============================================================================

/// One sellable menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub price: Money,
    pub stock: i64,
}

/// Customer fields and discount state sent alongside them.
///
/// `combined_discount` is the already-computed
/// `amount + floor(subtotal × percent / 100)`; the backend stores it next
/// to the split pair for its legacy reports.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerUpdate {
    pub customer_name: String,
    pub customer_phone: String,
    pub birth_date: Option<String>,
    pub discount: DiscountConfig,
    pub combined_discount: Money,
}

/// Outcome of a successful create or checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub invoice_number: String,
    pub order_id: Option<i64>,
}

/// A newly opened takeaway order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeawayHandle {
    pub order_id: i64,
    pub invoice_number: String,
}

/// One hit from a customer search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerMatch {
    pub name: String,
    pub phone: Option<String>,
}

// =============================================================================
// Backend Trait
// =============================================================================

/// Persistence operations a session may invoke.
///
/// Implementations must be side-effect free on failure: an `Err` return
/// means the backend state is unchanged as far as the caller can tell, so
/// the session is free to leave its local state untouched too.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Loads the sellable menu.
    async fn fetch_menu(&self) -> ClientResult<Vec<MenuItem>>;

    /// Opens a new takeaway order on the server.
    async fn create_takeaway(
        &self,
        customer_name: &str,
        customer_phone: &str,
    ) -> ClientResult<TakeawayHandle>;

    /// Persists one added unit of `item_id` (table/takeaway targets only).
    async fn add_item(
        &self,
        target: SessionTarget,
        item_id: i64,
        quantity: i64,
    ) -> ClientResult<()>;

    /// Persists a quantity change for an existing line.
    async fn update_item_quantity(
        &self,
        target: SessionTarget,
        item_id: i64,
        quantity: i64,
    ) -> ClientResult<()>;

    /// Persists a line removal. `reason` is required by the backend once
    /// the order has been sent to the kitchen.
    async fn remove_item(
        &self,
        target: SessionTarget,
        item_id: i64,
        reason: Option<&str>,
    ) -> ClientResult<()>;

    /// Persists customer fields and the discount snapshot.
    async fn update_customer(
        &self,
        target: SessionTarget,
        update: &CustomerUpdate,
    ) -> ClientResult<()>;

    /// One-shot counter order creation.
    async fn create_order(
        &self,
        order: &Order,
        customer_name: &str,
        customer_phone: &str,
        discount: Money,
        tax_percent: u32,
    ) -> ClientResult<Receipt>;

    /// Sends the order to the kitchen.
    async fn submit(&self, target: SessionTarget, birth_date: Option<&str>) -> ClientResult<()>;

    /// Settles the order and closes it.
    async fn checkout(
        &self,
        target: SessionTarget,
        payment_method: &str,
    ) -> ClientResult<Receipt>;

    /// Prefix search over registered customers.
    async fn search_customers(&self, query: &str) -> ClientResult<Vec<CustomerMatch>>;
}

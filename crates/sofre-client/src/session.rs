//! # Order Session
//!
//! One open order being worked on by a cashier: the local line list, the
//! discount lifecycle, and the backend calls that keep the server in step.
//!
//! ## The One Rule: CALL FIRST, MUTATE SECOND
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Session Operation Shape                         │
//! │                                                                     │
//! │   1. reject if another request is in flight (busy guard)            │
//! │   2. validate + rehearse the mutation on a scratch copy             │
//! │   3. persist via OrderBackend            ──── may suspend ────►     │
//! │   4a. success: install the scratch copy                             │
//! │   4b. failure: drop the scratch copy, local state unchanged         │
//! │                                                                     │
//! │   A failed call therefore never leaves the screen showing lines     │
//! │   the server does not have, or vice versa.                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Counter sessions are the exception to step 3 for line edits: the
//! counter flow has no server-side order until [`OrderSession::submit`],
//! so its edits are purely local and go up in one `create_order` call.
//!
//! ## Concurrency
//! A session is single-owner and never shared across threads. The busy
//! guard exists because a UI can still re-enter between await points
//! (double-clicking submit); every suspending operation takes the guard
//! and releases it when the guard drops, which covers success, failure,
//! and a caller abandoning the operation's future mid-await.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sofre_core::{
    compute_totals,
    totals::DiscountConfig,
    validation::{validate_customer_name, validate_customer_phone, validate_payment_method,
        validate_quantity},
    ChannelProfile, DiscountKind, DiscountWorkflow, Money, Order, OrderLine, OrderTotals, Rate,
};
use tracing::{debug, warn};

use crate::backend::{
    CustomerMatch, CustomerUpdate, MenuItem, OrderBackend, Receipt, SessionTarget,
};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Order Session
// =============================================================================

/// One cashier-facing order against a backend.
pub struct OrderSession<B: OrderBackend> {
    backend: B,
    target: SessionTarget,
    profile: ChannelProfile,
    order: Order,
    discounts: DiscountWorkflow,
    customer_name: String,
    customer_phone: String,
    birth_date: Option<String>,
    busy: Arc<AtomicBool>,
}

/// Clears the session's busy flag when dropped.
///
/// Held across the backend await of every suspending operation, so the
/// flag clears even when the operation's future is dropped before it
/// resolves; an abandoned call never leaves the session refusing work.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<B: OrderBackend> OrderSession<B> {
    /// Opens a session for `target` with its channel's default tax profile.
    pub fn new(backend: B, target: SessionTarget) -> Self {
        OrderSession {
            backend,
            target,
            profile: target.channel().default_profile(),
            order: Order::new(),
            discounts: DiscountWorkflow::new(),
            customer_name: String::new(),
            customer_phone: String::new(),
            birth_date: None,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Opens a session honoring the configured site-wide tax override.
    pub fn with_config(backend: B, target: SessionTarget, config: &ClientConfig) -> Self {
        let mut session = Self::new(backend, target);
        if let Some(pct) = config.tax_percent_override {
            session.set_tax_percent(pct);
        }
        session
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn target(&self) -> SessionTarget {
        self.target
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.order.lines
    }

    pub fn profile(&self) -> ChannelProfile {
        self.profile
    }

    pub fn discounts(&self) -> &DiscountWorkflow {
        &self.discounts
    }

    /// True while a backend call is in flight. The UI disables its
    /// controls off this.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Current totals, recomputed from scratch on every call.
    ///
    /// Pure and always available, busy or not: the totals panel refreshes
    /// after every state change without waiting on the network.
    pub fn preview_totals(&self) -> OrderTotals {
        compute_totals(&self.order, self.discount_config(), self.profile.tax_rate, self.profile.rounding)
    }

    fn discount_config(&self) -> DiscountConfig {
        DiscountConfig { amount: self.discounts.amount(), percent: self.discounts.percent() }
    }

    // -------------------------------------------------------------------------
    // Busy Guard
    // -------------------------------------------------------------------------

    /// Takes the busy flag, or refuses when a call is already in flight.
    /// The returned guard releases the flag on drop.
    fn begin_request(&self) -> ClientResult<BusyGuard> {
        if self.busy.swap(true, Ordering::AcqRel) {
            warn!(target = ?self.target, "rejected re-entrant request");
            return Err(ClientError::RequestInFlight);
        }
        Ok(BusyGuard(Arc::clone(&self.busy)))
    }

    // -------------------------------------------------------------------------
    // Line Operations
    // -------------------------------------------------------------------------

    /// Adds `quantity` of a menu item, merging into an existing line.
    ///
    /// The first add freezes the price; later adds for the same item keep
    /// the frozen price even if the menu has moved.
    pub async fn add_item(&mut self, item: &MenuItem, quantity: i64) -> ClientResult<()> {
        validate_quantity(quantity)?;

        // Rehearse locally so cap violations surface before any call.
        let mut next = self.order.clone();
        next.add_or_increment(item.id, &item.name, item.price, quantity)?;

        if self.target.persists_per_line() {
            let _busy = self.begin_request()?;
            self.backend.add_item(self.target, item.id, quantity).await?;
        }

        self.order = next;
        debug!(item_id = item.id, quantity, "line added");
        Ok(())
    }

    /// Sets an existing line to an absolute quantity.
    ///
    /// `quantity ≤ 0` removes the line, matching the decrement button
    /// pressed on a quantity-1 line.
    pub async fn set_line_quantity(&mut self, item_id: i64, quantity: i64) -> ClientResult<()> {
        if quantity <= 0 {
            return self.remove_line(item_id, None).await;
        }

        let mut next = self.order.clone();
        next.set_quantity(item_id, quantity)?;

        if self.target.persists_per_line() {
            let _busy = self.begin_request()?;
            self.backend.update_item_quantity(self.target, item_id, quantity).await?;
        }

        self.order = next;
        debug!(item_id, quantity, "line quantity set");
        Ok(())
    }

    /// Increments an existing line by one.
    pub async fn increment_line(&mut self, item_id: i64) -> ClientResult<()> {
        let current = self
            .order
            .line(item_id)
            .ok_or(sofre_core::CoreError::LineNotFound(item_id))?
            .quantity;
        self.set_line_quantity(item_id, current + 1).await
    }

    /// Decrements an existing line by one; a quantity-1 line is removed.
    pub async fn decrement_line(&mut self, item_id: i64) -> ClientResult<()> {
        let current = self
            .order
            .line(item_id)
            .ok_or(sofre_core::CoreError::LineNotFound(item_id))?
            .quantity;
        self.set_line_quantity(item_id, current - 1).await
    }

    /// Removes a line. `reason` is mandatory server-side once the order
    /// has been submitted to the kitchen; passing `None` before that is
    /// fine.
    pub async fn remove_line(&mut self, item_id: i64, reason: Option<&str>) -> ClientResult<()> {
        if self.order.line(item_id).is_none() {
            // removal of an absent line is a no-op, not an error
            return Ok(());
        }

        if self.target.persists_per_line() {
            let _busy = self.begin_request()?;
            self.backend.remove_item(self.target, item_id, reason).await?;
        }

        self.order.remove(item_id);
        debug!(item_id, "line removed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Customer and Discount
    // -------------------------------------------------------------------------

    /// Sets the customer fields. Local until the next apply or submit.
    pub fn set_customer(&mut self, name: &str, phone: &str) -> ClientResult<()> {
        validate_customer_name(name)?;
        validate_customer_phone(phone)?;
        self.customer_name = name.to_string();
        self.customer_phone = phone.to_string();
        Ok(())
    }

    pub fn set_birth_date(&mut self, birth_date: Option<&str>) {
        self.birth_date = birth_date.map(str::to_string);
    }

    /// Overrides the tax rate for this session, keeping the channel's
    /// rounding. Used by the counter panel's tax field.
    pub fn set_tax_percent(&mut self, percent: u32) {
        self.profile = self.profile.with_tax_rate(Rate::from_bps(percent * 100));
    }

    /// Sets the flat discount. Legal only before the amount component is
    /// applied.
    pub fn set_discount_amount(&mut self, amount: Money) -> ClientResult<()> {
        sofre_core::validation::validate_discount_amount(amount.amount())?;
        self.discounts.set_amount(amount)?;
        Ok(())
    }

    /// Sets the percentage discount. Legal only before the percent
    /// component is applied.
    pub fn set_discount_percent(&mut self, percent: Rate) -> ClientResult<()> {
        self.discounts.set_percent(percent)?;
        Ok(())
    }

    /// Applies one discount component: persists the discount snapshot and
    /// locks the component on success.
    ///
    /// ## Lifecycle
    /// The component moves `NotApplied → Pending` before the call. On
    /// success it commits to `Applied`; on failure it reverts to
    /// `NotApplied` so the cashier can fix the value and retry. At most
    /// one successful apply per component per session.
    pub async fn apply_discount(&mut self, kind: DiscountKind) -> ClientResult<()> {
        if !self.target.persists_per_line() {
            // counter discounts travel with create_order instead
            return Err(ClientError::UnsupportedTarget);
        }

        let _busy = self.begin_request()?;
        self.discounts.begin(kind)?;

        let update = self.customer_update();
        let result = self.backend.update_customer(self.target, &update).await;

        match result {
            Ok(()) => {
                self.discounts.commit(kind)?;
                debug!(?kind, "discount applied");
                Ok(())
            }
            Err(err) => {
                self.discounts.revert(kind)?;
                warn!(?kind, error = %err, "discount apply failed, reverted");
                Err(err)
            }
        }
    }

    /// Persists the customer fields without touching the discount
    /// lifecycle.
    pub async fn save_customer(&mut self) -> ClientResult<()> {
        if !self.target.persists_per_line() {
            return Err(ClientError::UnsupportedTarget);
        }

        let _busy = self.begin_request()?;
        let update = self.customer_update();
        self.backend.update_customer(self.target, &update).await
    }

    /// Snapshot of customer and discount state as the backend stores it.
    fn customer_update(&self) -> CustomerUpdate {
        let config = self.discount_config();
        let combined =
            config.amount + self.order.subtotal().percentage_floor(config.percent);
        CustomerUpdate {
            customer_name: self.customer_name.clone(),
            customer_phone: self.customer_phone.clone(),
            birth_date: self.birth_date.clone(),
            discount: config,
            combined_discount: combined,
        }
    }

    // -------------------------------------------------------------------------
    // Submit and Checkout
    // -------------------------------------------------------------------------

    /// Sends the order up.
    ///
    /// - Table/takeaway: the lines are already persisted, so this marks
    ///   the order submitted to the kitchen and returns `None`
    /// - Counter: the whole order goes up in one `create_order` call; the
    ///   local list clears on success and the receipt comes back
    pub async fn submit(&mut self) -> ClientResult<Option<Receipt>> {
        if self.order.is_empty() {
            return Err(sofre_core::ValidationError::Required { field: "items".to_string() }.into());
        }

        let busy = self.begin_request()?;
        let result = match self.target {
            SessionTarget::Counter => {
                let discount = self.discounts.amount();
                let tax_percent = self.profile.tax_rate.bps() / 100;
                self.backend
                    .create_order(
                        &self.order,
                        &self.customer_name,
                        &self.customer_phone,
                        discount,
                        tax_percent,
                    )
                    .await
                    .map(Some)
            }
            _ => self.backend.submit(self.target, self.birth_date.as_deref()).await.map(|()| None),
        };
        drop(busy);

        let receipt = result?;
        if self.target == SessionTarget::Counter {
            self.order.clear();
            self.discounts = DiscountWorkflow::new();
        }
        debug!(target = ?self.target, "order submitted");
        Ok(receipt)
    }

    /// Settles the order and closes the session's server side.
    pub async fn checkout(&mut self, payment_method: &str) -> ClientResult<Receipt> {
        validate_payment_method(payment_method)?;

        let busy = self.begin_request()?;
        let result = self.backend.checkout(self.target, payment_method).await;
        drop(busy);

        let receipt = result?;
        self.order.clear();
        debug!(target = ?self.target, invoice = %receipt.invoice_number, "order checked out");
        Ok(receipt)
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Menu passthrough. Not guarded: loading the menu does not mutate
    /// order state.
    pub async fn fetch_menu(&self) -> ClientResult<Vec<MenuItem>> {
        self.backend.fetch_menu().await
    }

    /// Customer typeahead passthrough. Not guarded for the same reason.
    pub async fn search_customers(&self, query: &str) -> ClientResult<Vec<CustomerMatch>> {
        self.backend.search_customers(query).await
    }
}

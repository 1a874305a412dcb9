//! Session-level behavior against an in-memory backend.
//!
//! These tests pin the rules the UI depends on:
//! - a failed backend call leaves the local order untouched
//! - discount applies lock on success, revert and stay retryable on failure
//! - counter sessions batch everything into one create call

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::task::{Context, Waker};

use async_trait::async_trait;
use sofre_client::{
    ClientError, ClientResult, CustomerMatch, CustomerUpdate, MenuItem, OrderBackend, OrderSession,
    Receipt, SessionTarget, TakeawayHandle,
};
use sofre_core::{DiscountKind, Money, Order, Rate};

// =============================================================================
// Mock Backend
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    AddItem { item_id: i64, quantity: i64 },
    UpdateItem { item_id: i64, quantity: i64 },
    RemoveItem { item_id: i64, reason: Option<String> },
    UpdateCustomer { discount_amount: i64, discount_percent: f64, combined: i64 },
    CreateOrder { lines: usize, discount: i64, tax_percent: u32 },
    Submit,
    Checkout { payment_method: String },
}

#[derive(Default)]
struct MockInner {
    calls: Mutex<Vec<Call>>,
    fail_next: Mutex<bool>,
    hang_next: Mutex<bool>,
}

#[derive(Clone, Default)]
struct MockBackend {
    inner: Arc<MockInner>,
}

impl MockBackend {
    fn new() -> Self {
        MockBackend::default()
    }

    fn fail_next(&self) {
        *self.inner.fail_next.lock().unwrap() = true;
    }

    fn hang_next(&self) {
        *self.inner.hang_next.lock().unwrap() = true;
    }

    /// Stalls forever when flagged, standing in for a request that never
    /// comes back.
    async fn maybe_hang(&self) {
        let flagged = std::mem::take(&mut *self.inner.hang_next.lock().unwrap());
        if flagged {
            std::future::pending::<()>().await;
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.inner.calls.lock().unwrap().clone()
    }

    /// Consumes the fail flag; a flagged call records nothing.
    fn gate(&self) -> ClientResult<()> {
        let mut fail = self.inner.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(ClientError::Backend { message: "injected failure".to_string() });
        }
        Ok(())
    }

    fn record(&self, call: Call) {
        self.inner.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl OrderBackend for MockBackend {
    async fn fetch_menu(&self) -> ClientResult<Vec<MenuItem>> {
        self.gate()?;
        Ok(vec![kebab(), doogh()])
    }

    async fn create_takeaway(
        &self,
        _customer_name: &str,
        _customer_phone: &str,
    ) -> ClientResult<TakeawayHandle> {
        self.gate()?;
        Ok(TakeawayHandle { order_id: 1, invoice_number: "T-0001".to_string() })
    }

    async fn add_item(
        &self,
        _target: SessionTarget,
        item_id: i64,
        quantity: i64,
    ) -> ClientResult<()> {
        self.maybe_hang().await;
        self.gate()?;
        self.record(Call::AddItem { item_id, quantity });
        Ok(())
    }

    async fn update_item_quantity(
        &self,
        _target: SessionTarget,
        item_id: i64,
        quantity: i64,
    ) -> ClientResult<()> {
        self.gate()?;
        self.record(Call::UpdateItem { item_id, quantity });
        Ok(())
    }

    async fn remove_item(
        &self,
        _target: SessionTarget,
        item_id: i64,
        reason: Option<&str>,
    ) -> ClientResult<()> {
        self.gate()?;
        self.record(Call::RemoveItem { item_id, reason: reason.map(str::to_string) });
        Ok(())
    }

    async fn update_customer(
        &self,
        _target: SessionTarget,
        update: &CustomerUpdate,
    ) -> ClientResult<()> {
        self.gate()?;
        self.record(Call::UpdateCustomer {
            discount_amount: update.discount.amount.amount(),
            discount_percent: update.discount.percent.percent(),
            combined: update.combined_discount.amount(),
        });
        Ok(())
    }

    async fn create_order(
        &self,
        order: &Order,
        _customer_name: &str,
        _customer_phone: &str,
        discount: Money,
        tax_percent: u32,
    ) -> ClientResult<Receipt> {
        self.gate()?;
        self.record(Call::CreateOrder {
            lines: order.line_count(),
            discount: discount.amount(),
            tax_percent,
        });
        Ok(Receipt { invoice_number: "C-0042".to_string(), order_id: Some(42) })
    }

    async fn submit(&self, _target: SessionTarget, _birth_date: Option<&str>) -> ClientResult<()> {
        self.gate()?;
        self.record(Call::Submit);
        Ok(())
    }

    async fn checkout(
        &self,
        _target: SessionTarget,
        payment_method: &str,
    ) -> ClientResult<Receipt> {
        self.gate()?;
        self.record(Call::Checkout { payment_method: payment_method.to_string() });
        Ok(Receipt { invoice_number: "F-1403".to_string(), order_id: None })
    }

    async fn search_customers(&self, _query: &str) -> ClientResult<Vec<CustomerMatch>> {
        self.gate()?;
        Ok(vec![CustomerMatch { name: "Ali".to_string(), phone: Some("09120000000".to_string()) }])
    }
}

fn kebab() -> MenuItem {
    MenuItem { id: 1, name: "Chelo Kebab".to_string(), price: Money::new(50_000), stock: 10 }
}

fn doogh() -> MenuItem {
    MenuItem { id: 2, name: "Doogh".to_string(), price: Money::new(30_000), stock: 50 }
}

fn table_session(backend: &MockBackend) -> OrderSession<MockBackend> {
    OrderSession::new(backend.clone(), SessionTarget::Table(4))
}

// =============================================================================
// Line Operations
// =============================================================================

#[tokio::test]
async fn add_item_persists_then_mutates() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);

    session.add_item(&kebab(), 2).await.unwrap();
    session.add_item(&kebab(), 1).await.unwrap();

    assert_eq!(
        backend.calls(),
        vec![
            Call::AddItem { item_id: 1, quantity: 2 },
            Call::AddItem { item_id: 1, quantity: 1 },
        ]
    );
    // merged into one line locally
    assert_eq!(session.lines().len(), 1);
    assert_eq!(session.lines()[0].quantity, 3);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn failed_add_leaves_order_unchanged() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);
    session.add_item(&kebab(), 2).await.unwrap();

    backend.fail_next();
    let err = session.add_item(&doogh(), 1).await.unwrap_err();
    assert!(matches!(err, ClientError::Backend { .. }));

    // the refused line never appeared locally
    assert_eq!(session.lines().len(), 1);
    assert_eq!(session.order().subtotal().amount(), 100_000);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn counter_line_edits_stay_local() {
    let backend = MockBackend::new();
    let mut session = OrderSession::new(backend.clone(), SessionTarget::Counter);

    session.add_item(&kebab(), 2).await.unwrap();
    session.add_item(&doogh(), 1).await.unwrap();
    session.set_line_quantity(2, 4).await.unwrap();
    session.remove_line(2, None).await.unwrap();

    assert!(backend.calls().is_empty());
    assert_eq!(session.lines().len(), 1);
}

#[tokio::test]
async fn decrement_at_one_removes_the_line() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);
    session.add_item(&kebab(), 1).await.unwrap();

    session.decrement_line(1).await.unwrap();

    assert!(session.order().is_empty());
    assert_eq!(
        backend.calls()[1],
        Call::RemoveItem { item_id: 1, reason: None }
    );
}

#[tokio::test]
async fn remove_absent_line_makes_no_call() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);

    session.remove_line(99, None).await.unwrap();
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn removal_reason_reaches_backend() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);
    session.add_item(&kebab(), 1).await.unwrap();

    session.remove_line(1, Some("customer changed mind")).await.unwrap();
    assert_eq!(
        backend.calls()[1],
        Call::RemoveItem { item_id: 1, reason: Some("customer changed mind".to_string()) }
    );
}

// =============================================================================
// Discount Lifecycle
// =============================================================================

#[tokio::test]
async fn discount_apply_persists_snapshot_and_locks() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);
    session.add_item(&kebab(), 2).await.unwrap();
    session.add_item(&doogh(), 1).await.unwrap();

    session.set_discount_amount(Money::new(10_000)).unwrap();
    session.set_discount_percent(Rate::from_percent(5.0)).unwrap();
    session.apply_discount(DiscountKind::Percent).await.unwrap();

    // combined = 10_000 + floor(130_000 * 5%)
    assert_eq!(
        backend.calls()[2],
        Call::UpdateCustomer { discount_amount: 10_000, discount_percent: 5.0, combined: 16_500 }
    );

    // the applied component is locked now
    assert!(session.set_discount_percent(Rate::from_percent(9.0)).is_err());
    // the other component is still editable
    session.set_discount_amount(Money::new(20_000)).unwrap();
}

#[tokio::test]
async fn failed_apply_reverts_and_is_retryable() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);
    session.add_item(&kebab(), 2).await.unwrap();
    session.set_discount_amount(Money::new(5_000)).unwrap();

    backend.fail_next();
    let err = session.apply_discount(DiscountKind::Amount).await.unwrap_err();
    assert!(matches!(err, ClientError::Backend { .. }));
    assert!(!session.is_busy());

    // still editable, and a second attempt goes through
    session.set_discount_amount(Money::new(7_000)).unwrap();
    session.apply_discount(DiscountKind::Amount).await.unwrap();
    assert_eq!(
        backend.calls()[1],
        Call::UpdateCustomer { discount_amount: 7_000, discount_percent: 0.0, combined: 7_000 }
    );
}

#[tokio::test]
async fn second_successful_apply_is_rejected() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);
    session.add_item(&kebab(), 1).await.unwrap();
    session.set_discount_amount(Money::new(5_000)).unwrap();

    session.apply_discount(DiscountKind::Amount).await.unwrap();
    let err = session.apply_discount(DiscountKind::Amount).await.unwrap_err();
    assert!(matches!(err, ClientError::Core(_)));

    // only one UpdateCustomer went out
    let updates = backend
        .calls()
        .iter()
        .filter(|c| matches!(c, Call::UpdateCustomer { .. }))
        .count();
    assert_eq!(updates, 1);
}

#[tokio::test]
async fn counter_session_has_no_discount_apply() {
    let backend = MockBackend::new();
    let mut session = OrderSession::new(backend.clone(), SessionTarget::Counter);
    session.set_discount_amount(Money::new(5_000)).unwrap();

    let err = session.apply_discount(DiscountKind::Amount).await.unwrap_err();
    assert!(matches!(err, ClientError::UnsupportedTarget));
}

// =============================================================================
// Totals Preview
// =============================================================================

#[tokio::test]
async fn preview_totals_tracks_every_mutation() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);
    session.add_item(&kebab(), 2).await.unwrap();
    session.add_item(&doogh(), 1).await.unwrap();
    session.set_discount_amount(Money::new(10_000)).unwrap();
    session.set_discount_percent(Rate::from_percent(5.0)).unwrap();

    // table profile: 9% tax, half-up
    let totals = session.preview_totals();
    assert_eq!(totals.subtotal.amount(), 130_000);
    assert_eq!(totals.total_discount.amount(), 16_500);
    assert_eq!(totals.tax.amount(), 10_215);
    assert_eq!(totals.final_amount.amount(), 123_715);
}

#[tokio::test]
async fn takeaway_profile_floors_tax() {
    let backend = MockBackend::new();
    let mut session = OrderSession::new(backend.clone(), SessionTarget::Takeaway(17));
    session.add_item(&kebab(), 2).await.unwrap();
    session.add_item(&doogh(), 1).await.unwrap();
    session.set_discount_amount(Money::new(10_000)).unwrap();
    session.set_discount_percent(Rate::from_percent(5.0)).unwrap();

    // takeaway profile: 12% tax, floor
    let totals = session.preview_totals();
    assert_eq!(totals.tax.amount(), 13_620);
    assert_eq!(totals.final_amount.amount(), 127_120);
}

#[tokio::test]
async fn configured_tax_override_applies_to_new_sessions() {
    let backend = MockBackend::new();
    let config = sofre_client::ClientConfig {
        tax_percent_override: Some(5),
        ..sofre_client::ClientConfig::default()
    };
    let mut session =
        OrderSession::with_config(backend.clone(), SessionTarget::Table(4), &config);
    session.add_item(&kebab(), 2).await.unwrap();

    // 100_000 * 5% half-up = 5_000, overriding the table default of 9%
    let totals = session.preview_totals();
    assert_eq!(totals.tax.amount(), 5_000);
}

#[tokio::test]
async fn oversized_discount_previews_negative() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);
    session
        .add_item(
            &MenuItem { id: 9, name: "Tea".to_string(), price: Money::new(1_000), stock: 1 },
            1,
        )
        .await
        .unwrap();
    session.set_discount_amount(Money::new(5_000)).unwrap();

    let totals = session.preview_totals();
    assert_eq!(totals.tax_base.amount(), -4_000);
    assert!(totals.final_amount.is_negative());
}

// =============================================================================
// Submit and Checkout
// =============================================================================

#[tokio::test]
async fn takeaway_opens_against_created_order() {
    let backend = MockBackend::new();
    let handle = backend.create_takeaway("Ali", "09120000000").await.unwrap();
    assert_eq!(handle.invoice_number, "T-0001");

    let mut session =
        OrderSession::new(backend.clone(), SessionTarget::Takeaway(handle.order_id));
    session.add_item(&kebab(), 1).await.unwrap();
    assert_eq!(backend.calls(), vec![Call::AddItem { item_id: 1, quantity: 1 }]);
}

#[tokio::test]
async fn counter_submit_batches_and_clears() {
    let backend = MockBackend::new();
    let mut session = OrderSession::new(backend.clone(), SessionTarget::Counter);
    session.add_item(&kebab(), 2).await.unwrap();
    session.add_item(&doogh(), 1).await.unwrap();
    session.set_discount_amount(Money::new(10_000)).unwrap();
    session.set_tax_percent(12);

    let receipt = session.submit().await.unwrap().unwrap();
    assert_eq!(receipt.invoice_number, "C-0042");

    assert_eq!(
        backend.calls(),
        vec![Call::CreateOrder { lines: 2, discount: 10_000, tax_percent: 12 }]
    );
    assert!(session.order().is_empty());
    // the next order starts with a fresh discount lifecycle
    session.set_discount_amount(Money::new(1)).unwrap();
}

#[tokio::test]
async fn table_submit_marks_kitchen() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);
    session.add_item(&kebab(), 1).await.unwrap();

    let receipt = session.submit().await.unwrap();
    assert!(receipt.is_none());
    assert_eq!(backend.calls()[1], Call::Submit);
    // table lines stay; the order lives on until checkout
    assert_eq!(session.lines().len(), 1);
}

#[tokio::test]
async fn submit_empty_order_is_rejected() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);

    let err = session.submit().await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn checkout_returns_receipt_and_closes() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);
    session.add_item(&kebab(), 1).await.unwrap();

    let receipt = session.checkout("card").await.unwrap();
    assert_eq!(receipt.invoice_number, "F-1403");
    assert_eq!(backend.calls()[1], Call::Checkout { payment_method: "card".to_string() });
    assert!(session.order().is_empty());
}

#[tokio::test]
async fn checkout_requires_payment_method() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);
    session.add_item(&kebab(), 1).await.unwrap();

    let err = session.checkout("").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    // no call went out and the order is still open
    assert_eq!(backend.calls().len(), 1);
    assert_eq!(session.lines().len(), 1);
}

#[tokio::test]
async fn failed_checkout_keeps_order_open() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);
    session.add_item(&kebab(), 1).await.unwrap();

    backend.fail_next();
    assert!(session.checkout("card").await.is_err());
    assert_eq!(session.lines().len(), 1);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn abandoned_call_releases_the_busy_flag() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);

    backend.hang_next();
    {
        let item = kebab();
        let mut stalled = Box::pin(session.add_item(&item, 1));
        let mut cx = Context::from_waker(Waker::noop());
        assert!(stalled.as_mut().poll(&mut cx).is_pending());
    }

    // dropping the stalled call must hand the session back
    assert!(!session.is_busy());
    session.add_item(&kebab(), 1).await.unwrap();
    assert_eq!(session.lines()[0].quantity, 1);
}

#[tokio::test]
async fn operation_while_call_in_flight_is_rejected() {
    let backend = MockBackend::new();
    let mut session = table_session(&backend);

    backend.hang_next();
    let item = kebab();
    let mut in_flight = Box::pin(session.add_item(&item, 1));
    let mut cx = Context::from_waker(Waker::noop());
    assert!(in_flight.as_mut().poll(&mut cx).is_pending());
    // leak the stalled call so its guard never releases
    std::mem::forget(in_flight);

    assert!(session.is_busy());
    let err = session.add_item(&doogh(), 1).await.unwrap_err();
    assert!(matches!(err, ClientError::RequestInFlight));
    let err = session.checkout("card").await.unwrap_err();
    assert!(matches!(err, ClientError::RequestInFlight));
}

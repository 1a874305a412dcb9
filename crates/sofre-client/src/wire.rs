//! # Wire Types
//!
//! Request and response bodies for the restaurant backend.
//!
//! The backend's JSON contract is snake_case and slightly irregular (the
//! legacy `discount` field carries the combined total next to the split
//! `discount_amount`/`discount_percent` pair), so these types are kept
//! separate from the core domain types and never leak past the REST layer.
//!
//! ## Route Map
//! ```text
//! ┌────────────────────────────────────┬─────────┬──────────────────────────┐
//! │ Route                              │ Method  │ Body                     │
//! ├────────────────────────────────────┼─────────┼──────────────────────────┤
//! │ /api/menu                          │ GET     │ -                        │
//! │ /orders/create                     │ POST    │ CreateOrderRequest       │
//! │ /takeaway/create                   │ POST    │ CreateTakeawayRequest    │
//! │ /{target}/add_item                 │ POST    │ AddItemRequest           │
//! │ /{target}/update_item/{item}       │ PUT     │ UpdateItemRequest        │
//! │ /{target}/remove_item/{item}       │ DELETE  │ RemoveItemRequest        │
//! │ /table/{n}/update_customer         │ PUT     │ CustomerUpdateRequest    │
//! │ /takeaway/{n}/update               │ PUT     │ CustomerUpdateRequest    │
//! │ /{target}/submit                   │ POST    │ SubmitRequest            │
//! │ /{target}/checkout                 │ POST    │ CheckoutRequest          │
//! │ /customer/search?q=                │ GET     │ -                        │
//! └────────────────────────────────────┴─────────┴──────────────────────────┘
//! ```
//! where `{target}` is `table/{n}` or `takeaway/{n}`.

use serde::{Deserialize, Serialize};
use sofre_core::{Money, Order, OrderLine};

// =============================================================================
// Request Bodies
// =============================================================================

/// Body for `POST /{target}/add_item`.
#[derive(Debug, Clone, Serialize)]
pub struct AddItemRequest {
    pub menu_item_id: i64,
    pub quantity: i64,
}

/// Body for `PUT /{target}/update_item/{item}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateItemRequest {
    pub quantity: i64,
}

/// Body for `DELETE /{target}/remove_item/{item}`.
///
/// The backend requires a reason once an order has been submitted to the
/// kitchen; before that the field may be omitted.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveItemRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removal_reason: Option<String>,
}

/// Body for `PUT /table/{n}/update_customer` and `PUT /takeaway/{n}/update`.
///
/// `discount` duplicates `discount_amount + floor(subtotal × percent/100)`
/// for older backend code paths that only read the combined field.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerUpdateRequest {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    pub discount: i64,
    pub discount_amount: i64,
    pub discount_percent: f64,
}

/// One line of a counter order as the backend expects it.
#[derive(Debug, Clone, Serialize)]
pub struct WireOrderItem {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub quantity: i64,
}

impl From<&OrderLine> for WireOrderItem {
    fn from(line: &OrderLine) -> Self {
        WireOrderItem {
            id: line.item_id,
            name: line.name.clone(),
            price: line.unit_price.amount(),
            quantity: line.quantity,
        }
    }
}

/// Body for `POST /orders/create` (counter orders submit in one shot).
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<WireOrderItem>,
    /// Flat discount in Toman; the counter panel has no percent field.
    pub discount: i64,
    /// Whole percent, as typed by the cashier.
    pub tax_percent: u32,
}

impl CreateOrderRequest {
    /// Builds the request from an order plus the form fields around it.
    pub fn from_order(
        order: &Order,
        customer_name: &str,
        customer_phone: &str,
        discount: Money,
        tax_percent: u32,
    ) -> Self {
        CreateOrderRequest {
            customer_name: customer_name.to_string(),
            customer_phone: customer_phone.to_string(),
            items: order.lines.iter().map(WireOrderItem::from).collect(),
            discount: discount.amount(),
            tax_percent,
        }
    }
}

/// Body for `POST /takeaway/create`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTakeawayRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub discount: i64,
}

/// Body for `POST /{target}/submit`.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

/// Body for `POST /{target}/checkout`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    pub payment_method: String,
}

// =============================================================================
// Response Bodies
// =============================================================================

/// The backend's uniform response envelope.
///
/// Every mutating route answers with at least `success`; the other fields
/// show up depending on the route (`invoice_number`/`order_id` on create
/// and checkout, `requires_reason` on a refused remove).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub requires_reason: Option<bool>,
}

/// One menu entry from `GET /api/menu`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireMenuItem {
    pub id: i64,
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub stock: i64,
}

/// Response of `GET /api/menu`.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuResponse {
    pub success: bool,
    #[serde(default)]
    pub items: Vec<WireMenuItem>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One hit from `GET /customer/search` (the route returns a bare array).
#[derive(Debug, Clone, Deserialize)]
pub struct WireCustomer {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

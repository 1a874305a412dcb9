//! # REST Backend
//!
//! [`OrderBackend`] implementation over the restaurant backend's HTTP API.
//!
//! ## Behavior
//! - Non-2xx statuses become [`ClientError::Http`]
//! - 2xx bodies with `success: false` become [`ClientError::Backend`] with
//!   the server's message, because the backend reports business refusals
//!   (out of stock, removal needs a reason) that way rather than with
//!   status codes
//! - Counter targets reject line-edit calls: the counter flow has no
//!   server-side order until `create_order`

use reqwest::Client;
use tracing::debug;

use async_trait::async_trait;
use sofre_core::{Money, Order};

use crate::backend::{
    CustomerMatch, CustomerUpdate, MenuItem, OrderBackend, Receipt, SessionTarget, TakeawayHandle,
};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::wire::{
    AddItemRequest, ApiEnvelope, CheckoutRequest, CreateOrderRequest, CreateTakeawayRequest,
    CustomerUpdateRequest, MenuResponse, RemoveItemRequest, SubmitRequest, UpdateItemRequest,
    WireCustomer,
};

// =============================================================================
// Rest Backend
// =============================================================================

/// HTTP client for the restaurant backend.
pub struct RestBackend {
    http: Client,
    base_url: String,
}

impl RestBackend {
    /// Builds a backend from configuration.
    ///
    /// Fails only if the TLS stack cannot initialize, which is a startup
    /// problem rather than a per-request one.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(RestBackend { http, base_url: config.base_url.clone() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Path prefix for a per-line target, or `UnsupportedTarget` for the
    /// counter.
    fn target_prefix(target: SessionTarget) -> ClientResult<String> {
        match target {
            SessionTarget::Table(id) => Ok(format!("/table/{id}")),
            SessionTarget::Takeaway(id) => Ok(format!("/takeaway/{id}")),
            SessionTarget::Counter => Err(ClientError::UnsupportedTarget),
        }
    }

    /// Parses an envelope response and maps `success: false` to
    /// [`ClientError::Backend`].
    async fn read_envelope(response: reqwest::Response) -> ClientResult<ApiEnvelope> {
        let response = response.error_for_status()?;
        let envelope: ApiEnvelope = response.json().await?;
        if envelope.success {
            Ok(envelope)
        } else {
            Err(ClientError::Backend {
                message: envelope.message.unwrap_or_else(|| "unknown backend error".to_string()),
            })
        }
    }

    fn receipt_from(envelope: ApiEnvelope) -> ClientResult<Receipt> {
        let invoice_number = envelope
            .invoice_number
            .ok_or_else(|| ClientError::UnexpectedResponse("missing invoice_number".to_string()))?;
        Ok(Receipt { invoice_number, order_id: envelope.order_id })
    }
}

#[async_trait]
impl OrderBackend for RestBackend {
    async fn fetch_menu(&self) -> ClientResult<Vec<MenuItem>> {
        debug!("fetching menu");

        let response = self.http.get(self.url("/api/menu")).send().await?.error_for_status()?;
        let body: MenuResponse = response.json().await?;
        if !body.success {
            return Err(ClientError::Backend {
                message: body.message.unwrap_or_else(|| "menu unavailable".to_string()),
            });
        }

        Ok(body
            .items
            .into_iter()
            .map(|item| MenuItem {
                id: item.id,
                name: item.name,
                price: Money::new(item.price),
                stock: item.stock,
            })
            .collect())
    }

    async fn create_takeaway(
        &self,
        customer_name: &str,
        customer_phone: &str,
    ) -> ClientResult<TakeawayHandle> {
        debug!(customer_name, "creating takeaway order");

        let body = CreateTakeawayRequest {
            customer_name: customer_name.to_string(),
            customer_phone: customer_phone.to_string(),
            discount: 0,
        };
        let response = self.http.post(self.url("/takeaway/create")).json(&body).send().await?;
        let envelope = Self::read_envelope(response).await?;

        let order_id = envelope
            .order_id
            .ok_or_else(|| ClientError::UnexpectedResponse("missing order_id".to_string()))?;
        let invoice_number = envelope
            .invoice_number
            .ok_or_else(|| ClientError::UnexpectedResponse("missing invoice_number".to_string()))?;
        Ok(TakeawayHandle { order_id, invoice_number })
    }

    async fn add_item(
        &self,
        target: SessionTarget,
        item_id: i64,
        quantity: i64,
    ) -> ClientResult<()> {
        debug!(?target, item_id, quantity, "adding item");

        let prefix = Self::target_prefix(target)?;
        let body = AddItemRequest { menu_item_id: item_id, quantity };
        let response =
            self.http.post(self.url(&format!("{prefix}/add_item"))).json(&body).send().await?;
        Self::read_envelope(response).await?;
        Ok(())
    }

    async fn update_item_quantity(
        &self,
        target: SessionTarget,
        item_id: i64,
        quantity: i64,
    ) -> ClientResult<()> {
        debug!(?target, item_id, quantity, "updating item quantity");

        let prefix = Self::target_prefix(target)?;
        let body = UpdateItemRequest { quantity };
        let response = self
            .http
            .put(self.url(&format!("{prefix}/update_item/{item_id}")))
            .json(&body)
            .send()
            .await?;
        Self::read_envelope(response).await?;
        Ok(())
    }

    async fn remove_item(
        &self,
        target: SessionTarget,
        item_id: i64,
        reason: Option<&str>,
    ) -> ClientResult<()> {
        debug!(?target, item_id, "removing item");

        let prefix = Self::target_prefix(target)?;
        let body = RemoveItemRequest { removal_reason: reason.map(str::to_string) };
        let response = self
            .http
            .delete(self.url(&format!("{prefix}/remove_item/{item_id}")))
            .json(&body)
            .send()
            .await?;
        Self::read_envelope(response).await?;
        Ok(())
    }

    async fn update_customer(
        &self,
        target: SessionTarget,
        update: &CustomerUpdate,
    ) -> ClientResult<()> {
        debug!(?target, "updating customer and discount");

        // The two channels expose the same update under different paths.
        let path = match target {
            SessionTarget::Table(id) => format!("/table/{id}/update_customer"),
            SessionTarget::Takeaway(id) => format!("/takeaway/{id}/update"),
            SessionTarget::Counter => return Err(ClientError::UnsupportedTarget),
        };

        let body = CustomerUpdateRequest {
            customer_name: update.customer_name.clone(),
            customer_phone: update.customer_phone.clone(),
            birth_date: update.birth_date.clone(),
            discount: update.combined_discount.amount(),
            discount_amount: update.discount.amount.amount(),
            discount_percent: update.discount.percent.percent(),
        };
        let response = self.http.put(self.url(&path)).json(&body).send().await?;
        Self::read_envelope(response).await?;
        Ok(())
    }

    async fn create_order(
        &self,
        order: &Order,
        customer_name: &str,
        customer_phone: &str,
        discount: Money,
        tax_percent: u32,
    ) -> ClientResult<Receipt> {
        debug!(lines = order.line_count(), "creating counter order");

        let body =
            CreateOrderRequest::from_order(order, customer_name, customer_phone, discount, tax_percent);
        let response = self.http.post(self.url("/orders/create")).json(&body).send().await?;
        let envelope = Self::read_envelope(response).await?;

        // Older backend builds answer create without an invoice number.
        Ok(Receipt {
            invoice_number: envelope.invoice_number.unwrap_or_default(),
            order_id: envelope.order_id,
        })
    }

    async fn submit(&self, target: SessionTarget, birth_date: Option<&str>) -> ClientResult<()> {
        debug!(?target, "submitting order to kitchen");

        let prefix = Self::target_prefix(target)?;
        let body = SubmitRequest { birth_date: birth_date.map(str::to_string) };
        let response =
            self.http.post(self.url(&format!("{prefix}/submit"))).json(&body).send().await?;
        Self::read_envelope(response).await?;
        Ok(())
    }

    async fn checkout(
        &self,
        target: SessionTarget,
        payment_method: &str,
    ) -> ClientResult<Receipt> {
        debug!(?target, payment_method, "checking out order");

        let prefix = Self::target_prefix(target)?;
        let body = CheckoutRequest { payment_method: payment_method.to_string() };
        let response =
            self.http.post(self.url(&format!("{prefix}/checkout"))).json(&body).send().await?;
        let envelope = Self::read_envelope(response).await?;
        Self::receipt_from(envelope)
    }

    async fn search_customers(&self, query: &str) -> ClientResult<Vec<CustomerMatch>> {
        debug!(query, "searching customers");

        let response = self
            .http
            .get(self.url("/customer/search"))
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?;
        // This route answers with a bare array, not the envelope.
        let hits: Vec<WireCustomer> = response.json().await?;
        Ok(hits.into_iter().map(|c| CustomerMatch { name: c.name, phone: c.phone }).collect())
    }
}

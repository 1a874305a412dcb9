//! # sofre-client: Session and REST Layer for Sofre POS
//!
//! This crate connects the pure engine in `sofre-core` to the restaurant
//! backend. It owns the session lifecycle (one open order per counter
//! panel, table modal, or takeaway modal) and the HTTP plumbing.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sofre POS Client Layer                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI (excluded from this crate)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sofre-client (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   OrderSession ──uses──► OrderBackend (trait)                   │   │
//! │  │        │                      │                                 │   │
//! │  │        │ totals via           │ implemented by                  │   │
//! │  │        ▼ sofre-core           ▼                                 │   │
//! │  │   compute_totals         RestBackend (reqwest)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP (snake_case JSON)                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Restaurant Backend                           │   │
//! │  │    /api/menu  /orders/create  /table/{n}/*  /takeaway/{n}/*    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`session`] - OrderSession: call-first mutation, discount lifecycle, busy guard
//! - [`backend`] - OrderBackend trait and its data types
//! - [`rest`] - reqwest implementation of OrderBackend
//! - [`wire`] - snake_case request/response bodies
//! - [`config`] - ClientConfig from `SOFRE_*` environment variables
//! - [`error`] - ClientError

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod config;
pub mod error;
pub mod rest;
pub mod session;
pub mod wire;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use backend::{
    CustomerMatch, CustomerUpdate, MenuItem, OrderBackend, Receipt, SessionTarget, TakeawayHandle,
};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use rest::RestBackend;
pub use session::OrderSession;

//! # Client Error Types
//!
//! Errors surfaced by the session and REST layers.
//!
//! ## Error Strategy
//! - Domain failures from `sofre-core` pass through as [`ClientError::Core`]
//! - Transport failures wrap `reqwest::Error`
//! - A backend that answered but refused (`success: false`) becomes
//!   [`ClientError::Backend`] with the server's message, so the UI can show
//!   it verbatim
//! - [`ClientError::RequestInFlight`] is the uniform busy signal; the
//!   session never queues a second call behind a pending one

use sofre_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Domain rule violation from the core engine.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input rejected before any call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A previous operation on this session has not finished yet.
    #[error("a request is already in flight for this session")]
    RequestInFlight,

    /// Transport-level failure (connection, timeout, TLS, bad status).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with `success: false`.
    #[error("backend rejected the request: {message}")]
    Backend { message: String },

    /// The backend answered 2xx but the body did not match the expected
    /// shape (missing invoice number on checkout, unparseable JSON, ...).
    #[error("unexpected backend response: {0}")]
    UnexpectedResponse(String),

    /// Operation not available for this session's target (e.g. customer
    /// update on a counter session).
    #[error("operation not supported for this order target")]
    UnsupportedTarget,
}

/// Convenience alias used across the crate.
pub type ClientResult<T> = Result<T, ClientError>;

//! Ports-and-adapters infrastructure
//!
//! The domain layer talks to Stripe through a gateway port trait defined in
//! `domain_account`; adapters (the live HTTP client, the in-memory mock)
//! implement it. This module holds the pieces shared by every adapter: the
//! gateway error type with its transient/terminal classification, and the
//! marker trait all ports extend.

use thiserror::Error;

/// Error type for gateway operations
///
/// Adapters map transport- and provider-level failures onto these variants.
/// The sync layer retries variants classified as transient and converts
/// everything else into the caller-facing error vocabulary.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Stripe returned `rate_limit`
    #[error("rate limited")]
    RateLimited,

    /// Stripe returned `lock_timeout` (another request holds the object)
    #[error("lock timeout")]
    LockTimeout,

    /// Stripe returned `idempotency_key_in_use`
    #[error("idempotency key in use")]
    IdempotencyKeyInUse,

    /// The connection failed before a response was received
    #[error("connection error: {message}")]
    Connection { message: String },

    /// A generic provider-side API error
    #[error("api error: {message}")]
    Api { message: String },

    /// The request was rejected as invalid; `param` carries Stripe's
    /// bracket-path parameter when present (e.g. `company[address][city]`)
    #[error("invalid request: {message}")]
    InvalidRequest {
        param: Option<String>,
        message: String,
    },

    /// Authentication against the API failed
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// The referenced object does not exist upstream
    #[error("not found: {entity}")]
    NotFound { entity: String },
}

impl GatewayError {
    /// Creates a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        GatewayError::Connection { message: message.into() }
    }

    /// Creates a generic API error
    pub fn api(message: impl Into<String>) -> Self {
        GatewayError::Api { message: message.into() }
    }

    /// Creates an invalid-request error with a bracket-path parameter
    pub fn invalid_request(param: Option<String>, message: impl Into<String>) -> Self {
        GatewayError::InvalidRequest { param, message: message.into() }
    }

    /// Creates a not-found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        GatewayError::NotFound { entity: entity.into() }
    }

    /// True if a retry may succeed: rate limits, lock timeouts, idempotency
    /// collisions, connection failures, and generic API errors
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayError::RateLimited
                | GatewayError::LockTimeout
                | GatewayError::IdempotencyKeyInUse
                | GatewayError::Connection { .. }
                | GatewayError::Api { .. }
        )
    }
}

/// Marker trait for all domain ports
///
/// Port traits extend this marker so implementations are thread-safe and
/// usable behind `Arc<dyn ...>` in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

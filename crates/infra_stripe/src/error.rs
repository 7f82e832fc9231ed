//! Stripe API error payloads
//!
//! Stripe reports failures as a JSON `error` object carrying `type`,
//! `code`, `message`, and - for validation failures - the bracket-path
//! `param` naming the offending attribute. This module deserializes that
//! payload and classifies it onto [`GatewayError`].

use serde::Deserialize;

use core_kernel::GatewayError;

/// The `error` object inside a Stripe failure response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StripeApiError {
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
}

/// Wrapper matching the response body shape `{"error": {...}}`
#[derive(Debug, Deserialize)]
pub struct StripeErrorEnvelope {
    pub error: StripeApiError,
}

impl StripeApiError {
    /// Classifies the payload onto the gateway error taxonomy
    pub fn into_gateway_error(self) -> GatewayError {
        let message = self.message.clone().unwrap_or_default();
        match self.code.as_deref() {
            Some("lock_timeout") => return GatewayError::LockTimeout,
            Some("rate_limit") => return GatewayError::RateLimited,
            Some("idempotency_key_in_use") => return GatewayError::IdempotencyKeyInUse,
            Some("resource_missing") => {
                return GatewayError::not_found(self.param.unwrap_or(message))
            }
            _ => {}
        }
        match self.error_type.as_deref() {
            Some("rate_limit_error") => GatewayError::RateLimited,
            Some("idempotency_error") => GatewayError::IdempotencyKeyInUse,
            Some("invalid_request_error") => GatewayError::invalid_request(self.param, message),
            Some("api_connection_error") => GatewayError::connection(message),
            Some("authentication_error") => GatewayError::Unauthorized { message },
            _ => GatewayError::api(message),
        }
    }
}

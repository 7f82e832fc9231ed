//! Stripe configuration
//!
//! All Stripe-facing settings are read once at process start and passed by
//! dependency injection to the components that need them. Nothing in this
//! workspace reads the environment after startup.
//!
//! Consumed variables:
//!
//! | Variable                          | Meaning                                |
//! |-----------------------------------|----------------------------------------|
//! | `STRIPE_KEY`                      | Secret API key                         |
//! | `STRIPE_PUBLISHABLE_KEY`          | Client-side publishable key            |
//! | `STRIPE_WEBHOOK_ENDPOINT_SECRET`  | Webhook signing secret (required)      |
//! | `STRIPE_API_VERSION`              | Pinned API version                     |
//! | `MAXIMUM_STRIPE_RETRIES`          | Retry cap for transient API errors     |
//! | `STRIPE_JS`                       | Client SDK toggle: `false` or `3`      |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default API version pinned when `STRIPE_API_VERSION` is unset
pub const DEFAULT_API_VERSION: &str = "2020-08-27";

/// Default retry cap when `MAXIMUM_STRIPE_RETRIES` is unset
pub const DEFAULT_MAXIMUM_RETRIES: u32 = 10;

/// Errors raised while assembling the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The webhook signing secret is mandatory; the process must refuse to
    /// start without it
    #[error("STRIPE_WEBHOOK_ENDPOINT_SECRET is required")]
    MissingWebhookSecret,

    /// A required variable is absent
    #[error("missing configuration value: {0}")]
    Missing(String),

    /// A variable is present but unparseable
    #[error("invalid configuration value for {name}: {value}")]
    Invalid { name: String, value: String },

    /// Error from the underlying configuration loader
    #[error("configuration error: {0}")]
    Loader(#[from] config::ConfigError),
}

/// Client-side SDK toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StripeJs {
    /// Forms post directly to this system; no client-side tokenization
    Off,
    /// Stripe.js v3 tokenizes fields in the browser
    V3,
}

impl StripeJs {
    fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "" | "false" => Some(StripeJs::Off),
            "3" => Some(StripeJs::V3),
            _ => None,
        }
    }
}

/// Stripe-facing settings, constructed once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeConfig {
    /// Secret API key used for all server-side calls
    pub secret_key: String,
    /// Publishable key exposed to client-side tokenization
    pub publishable_key: String,
    /// Webhook signing secret; construction fails without it
    pub webhook_endpoint_secret: String,
    /// API version pinned on every request
    pub api_version: String,
    /// Maximum attempts against transient provider errors
    pub maximum_retries: u32,
    /// Client SDK toggle
    pub stripe_js: StripeJs,
}

impl StripeConfig {
    /// Loads the configuration from the process environment, merging an
    /// optional `.env` file underneath it
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let loader = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;

        let get = |name: &str| loader.get_string(name).ok().filter(|v| !v.is_empty());

        let webhook_endpoint_secret = get("stripe_webhook_endpoint_secret")
            .ok_or(ConfigError::MissingWebhookSecret)?;
        let secret_key =
            get("stripe_key").ok_or_else(|| ConfigError::Missing("STRIPE_KEY".into()))?;
        let publishable_key = get("stripe_publishable_key")
            .ok_or_else(|| ConfigError::Missing("STRIPE_PUBLISHABLE_KEY".into()))?;

        let api_version = get("stripe_api_version").unwrap_or_else(|| DEFAULT_API_VERSION.into());

        let maximum_retries = match get("maximum_stripe_retries") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "MAXIMUM_STRIPE_RETRIES".into(),
                value: raw,
            })?,
            None => DEFAULT_MAXIMUM_RETRIES,
        };

        let stripe_js = match get("stripe_js") {
            Some(raw) => StripeJs::parse(&raw).ok_or(ConfigError::Invalid {
                name: "STRIPE_JS".into(),
                value: raw,
            })?,
            None => StripeJs::Off,
        };

        Ok(Self {
            secret_key,
            publishable_key,
            webhook_endpoint_secret,
            api_version,
            maximum_retries,
            stripe_js,
        })
    }

    /// A configuration suitable for tests: test-mode keys, a small
    /// retry budget
    pub fn for_tests() -> Self {
        Self {
            secret_key: "sk_test_key".into(),
            publishable_key: "pk_test_key".into(),
            webhook_endpoint_secret: "whsec_test".into(),
            api_version: DEFAULT_API_VERSION.into(),
            maximum_retries: 4,
            stripe_js: StripeJs::Off,
        }
    }
}

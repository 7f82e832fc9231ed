//! Stripe Infrastructure Layer
//!
//! Adapters and services between the onboarding domain and the Stripe
//! API:
//!
//! - [`client`]: reqwest-based implementation of the gateway port
//! - [`sync`]: bounded-retry wrapper around gateway calls that keeps the
//!   local cache coherent
//! - [`cache`]: the in-process read-through account/person cache
//! - [`uploads`]: resolves identity-document uploads into file tokens
//! - [`reattribution`]: maps upstream validation errors back onto the
//!   originating flat form field

pub mod cache;
pub mod client;
pub mod error;
pub mod reattribution;
pub mod sync;
pub mod uploads;

pub use cache::AccountCache;
pub use client::{StripeClient, DEFAULT_API_BASE, DEFAULT_FILES_BASE};
pub use error::StripeApiError;
pub use reattribution::reattribute;
pub use sync::SyncService;
pub use uploads::{resolve_uploads, UploadMap, UploadedFile, DOCUMENT_FIELDS};

//! Core Kernel - Foundational types for the connect onboarding system
//!
//! This crate provides the fundamental building blocks used across all
//! onboarding modules:
//! - Opaque Stripe identifiers with prefix validation
//! - The error vocabulary surfaced to UI/API callers
//! - Environment-driven Stripe configuration
//! - Gateway error classification for the ports-and-adapters layer

pub mod config;
pub mod error;
pub mod identifiers;
pub mod ports;

pub use config::{ConfigError, StripeConfig, StripeJs};
pub use error::OnboardingError;
pub use identifiers::{AccountId, DraftId, FileId, PersonId};
pub use ports::{DomainPort, GatewayError};

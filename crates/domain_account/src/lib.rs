//! Connected-Account Domain
//!
//! Models the Stripe connected account and its sub-entities as this
//! system sees them: an eventually-consistent read-only mirror of the
//! upstream object, the person roles attached to a company account, the
//! metadata-backed registration drafts, and the rules gating final
//! submission.
//!
//! The account itself is owned by Stripe. Everything here either reads
//! the mirror or prepares payloads for the gateway port defined in
//! [`ports`]; nothing mutates account state locally except the drafts,
//! which live in the account's metadata until they are consumed.

pub mod account;
pub mod draft;
pub mod owners;
pub mod person;
pub mod ports;
pub mod submission;

pub use account::{BusinessType, ConnectedAccount, ExternalAccount, Requirements};
pub use draft::RegistrationDraft;
pub use owners::{StoredOwners, MAXIMUM_OWNERS};
pub use person::{Person, PersonRole, Relationship};
pub use ports::StripeGateway;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockStripeGateway;
pub use submission::ready_for_submission;

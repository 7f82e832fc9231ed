//! Identity-document upload resolution
//!
//! Document form fields carry binary content instead of text. Before a
//! payload is nested and synced, each recognized upload is pushed to
//! Stripe's file storage with the `identity_document` purpose and the
//! returned token is substituted into the body map in place, so
//! downstream nesting treats it like any other scalar field.

use std::collections::HashMap;
use tracing::debug;

use core_kernel::OnboardingError;
use domain_account::ports::IDENTITY_DOCUMENT_PURPOSE;
use domain_account::StripeGateway;
use domain_requirements::validator::FieldMap;

/// An uploaded file, as received from the form boundary
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content: Vec<u8>,
}

/// Upload field name -> file content
pub type UploadMap = HashMap<String, UploadedFile>;

/// The document fields recognized by the upload resolver, in the order
/// they resolve
pub const DOCUMENT_FIELDS: &[&str] = &[
    "verification_document_front",
    "verification_document_back",
    "verification_additional_document_front",
    "verification_additional_document_back",
];

/// Resolves every recognized upload into a file token
///
/// Substitutes tokens into `body` in place. Fields already carrying a
/// resolved token are left untouched, so resolving the same upload map
/// twice never clobbers them. A failed upload surfaces as
/// `invalid-<fieldName>` for that specific field.
pub async fn resolve_uploads<G: StripeGateway>(
    gateway: &G,
    uploads: &UploadMap,
    body: &mut FieldMap,
) -> Result<(), OnboardingError> {
    for field in DOCUMENT_FIELDS {
        let Some(upload) = uploads.get(*field) else {
            continue;
        };
        if body.get(*field).map(|v| !v.trim().is_empty()).unwrap_or(false) {
            // Already resolved on a previous pass
            continue;
        }
        let token = gateway
            .upload_file(&upload.name, upload.content.clone(), IDENTITY_DOCUMENT_PURPOSE)
            .await
            .map_err(|err| {
                debug!(field, error = %err, "document upload failed");
                OnboardingError::invalid_field(*field)
            })?;
        body.insert(field.to_string(), token.as_str().to_string());
    }
    Ok(())
}

use crate::listings::{CreateListingRequest, LISTING_STATUS_AVAILABLE, ListingApi, ListingError};
use crate::reconcile;
use crate::session::ListingDraft;
use crate::validate::{self, Unmet};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// A field check failed; names the first unmet field.
    #[error("validation failed: {field}")]
    Validation { field: &'static str },
    /// Distinct from field validation: the draft has no uploaded image yet.
    #[error("at least one uploaded photo is required")]
    NoImages,
    /// The endpoint rejected the listing or the transport failed.
    #[error("submission failed: {reason}")]
    Submission { reason: String },
}

/// Orchestrates one create-listing attempt: re-checks validity, reconciles
/// identifiers from slot state, issues exactly one call. Never retries; a
/// failed attempt leaves the draft untouched for the user to retry.
pub struct SubmissionCoordinator {
    api: Arc<dyn ListingApi>,
}

impl SubmissionCoordinator {
    pub fn new(api: Arc<dyn ListingApi>) -> Self {
        Self { api }
    }

    pub async fn submit(&self, draft: &ListingDraft) -> Result<String, SubmitError> {
        match validate::first_unmet(draft) {
            Some(Unmet::NoImages) => {
                warn!(target = "bazaar.submit", "submission blocked: no uploaded images");
                return Err(SubmitError::NoImages);
            }
            Some(unmet) => {
                warn!(
                    target = "bazaar.submit",
                    field = unmet.code(),
                    "submission blocked by validation"
                );
                return Err(SubmitError::Validation {
                    field: unmet.code(),
                });
            }
            None => {}
        }

        // The gate above guarantees at least one success, so the list is
        // non-empty and the cover image is its head.
        let images = reconcile::server_ids(draft.slots());
        let request = CreateListingRequest {
            seller_id: draft.seller_id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            price: draft.price.clone(),
            image: images[0].clone(),
            images,
            status: LISTING_STATUS_AVAILABLE,
        };

        info!(
            target = "bazaar.submit",
            seller = %request.seller_id,
            images = request.images.len(),
            "submitting listing"
        );
        match self.api.create(&request).await {
            Ok(listing_id) => Ok(listing_id),
            Err(ListingError::Rejected(reason)) => Err(SubmitError::Submission { reason }),
            Err(ListingError::Request(reason)) => {
                warn!(target = "bazaar.submit", error = %reason, "listing request failed");
                Err(SubmitError::Submission {
                    reason: "network error".into(),
                })
            }
        }
    }
}

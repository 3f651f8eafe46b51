use crate::reconcile;
use crate::session::ListingDraft;

/// First unmet submission condition, in the order the form presents them.
/// Field conditions come before the image condition so user feedback points
/// at the field to fix first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unmet {
    EmptyTitle,
    EmptyDescription,
    BadPrice,
    NoImages,
}

impl Unmet {
    pub fn code(&self) -> &'static str {
        match self {
            Unmet::EmptyTitle => "title",
            Unmet::EmptyDescription => "description",
            Unmet::BadPrice => "price",
            Unmet::NoImages => "no_images",
        }
    }
}

/// Pure predicate over the draft; no side effects, recomputed on every
/// mutation and again right before submission.
pub fn first_unmet(draft: &ListingDraft) -> Option<Unmet> {
    if draft.title.trim().is_empty() {
        return Some(Unmet::EmptyTitle);
    }
    if draft.description.trim().is_empty() {
        return Some(Unmet::EmptyDescription);
    }
    if !price_is_valid(&draft.price) {
        return Some(Unmet::BadPrice);
    }
    if reconcile::success_count(draft.slots()) == 0 {
        return Some(Unmet::NoImages);
    }
    None
}

pub fn is_valid(draft: &ListingDraft) -> bool {
    first_unmet(draft).is_none()
}

fn price_is_valid(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => value.is_finite() && value >= 0.0,
        Err(_) => false,
    }
}

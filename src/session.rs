use crate::models::{DraftField, ImageSlot, PickedFile, SlotStatus};
use tracing::warn;
use uuid::Uuid;

/// Hard cap on photos per listing.
pub const MAX_SLOTS: usize = 6;

/// The in-progress listing: user-edited fields plus the upload session.
/// Exists only in memory, for the lifetime of one publish screen.
#[derive(Debug, Clone)]
pub struct ListingDraft {
    pub seller_id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub session: UploadSession,
}

impl ListingDraft {
    pub fn new(seller_id: impl Into<String>) -> Self {
        Self {
            seller_id: seller_id.into(),
            title: String::new(),
            description: String::new(),
            price: String::new(),
            session: UploadSession::new(),
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Title => self.title = value,
            DraftField::Description => self.description = value,
            DraftField::Price => self.price = value,
        }
    }

    pub fn slots(&self) -> &[ImageSlot] {
        self.session.slots()
    }
}

/// Outcome of an add: slots that were created (and still need their upload
/// issued) plus the number of files rejected for lack of capacity.
#[derive(Debug)]
pub struct AddOutcome {
    pub accepted: Vec<(Uuid, PickedFile)>,
    pub rejected: usize,
}

/// Ordered sequence of image slots. All mutation goes through the methods
/// below and must happen on a single writer; upload completions that arrive
/// for a key no longer in the sequence are no-ops.
#[derive(Debug, Clone, Default)]
pub struct UploadSession {
    slots: Vec<ImageSlot>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[ImageSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Creates a pending slot per file while capacity remains. Files beyond
    /// the cap are counted as rejected, never queued.
    pub fn add_files(&mut self, files: Vec<PickedFile>) -> AddOutcome {
        let mut accepted = Vec::new();
        let mut rejected = 0;
        for file in files {
            if self.slots.len() >= MAX_SLOTS {
                rejected += 1;
                continue;
            }
            let local_key = Uuid::new_v4();
            self.slots.push(ImageSlot {
                local_key,
                display_url: file.preview_url.clone(),
                status: SlotStatus::Pending,
            });
            accepted.push((local_key, file));
        }
        if rejected > 0 {
            warn!(
                target = "bazaar.session",
                rejected = rejected,
                "files beyond capacity rejected"
            );
        }
        AddOutcome { accepted, rejected }
    }

    /// Marks a pending slot as uploading; the caller issues the request.
    pub fn begin_upload(&mut self, local_key: Uuid) -> bool {
        match self.slot_mut(local_key) {
            Some(slot) => {
                slot.status = SlotStatus::Uploading;
                true
            }
            None => false,
        }
    }

    /// Applies a successful upload completion. Returns `false` when the slot
    /// was removed before its completion arrived; the result is discarded.
    pub fn upload_succeeded(
        &mut self,
        local_key: Uuid,
        server_id: String,
        display_url: String,
    ) -> bool {
        match self.slot_mut(local_key) {
            Some(slot) => {
                slot.status = SlotStatus::Success { server_id };
                slot.display_url = Some(display_url);
                true
            }
            None => {
                warn!(target = "bazaar.session", %local_key, "orphaned upload success ignored");
                false
            }
        }
    }

    /// Applies an upload failure to one slot; other slots are unaffected.
    pub fn upload_failed(&mut self, local_key: Uuid, reason: String) -> bool {
        match self.slot_mut(local_key) {
            Some(slot) => {
                slot.status = SlotStatus::Failed { reason };
                true
            }
            None => {
                warn!(target = "bazaar.session", %local_key, "orphaned upload failure ignored");
                false
            }
        }
    }

    /// Removes a slot in any state, including mid-upload. The in-flight
    /// request is not cancelled; its eventual completion becomes an orphan.
    pub fn remove_file(&mut self, local_key: Uuid) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.local_key != local_key);
        self.slots.len() != before
    }

    fn slot_mut(&mut self, local_key: Uuid) -> Option<&mut ImageSlot> {
        self.slots.iter_mut().find(|s| s.local_key == local_key)
    }
}

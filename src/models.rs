use serde::Serialize;
use uuid::Uuid;

/// One candidate photo in the publish flow, keyed by a `local_key` that is
/// assigned when the file is picked and never reused, even after removal.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageSlot {
    pub local_key: Uuid,
    /// Preview URL for rendering: a local placeholder until the upload
    /// succeeds, then the asset URL derived from the server response.
    pub display_url: Option<String>,
    #[serde(flatten)]
    pub status: SlotStatus,
}

impl ImageSlot {
    pub fn is_success(&self) -> bool {
        matches!(self.status, SlotStatus::Success { .. })
    }
}

/// Upload lifecycle of a slot. A server identifier exists exactly when the
/// upload succeeded; no other state can carry one.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SlotStatus {
    Pending,
    Uploading,
    Success { server_id: String },
    Failed { reason: String },
}

impl SlotStatus {
    pub fn server_id(&self) -> Option<&str> {
        match self {
            SlotStatus::Success { server_id } => Some(server_id),
            _ => None,
        }
    }
}

/// A file handed over by the UI picker.
#[derive(Debug, Clone)]
pub struct PickedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Local preview (e.g. a blob/temp URL) shown while the upload runs.
    pub preview_url: Option<String>,
}

/// Free-text fields of the draft editable by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    Price,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Price => "price",
        }
    }
}

/// Read-only projection of the draft handed to the UI after every applied
/// event. Snapshots are always of a fully-applied state.
#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    pub slots: Vec<ImageSlot>,
    pub is_valid: bool,
    pub is_submitting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    /// Set once a submission succeeded; the flow accepts no further events.
    pub terminal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<String>,
}

impl ViewState {
    pub fn initial() -> Self {
        Self {
            slots: Vec::new(),
            is_valid: false,
            is_submitting: false,
            last_error: None,
            terminal: false,
            listing_id: None,
        }
    }
}

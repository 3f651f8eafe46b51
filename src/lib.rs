//! Publish-flow core for the bazaar catalog app: a bounded, ordered set of
//! image upload slots whose completions arrive out of order, a derived
//! identifier list for submission, and the validity gate in front of the
//! create-listing call. The UI layer drives it through [`PublishHandle`] and
//! renders the [`ViewState`] snapshot it exposes.

pub mod assets;
pub mod config;
pub mod flow;
pub mod http;
pub mod listings;
pub mod models;
pub mod reconcile;
pub mod session;
pub mod submit;
pub mod validate;

pub use assets::{AssetClient, AssetError, ImageStore, UploadReceipt};
pub use flow::{FlowClosed, PublishFlow, PublishHandle};
pub use listings::{CreateListingRequest, ListingApi, ListingClient, ListingError};
pub use models::{DraftField, ImageSlot, PickedFile, SlotStatus, ViewState};
pub use session::{ListingDraft, MAX_SLOTS, UploadSession};
pub use submit::{SubmissionCoordinator, SubmitError};

use crate::assets::{AssetError, ImageStore, UploadReceipt};
use crate::listings::ListingApi;
use crate::models::{DraftField, PickedFile, ViewState};
use crate::session::ListingDraft;
use crate::submit::{SubmissionCoordinator, SubmitError};
use crate::validate;
use std::sync::Arc;
use thiserror::Error;
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
};
use tracing::{info, warn};
use uuid::Uuid;

/// The flow worker has exited (submission succeeded or the flow was
/// abandoned); no further commands are accepted.
#[derive(Debug, Clone, Error)]
#[error("publish flow closed")]
pub struct FlowClosed;

/// Everything that can mutate the draft. User commands and asynchronous
/// completions share one channel so they are applied one at a time, in
/// arrival order, by the single worker that owns the draft.
enum FlowEvent {
    Edit(DraftField, String),
    AddFiles(Vec<PickedFile>),
    RemoveFile(Uuid),
    Submit,
    UploadFinished {
        local_key: Uuid,
        result: Result<UploadReceipt, AssetError>,
    },
    SubmitFinished(Result<String, SubmitError>),
}

/// UI-facing handle: the four entry points plus the view-state snapshot.
/// Cloneable; dropping every clone abandons the flow.
#[derive(Clone)]
pub struct PublishHandle {
    tx: mpsc::Sender<FlowEvent>,
    view: Arc<Mutex<ViewState>>,
}

impl PublishHandle {
    pub async fn edit_field(
        &self,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<(), FlowClosed> {
        self.send(FlowEvent::Edit(field, value.into())).await
    }

    pub async fn add_files(&self, files: Vec<PickedFile>) -> Result<(), FlowClosed> {
        self.send(FlowEvent::AddFiles(files)).await
    }

    pub async fn remove_file(&self, local_key: Uuid) -> Result<(), FlowClosed> {
        self.send(FlowEvent::RemoveFile(local_key)).await
    }

    pub async fn submit(&self) -> Result<(), FlowClosed> {
        self.send(FlowEvent::Submit).await
    }

    /// Snapshot of the last fully-applied state.
    pub async fn view(&self) -> ViewState {
        self.view.lock().await.clone()
    }

    async fn send(&self, event: FlowEvent) -> Result<(), FlowClosed> {
        self.tx.send(event).await.map_err(|_| FlowClosed)
    }
}

pub struct PublishFlow;

impl PublishFlow {
    /// Spawns the worker that owns the draft for one publish screen.
    ///
    /// Upload requests and the final submission run as separate tasks so the
    /// loop never blocks on I/O; their results re-enter the event channel.
    /// The worker exits when a submission succeeds or when every handle is
    /// dropped and no completion is left to deliver.
    pub fn spawn(
        seller_id: impl Into<String>,
        store: Arc<dyn ImageStore>,
        api: Arc<dyn ListingApi>,
    ) -> (PublishHandle, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel(queue_capacity_from_env());
        let view = Arc::new(Mutex::new(ViewState::initial()));
        let mut worker = Worker {
            draft: ListingDraft::new(seller_id),
            store,
            api,
            events: tx.downgrade(),
            view: view.clone(),
            submitting: false,
            terminal: false,
            last_error: None,
            listing_id: None,
        };
        info!(target = "bazaar.flow", seller = %worker.draft.seller_id, "publish flow opened");

        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let finished = worker.apply(event).await;
                worker.publish_view().await;
                if finished {
                    break;
                }
            }
            info!(target = "bazaar.flow", "publish flow closed");
        });

        (PublishHandle { tx, view }, handle)
    }
}

/// Single logical writer. Owns the draft; nothing else may touch it.
struct Worker {
    draft: ListingDraft,
    store: Arc<dyn ImageStore>,
    api: Arc<dyn ListingApi>,
    events: mpsc::WeakSender<FlowEvent>,
    view: Arc<Mutex<ViewState>>,
    submitting: bool,
    terminal: bool,
    last_error: Option<String>,
    listing_id: Option<String>,
}

impl Worker {
    /// Applies one event. Returns `true` when the flow reached its terminal
    /// state and the loop should stop.
    async fn apply(&mut self, event: FlowEvent) -> bool {
        match event {
            FlowEvent::Edit(field, value) => {
                self.draft.set_field(field, value);
                false
            }
            FlowEvent::AddFiles(files) => {
                let outcome = self.draft.session.add_files(files);
                if outcome.rejected > 0 {
                    self.last_error = Some("capacity_exceeded".into());
                }
                for (local_key, file) in outcome.accepted {
                    self.draft.session.begin_upload(local_key);
                    self.spawn_upload(local_key, file);
                }
                false
            }
            FlowEvent::RemoveFile(local_key) => {
                // Removal never cancels the in-flight request; its eventual
                // completion arrives as an orphan and is dropped.
                if !self.draft.session.remove_file(local_key) {
                    warn!(target = "bazaar.flow", %local_key, "remove for unknown slot");
                }
                false
            }
            FlowEvent::Submit => {
                if self.submitting {
                    warn!(target = "bazaar.flow", "submit while already submitting ignored");
                    return false;
                }
                self.submitting = true;
                self.last_error = None;
                self.spawn_submission();
                false
            }
            FlowEvent::UploadFinished { local_key, result } => {
                match result {
                    Ok(receipt) => {
                        self.draft.session.upload_succeeded(
                            local_key,
                            receipt.server_id,
                            receipt.display_url,
                        );
                    }
                    Err(err) => {
                        if self.draft.session.upload_failed(local_key, err.to_string()) {
                            self.last_error = Some("upload_failed".into());
                        }
                    }
                }
                false
            }
            FlowEvent::SubmitFinished(result) => {
                self.submitting = false;
                match result {
                    Ok(listing_id) => {
                        info!(target = "bazaar.flow", %listing_id, "listing published");
                        self.listing_id = Some(listing_id);
                        self.last_error = None;
                        self.terminal = true;
                        true
                    }
                    Err(err) => {
                        // The draft is kept as-is so the user can retry.
                        self.last_error = Some(error_code(&err));
                        false
                    }
                }
            }
        }
    }

    fn spawn_upload(&self, local_key: Uuid, file: PickedFile) {
        let Some(tx) = self.events.upgrade() else {
            return;
        };
        let store = self.store.clone();
        info!(
            target = "bazaar.flow",
            %local_key,
            file = %file.file_name,
            "upload started"
        );
        tokio::spawn(async move {
            let result = store.upload(file).await;
            // A send failure means the flow already closed; the result is
            // simply dropped.
            let _ = tx.send(FlowEvent::UploadFinished { local_key, result }).await;
        });
    }

    fn spawn_submission(&self) {
        let Some(tx) = self.events.upgrade() else {
            return;
        };
        // Snapshot: field edits made while the call is in flight do not leak
        // into the request that was already validated.
        let draft = self.draft.clone();
        let api = self.api.clone();
        tokio::spawn(async move {
            let result = SubmissionCoordinator::new(api).submit(&draft).await;
            let _ = tx.send(FlowEvent::SubmitFinished(result)).await;
        });
    }

    async fn publish_view(&self) {
        let mut guard = self.view.lock().await;
        *guard = ViewState {
            slots: self.draft.slots().to_vec(),
            is_valid: validate::is_valid(&self.draft),
            is_submitting: self.submitting,
            last_error: self.last_error.clone(),
            terminal: self.terminal,
            listing_id: self.listing_id.clone(),
        };
    }
}

fn error_code(err: &SubmitError) -> String {
    match err {
        SubmitError::Validation { field } => format!("validation_failure:{field}"),
        SubmitError::NoImages => "no_images".into(),
        SubmitError::Submission { .. } => "submission_failure".into(),
    }
}

fn queue_capacity_from_env() -> usize {
    std::env::var("FLOW_QUEUE_CAPACITY")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(64)
}

//! Document state container.
//!
//! Mirrors the document list and the current selection, and tracks one
//! background status poll per document.
//!
//! Every poll task holds a ticket. The task applies its result only if its
//! ticket is still registered, checked under the same lock that guards the
//! snapshot. Cancelling removes the ticket under that lock and aborts the
//! task, so once `cancel` returns the task can no longer write back.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use zhimo_client::{DocumentService, StatusPoller};
use zhimo_core::{
    defaults, ApiResponse, DeleteResponse, Document, DocumentQueryParams, DocumentUpdateRequest,
    DocumentUploadResponse, Error, ProcessingStatus, Result, UploadFile,
};

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Cached documents plus transient flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSnapshot {
    pub documents: Vec<Document>,
    pub selected: Option<Document>,
    pub is_loading: bool,
    pub is_uploading: bool,
    pub error: Option<String>,
}

impl DocumentSnapshot {
    pub fn completed_documents(&self) -> Vec<&Document> {
        self.with_status(|s| s == ProcessingStatus::Completed)
    }

    /// Documents still pending or processing.
    pub fn processing_documents(&self) -> Vec<&Document> {
        self.with_status(|s| matches!(s, ProcessingStatus::Pending | ProcessingStatus::Processing))
    }

    pub fn failed_documents(&self) -> Vec<&Document> {
        self.with_status(|s| s == ProcessingStatus::Failed)
    }

    pub fn find(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    fn with_status(&self, keep: impl Fn(ProcessingStatus) -> bool) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|d| keep(d.processing_status))
            .collect()
    }

    /// Replace the list entry and the selection whose id matches `document`.
    fn replace(&mut self, document: &Document) {
        if let Some(entry) = self.documents.iter_mut().find(|d| d.id == document.id) {
            *entry = document.clone();
        }
        if let Some(selected) = self.selected.as_mut().filter(|s| s.id == document.id) {
            *selected = document.clone();
        }
    }

    fn remove(&mut self, id: &str) {
        self.documents.retain(|d| d.id != id);
        if self.selected.as_ref().is_some_and(|s| s.id == id) {
            self.selected = None;
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

struct PollHandle {
    ticket: u64,
    task: JoinHandle<()>,
}

#[derive(Default)]
struct Inner {
    snapshot: DocumentSnapshot,
    polls: HashMap<String, PollHandle>,
    next_ticket: u64,
}

impl Inner {
    fn cancel_poll(&mut self, id: &str) {
        if let Some(handle) = self.polls.remove(id) {
            handle.task.abort();
            debug!(document_id = id, ticket = handle.ticket, "Cancelled document poll");
        }
    }
}

struct Shared {
    service: DocumentService,
    poller: StatusPoller,
    state: RwLock<Inner>,
}

impl Shared {
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the poller and apply its outcome.
    ///
    /// With a ticket, the outcome is dropped unless that ticket is still the
    /// registered poll for `id`.
    async fn poll_and_apply(&self, id: &str, ticket: Option<u64>) -> Option<Document> {
        let outcome = self.poller.poll(&self.service, id).await;

        let mut inner = self.write();
        if let Some(ticket) = ticket {
            match inner.polls.get(id) {
                Some(handle) if handle.ticket == ticket => {
                    inner.polls.remove(id);
                }
                _ => {
                    debug!(document_id = id, ticket, "Discarding result of cancelled poll");
                    return None;
                }
            }
        }

        match outcome {
            Ok(document) => {
                inner.snapshot.replace(&document);
                Some(document)
            }
            Err(e) => {
                warn!(document_id = id, error = %e, "Document poll did not resolve");
                inner.snapshot.error = Some(e.message());
                None
            }
        }
    }
}

/// Holds the document list and selection and drives the document service.
///
/// Background polls need a tokio runtime. Dropping the store aborts them.
pub struct DocumentStore {
    shared: Arc<Shared>,
}

impl DocumentStore {
    pub fn new(service: DocumentService, poller: StatusPoller) -> Self {
        Self {
            shared: Arc::new(Shared {
                service,
                poller,
                state: RwLock::new(Inner::default()),
            }),
        }
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        self.shared.read().snapshot.clone()
    }

    /// Whether a background poll is registered for `id`.
    pub fn is_polling(&self, id: &str) -> bool {
        self.shared.read().polls.contains_key(id)
    }

    pub fn clear_error(&self) {
        self.shared.write().snapshot.error = None;
    }

    /// Replace the list with the server's. Failures are recorded, not raised.
    pub async fn fetch_documents(&self, params: &DocumentQueryParams) {
        self.begin_loading();
        let result = self.shared.service.get_documents(params).await;
        let outcome = success_data(result, defaults::MSG_LIST_FAILED);

        let mut inner = self.shared.write();
        inner.snapshot.is_loading = false;
        match outcome {
            Ok(documents) => {
                debug!(count = documents.len(), "Fetched documents");
                inner.snapshot.documents = documents;
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch documents");
                inner.snapshot.error = Some(e.message());
            }
        }
    }

    /// Upload a file, prepend the new document, and start polling it.
    pub async fn upload_document(
        &self,
        file: UploadFile,
        title: &str,
        tags: &[String],
    ) -> Result<DocumentUploadResponse> {
        {
            let mut inner = self.shared.write();
            inner.snapshot.is_uploading = true;
            inner.snapshot.error = None;
        }

        let result = self.shared.service.upload_document(file, title, tags).await;
        let outcome = success_data(result, defaults::MSG_UPLOAD_FAILED);

        let uploaded = {
            let mut inner = self.shared.write();
            inner.snapshot.is_uploading = false;
            match outcome {
                Ok(upload) => {
                    inner.snapshot.documents.insert(0, upload.document.clone());
                    upload
                }
                Err(e) => {
                    inner.snapshot.error = Some(e.message());
                    return Err(e);
                }
            }
        };

        info!(document_id = %uploaded.document.id, title, "Document uploaded");
        self.start_polling(&uploaded.document.id);
        Ok(uploaded)
    }

    /// Wait for `id` to reach a terminal status and apply it to the snapshot.
    ///
    /// A timeout is recorded as the error and yields `None`.
    pub async fn poll_document_processing(&self, id: &str) -> Option<Document> {
        self.shared.poll_and_apply(id, None).await
    }

    /// Poll `id` in the background, replacing any poll already tracked for it.
    pub fn start_polling(&self, id: &str) {
        let shared = Arc::clone(&self.shared);
        let mut inner = self.shared.write();
        inner.next_ticket += 1;
        let ticket = inner.next_ticket;

        let document_id = id.to_string();
        let task = tokio::spawn(async move {
            shared.poll_and_apply(&document_id, Some(ticket)).await;
        });

        inner.cancel_poll(id);
        inner.polls.insert(id.to_string(), PollHandle { ticket, task });
        debug!(document_id = id, ticket, "Started document poll");
    }

    /// Stop the background poll for `id`, if any. Its result is never applied.
    pub fn cancel_polling(&self, id: &str) {
        self.shared.write().cancel_poll(id);
    }

    /// Select `id`, fetching it unless it is already selected.
    ///
    /// Selecting a different document cancels the poll of the previous one.
    pub async fn select_document(&self, id: &str) -> Result<Document> {
        {
            let mut inner = self.shared.write();
            if let Some(selected) = inner.snapshot.selected.as_ref().filter(|s| s.id == id) {
                return Ok(selected.clone());
            }
            inner.snapshot.is_loading = true;
            inner.snapshot.error = None;
        }

        let result = self.shared.service.get_document(id).await;
        let outcome = success_data(result, defaults::MSG_SELECT_FAILED);

        let mut inner = self.shared.write();
        inner.snapshot.is_loading = false;
        match outcome {
            Ok(document) => {
                let previous = inner
                    .snapshot
                    .selected
                    .replace(document.clone())
                    .map(|d| d.id)
                    .filter(|prev| prev != id);
                if let Some(previous) = previous {
                    inner.cancel_poll(&previous);
                }
                Ok(document)
            }
            Err(e) => {
                warn!(document_id = id, error = %e, "Failed to select document");
                inner.snapshot.error = Some(e.message());
                Err(e)
            }
        }
    }

    /// Rename or retag a document; the list entry and selection follow.
    pub async fn update_document(
        &self,
        id: &str,
        request: &DocumentUpdateRequest,
    ) -> Result<Document> {
        self.begin_loading();
        let result = self.shared.service.update_document(id, request).await;
        let outcome = success_data(result, defaults::MSG_UPDATE_FAILED);

        let mut inner = self.shared.write();
        inner.snapshot.is_loading = false;
        match outcome {
            Ok(document) => {
                inner.snapshot.replace(&document);
                Ok(document)
            }
            Err(e) => {
                inner.snapshot.error = Some(e.message());
                Err(e)
            }
        }
    }

    /// Delete a document, cancel its poll, and drop it from the snapshot.
    pub async fn delete_document(&self, id: &str) -> Result<ApiResponse<DeleteResponse>> {
        self.begin_loading();
        let result = self.shared.service.delete_document(id).await;

        let mut inner = self.shared.write();
        inner.snapshot.is_loading = false;
        let outcome = result.and_then(|response| {
            if response.success {
                Ok(response)
            } else {
                Err(Error::Api(
                    response.message_or(defaults::MSG_DELETE_FAILED).to_string(),
                ))
            }
        });

        match outcome {
            Ok(response) => {
                inner.cancel_poll(id);
                inner.snapshot.remove(id);
                info!(document_id = id, "Document deleted");
                Ok(response)
            }
            Err(e) => {
                inner.snapshot.error = Some(e.message());
                Err(e)
            }
        }
    }

    /// Clear the selection and cancel its poll.
    pub fn clear_selected_document(&self) {
        let mut inner = self.shared.write();
        if let Some(previous) = inner.snapshot.selected.take() {
            inner.cancel_poll(&previous.id);
        }
    }

    fn begin_loading(&self) {
        let mut inner = self.shared.write();
        inner.snapshot.is_loading = true;
        inner.snapshot.error = None;
    }
}

impl Drop for DocumentStore {
    fn drop(&mut self) {
        let mut inner = self.shared.write();
        for (_, handle) in inner.polls.drain() {
            handle.task.abort();
        }
    }
}

/// Unwrap a successful envelope, turning `success: false` into `Error::Api`.
fn success_data<T>(result: Result<ApiResponse<T>>, fallback: &str) -> Result<T> {
    let response = result?;
    let message = response.message_or(fallback).to_string();
    response.into_success_data().ok_or(Error::Api(message))
}

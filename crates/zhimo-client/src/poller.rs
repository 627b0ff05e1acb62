//! Document lifecycle poller.
//!
//! Waits for a document to reach a terminal processing status with a fixed
//! attempt budget and a fixed delay. There is no backoff and no jitter.
//!
//! Per attempt:
//! - terminal status observed → resolve with that document, no further delay
//! - non-terminal status, `success: false`, or a failed fetch → log, sleep
//!   for the interval, continue
//!
//! After `max_attempts` attempts without a terminal status the poll times
//! out. A failed fetch costs exactly one attempt and is never surfaced on its
//! own.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use zhimo_core::{defaults, Document, DocumentSource, Error, Result};

use crate::config::PollConfig;

/// Observation after a single attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    /// Still waiting; the only state carried across attempts.
    Polling,
    /// A terminal status was observed.
    Resolved(Document),
    /// The attempt budget is spent.
    TimedOut,
}

/// Fixed-budget status poller.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusPoller {
    config: PollConfig,
}

impl StatusPoller {
    pub fn new(config: PollConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Poll `id` until it completes or fails.
    #[instrument(skip(self, source), fields(max_attempts = self.config.max_attempts))]
    pub async fn poll<S>(&self, source: &S, id: &str) -> Result<Document>
    where
        S: DocumentSource + ?Sized,
    {
        let interval = Duration::from_millis(self.config.interval_ms);
        let mut state = PollState::Polling;
        let mut attempt = 0;

        while state == PollState::Polling {
            if attempt == self.config.max_attempts {
                state = PollState::TimedOut;
                break;
            }
            attempt += 1;

            state = self.observe(source, id, attempt).await;
            if state == PollState::Polling {
                sleep(interval).await;
            }
        }

        match state {
            PollState::Resolved(document) => {
                info!(
                    document_id = id,
                    attempt,
                    status = %document.processing_status,
                    "Document reached terminal status"
                );
                Ok(document)
            }
            _ => {
                warn!(document_id = id, attempts = attempt, "Document status poll timed out");
                Err(Error::Timeout(defaults::MSG_POLL_TIMEOUT.to_string()))
            }
        }
    }

    /// Fetch once and classify the result.
    async fn observe<S>(&self, source: &S, id: &str, attempt: u32) -> PollState
    where
        S: DocumentSource + ?Sized,
    {
        match source.fetch_document(id).await {
            Ok(response) => match response.into_success_data() {
                Some(document) if document.processing_status.is_terminal() => {
                    PollState::Resolved(document)
                }
                Some(document) => {
                    debug!(
                        document_id = id,
                        attempt,
                        status = %document.processing_status,
                        "Document still processing"
                    );
                    PollState::Polling
                }
                None => {
                    debug!(document_id = id, attempt, "Status fetch returned no document");
                    PollState::Polling
                }
            },
            Err(e) => {
                warn!(
                    document_id = id,
                    attempt,
                    max_attempts = self.config.max_attempts,
                    error = %e,
                    "Document status poll attempt failed"
                );
                PollState::Polling
            }
        }
    }
}

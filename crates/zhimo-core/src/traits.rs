//! Core traits for zhimo abstractions.
//!
//! These traits are the seams between the transport-backed services, the
//! poller, and the state containers, so each side can be swapped for a test
//! double.

use async_trait::async_trait;

use crate::error::Result;
use crate::knowledge::KnowledgeElement;
use crate::models::{ApiResponse, Document};

/// Durable key/value storage for session data.
///
/// Injected into the transport and auth service instead of being a
/// process-wide global.
pub trait KeyValueStorage: Send + Sync {
    /// Read a value; missing keys yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Anything that can fetch one document by id.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_document(&self, id: &str) -> Result<ApiResponse<Document>>;
}

/// Provider of knowledge elements for a document.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    async fn elements_for_document(&self, document_id: &str) -> Result<Vec<KnowledgeElement>>;
}

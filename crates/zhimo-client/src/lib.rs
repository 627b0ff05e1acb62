//! # zhimo-client
//!
//! HTTP client for the zhimo document backend.
//!
//! This crate provides:
//! - `ApiClient`, the transport that attaches the bearer credential and wipes
//!   the session on a 401
//! - Resource services for auth, documents, and AI processing, each
//!   normalizing transport failures into a single display message
//! - `StatusPoller`, the fixed-budget loop that waits for a document to reach
//!   a terminal processing status
//! - `FileStorage`, durable JSON-file session storage
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use zhimo_client::{ApiClient, ClientConfig, DocumentService, PollConfig, StatusPoller};
//! use zhimo_core::MemoryStorage;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ApiClient::new(ClientConfig::from_env(), Arc::new(MemoryStorage::new())).unwrap();
//!     let documents = DocumentService::new(client);
//!     let poller = StatusPoller::new(PollConfig::default());
//!     let document = poller.poll(&documents, "6884458e48a6db663e5ed260").await.unwrap();
//!     println!("{} is {}", document.title, document.processing_status);
//! }
//! ```

pub mod config;
pub mod poller;
pub mod services;
pub mod storage;
pub mod transport;

// Re-export core types
pub use zhimo_core::*;

pub use config::{ClientConfig, PollConfig};
pub use poller::{PollState, StatusPoller};
pub use services::{normalize, AiService, AuthService, DocumentService};
pub use storage::FileStorage;
pub use transport::{ApiClient, TransportError, TransportResult};

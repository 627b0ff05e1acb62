//! # zhimo-core
//!
//! Core types, traits, and abstractions for the zhimo client.
//!
//! This crate provides the domain models mirrored from the backend, the
//! response envelope, the shared error type, and the seam traits that the
//! client and store crates are written against.

pub mod ai;
pub mod defaults;
pub mod error;
pub mod knowledge;
pub mod models;
pub mod storage;
pub mod traits;

// Re-export commonly used types at crate root
pub use ai::*;
pub use error::{Error, Result};
pub use knowledge::{DeckCard, KnowledgeContent, KnowledgeElement, KnowledgeKind};
pub use models::*;
pub use storage::MemoryStorage;
pub use traits::*;

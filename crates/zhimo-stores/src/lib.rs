//! # zhimo-stores
//!
//! State containers mirroring server resources for a UI.
//!
//! Each container owns one snapshot plus transient `is_loading` / `error`
//! flags. Mutating methods set the loading flag, clear the prior error, call
//! a resource service, write the result into the snapshot, and always clear
//! the loading flag on the way out. Derived views are plain functions over a
//! snapshot and are recomputed on every read.

pub mod auth;
pub mod document;
pub mod knowledge;

pub use auth::{AuthSnapshot, AuthStore};
pub use document::{DocumentSnapshot, DocumentStore};
pub use knowledge::{KnowledgeSnapshot, KnowledgeStore, StaticKnowledgeSource};

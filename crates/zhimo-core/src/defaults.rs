//! Centralized default constants for the zhimo client.
//!
//! Every crate references these instead of defining its own magic numbers
//! or user-facing fallback strings.

// =============================================================================
// TRANSPORT
// =============================================================================

/// Default backend base URL.
pub const API_BASE_URL: &str = "https://zhimo-backend.zeabur.app/api";

/// Default request timeout in seconds.
pub const API_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// POLLING
// =============================================================================

/// Maximum status fetches before the poller gives up.
pub const POLL_MAX_ATTEMPTS: u32 = 30;

/// Delay between status fetches in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 2000;

// =============================================================================
// SESSION STORAGE
// =============================================================================

/// Storage key holding the bearer credential.
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key holding the JSON user snapshot.
pub const USER_KEY: &str = "user_info";

/// Default session file used by the command line client.
pub const STORAGE_PATH: &str = ".zhimo/session.json";

// =============================================================================
// MESSAGES
// =============================================================================

pub const MSG_REGISTER_FAILED: &str = "Registration failed";
pub const MSG_LOGIN_FAILED: &str = "Login failed";

pub const MSG_UPLOAD_FAILED: &str = "Document upload failed";
pub const MSG_LIST_FAILED: &str = "Failed to fetch document list";
pub const MSG_DETAIL_FAILED: &str = "Failed to fetch document details";
pub const MSG_MARKDOWN_FAILED: &str = "Failed to fetch document content";
pub const MSG_UPDATE_FAILED: &str = "Failed to update document";
pub const MSG_DELETE_FAILED: &str = "Failed to delete document";
pub const MSG_SELECT_FAILED: &str = "Failed to select document";
pub const MSG_POLL_FAILED: &str = "Failed to poll document processing status";

/// Raised when the poller exhausts its attempt budget.
pub const MSG_POLL_TIMEOUT: &str = "Document processing timed out, please try again later";

pub const MSG_RESTRUCTURE_FAILED: &str = "Document restructuring failed";
pub const MSG_SUMMARY_FAILED: &str = "Failed to generate summary";
pub const MSG_EXERCISES_FAILED: &str = "Failed to generate exercises";
pub const MSG_CONCEPTS_FAILED: &str = "Failed to extract concepts";
pub const MSG_MINDMAP_FAILED: &str = "Failed to generate mind map";
pub const MSG_BATCH_FAILED: &str = "Batch AI processing failed";

pub const MSG_KNOWLEDGE_FAILED: &str = "Failed to fetch knowledge elements";

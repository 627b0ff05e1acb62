//! Core data models for the zhimo client.
//!
//! These types mirror the backend's JSON contract (camelCase field names,
//! MongoDB-style `_id` identities) and are shared by every zhimo crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// ENVELOPE
// =============================================================================

/// Uniform wrapper around every backend response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    /// Payload of a successful response, or `None` for `success: false` or a missing body.
    pub fn into_success_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }

    /// The server message, or `fallback` when the server sent an empty one.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.message.is_empty() {
            fallback
        } else {
            &self.message
        }
    }
}

/// Per-field validation failure reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// Server-side processing state of an uploaded document.
///
/// Moves forward only: pending → processing → completed, or
/// pending/processing → failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ProcessingStatus {
    /// Whether no further transition can occur.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for ProcessingStatus {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid processing status: {}", s)),
        }
    }
}

/// File metadata recorded at upload time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub original_file_name: String,
    pub file_size: u64,
    pub mime_type: String,
}

/// A document as cached by the client. The backend owns it; this copy can go stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub original_format: String,
    pub processing_status: ProcessingStatus,
    #[serde(default)]
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restructured_content: Option<String>,
    pub metadata: DocumentMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload of `POST /documents/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUploadResponse {
    pub document: Document,
    pub processing_status: String,
}

/// Query parameters for `GET /documents`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentQueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProcessingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Body of `PUT /documents/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Payload of `GET /documents/{id}/markdown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownContent {
    pub markdown: String,
}

/// Payload of `DELETE /documents/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub message: String,
}

/// A local file staged for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

// =============================================================================
// USER / SESSION TYPES
// =============================================================================

/// Optional public profile of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub display_name: String,
}

/// Denormalized user snapshot stored alongside the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

impl User {
    /// Profile display name if set and non-empty, otherwise the username.
    pub fn display_name(&self) -> &str {
        match &self.profile {
            Some(profile) if !profile.display_name.is_empty() => &profile.display_name,
            _ => &self.username,
        }
    }
}

/// Payload of the register and login endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// A bearer credential plus the user it was issued to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document_json(status: &str) -> serde_json::Value {
        json!({
            "_id": "6884458e48a6db663e5ed260",
            "title": "Principles of Economics",
            "originalFormat": "pdf",
            "processingStatus": status,
            "filePath": "uploads/econ.pdf",
            "metadata": {
                "originalFileName": "econ.pdf",
                "fileSize": 52431,
                "mimeType": "application/pdf"
            },
            "tags": ["economics"],
            "createdAt": "2025-07-26T03:14:16.000Z",
            "updatedAt": "2025-07-26T03:15:02.000Z"
        })
    }

    #[test]
    fn test_document_deserializes_backend_shape() {
        let doc: Document = serde_json::from_value(document_json("processing")).unwrap();
        assert_eq!(doc.id, "6884458e48a6db663e5ed260");
        assert_eq!(doc.processing_status, ProcessingStatus::Processing);
        assert_eq!(doc.metadata.file_size, 52431);
        assert_eq!(doc.tags.as_deref(), Some(&["economics".to_string()][..]));
        assert!(doc.markdown_content.is_none());
    }

    #[test]
    fn test_document_serializes_with_underscore_id() {
        let doc: Document = serde_json::from_value(document_json("completed")).unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["_id"], "6884458e48a6db663e5ed260");
        assert_eq!(value["processingStatus"], "completed");
        assert!(value.get("markdownContent").is_none());
    }

    /// Decodes an envelope for any payload type, with no extra bounds on `T`.
    fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> ApiResponse<T> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_envelope_without_data_decodes_for_any_payload() {
        let response: ApiResponse<Document> =
            decode(json!({"success": false, "message": "Document not found"}));
        assert!(!response.success);
        assert!(response.data.is_none());
        assert!(response.errors.is_none());

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = serde_json::from_value::<Document>(document_json("queued"));
        assert!(result.is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!ProcessingStatus::Pending.is_terminal());
        assert!(!ProcessingStatus::Processing.is_terminal());
        assert!(ProcessingStatus::Completed.is_terminal());
        assert!(ProcessingStatus::Failed.is_terminal());
    }

    #[test]
    fn test_processing_status_parse() {
        assert_eq!(
            "Completed".parse::<ProcessingStatus>().unwrap(),
            ProcessingStatus::Completed
        );
        assert!("done".parse::<ProcessingStatus>().is_err());
        assert_eq!(ProcessingStatus::Pending.to_string(), "pending");
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: ApiResponse<Document> = serde_json::from_value(json!({
            "success": false,
            "message": "Validation failed",
            "errors": [{"field": "title", "message": "Title is required"}]
        }))
        .unwrap();

        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors.as_ref().map(Vec::len), Some(1));
        assert!(envelope.into_success_data().is_none());
    }

    #[test]
    fn test_envelope_message_fallback() {
        let envelope: ApiResponse<()> = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(envelope.message_or("Login failed"), "Login failed");
    }

    #[test]
    fn test_query_params_skip_unset_fields() {
        let params = DocumentQueryParams {
            status: Some(ProcessingStatus::Completed),
            limit: Some(10),
            ..Default::default()
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, json!({"status": "completed", "limit": 10}));
    }

    #[test]
    fn test_user_display_name() {
        let mut user = User {
            id: "u1".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            profile: None,
        };
        assert_eq!(user.display_name(), "alice");

        user.profile = Some(UserProfile {
            display_name: "Alice Liu".to_string(),
        });
        assert_eq!(user.display_name(), "Alice Liu");

        user.profile = Some(UserProfile {
            display_name: String::new(),
        });
        assert_eq!(user.display_name(), "alice");
    }
}

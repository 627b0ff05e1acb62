//! Contract tests for full backend envelopes.
//!
//! Bodies are copied from real responses so a change in the backend's field
//! naming shows up here before it shows up as an empty UI.

use zhimo_core::{
    ApiResponse, AuthResponse, Document, DocumentUploadResponse, KnowledgeContent,
    KnowledgeElement, ProcessingStatus,
};

#[test]
fn test_document_list_envelope() {
    let body = r##"{
        "success": true,
        "message": "OK",
        "data": [
            {
                "_id": "a1",
                "title": "Chapter 1",
                "originalFormat": "docx",
                "processingStatus": "completed",
                "filePath": "uploads/a1.docx",
                "markdownContent": "# Chapter 1",
                "metadata": {"originalFileName": "ch1.docx", "fileSize": 2048, "mimeType": "application/vnd.openxmlformats-officedocument.wordprocessingml.document"},
                "createdAt": "2025-07-20T08:00:00Z",
                "updatedAt": "2025-07-20T08:01:00Z"
            },
            {
                "_id": "a2",
                "title": "Chapter 2",
                "originalFormat": "pdf",
                "processingStatus": "pending",
                "filePath": "uploads/a2.pdf",
                "metadata": {"originalFileName": "ch2.pdf", "fileSize": 4096, "mimeType": "application/pdf"},
                "tags": [],
                "createdAt": "2025-07-21T08:00:00Z",
                "updatedAt": "2025-07-21T08:00:00Z"
            }
        ]
    }"##;

    let envelope: ApiResponse<Vec<Document>> = serde_json::from_str(body).unwrap();
    let documents = envelope.into_success_data().unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].markdown_content.as_deref(), Some("# Chapter 1"));
    assert_eq!(documents[1].processing_status, ProcessingStatus::Pending);
    assert_eq!(documents[1].tags.as_deref(), Some(&[][..]));
}

#[test]
fn test_upload_envelope() {
    let body = r##"{
        "success": true,
        "message": "Document uploaded",
        "data": {
            "document": {
                "_id": "d9",
                "title": "Notes",
                "originalFormat": "md",
                "processingStatus": "pending",
                "filePath": "uploads/d9.md",
                "metadata": {"originalFileName": "notes.md", "fileSize": 12, "mimeType": "text/markdown"},
                "createdAt": "2025-07-26T03:14:16.000Z",
                "updatedAt": "2025-07-26T03:14:16.000Z"
            },
            "processingStatus": "pending"
        }
    }"##;

    let envelope: ApiResponse<DocumentUploadResponse> = serde_json::from_str(body).unwrap();
    assert!(envelope.success);
    let upload = envelope.data.unwrap();
    assert_eq!(upload.document.id, "d9");
    assert_eq!(upload.processing_status, "pending");
}

#[test]
fn test_login_envelope() {
    let body = r##"{
        "success": true,
        "message": "Login successful",
        "data": {
            "user": {"_id": "u1", "username": "alice", "email": "alice@example.com", "profile": {"displayName": "Alice"}},
            "token": "T"
        }
    }"##;

    let envelope: ApiResponse<AuthResponse> = serde_json::from_str(body).unwrap();
    let auth = envelope.data.unwrap();
    assert_eq!(auth.token, "T");
    assert_eq!(auth.user.display_name(), "Alice");
}

#[test]
fn test_validation_failure_envelope() {
    let body = r##"{
        "success": false,
        "message": "Validation failed",
        "errors": [
            {"field": "email", "message": "Email is invalid"},
            {"field": "password", "message": "Password is too short"}
        ]
    }"##;

    let envelope: ApiResponse<AuthResponse> = serde_json::from_str(body).unwrap();
    let errors = envelope.errors.clone().unwrap();
    assert_eq!(errors[1].field, "password");
    assert_eq!(envelope.message_or("Registration failed"), "Validation failed");
}

#[test]
fn test_knowledge_element_list() {
    let body = r##"[
        {"id": "ke-1", "type": "points", "content": {"title": "Principles", "text": "1. Trade-offs", "mindmap": "mindmap\n  root((Principles))"}},
        {"id": "ke-3", "type": "deck", "content": {"title": "Terms", "cards": [{"term": "GDP", "definition": "Gross domestic product"}]}}
    ]"##;

    let elements: Vec<KnowledgeElement> = serde_json::from_str(body).unwrap();
    assert_eq!(elements.len(), 2);
    assert!(matches!(
        &elements[0].content,
        KnowledgeContent::Points { mindmap: Some(_), .. }
    ));
    match &elements[1].content {
        KnowledgeContent::Deck { cards, .. } => assert_eq!(cards[0].term, "GDP"),
        other => panic!("Expected deck, got {:?}", other),
    }
}

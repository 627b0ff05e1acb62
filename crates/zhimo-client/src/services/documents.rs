//! Document service.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use zhimo_core::{
    defaults, ApiResponse, DeleteResponse, Document, DocumentQueryParams, DocumentSource,
    DocumentUpdateRequest, DocumentUploadResponse, Error, MarkdownContent, Result, UploadFile,
};

use super::{document_path, normalize};
use crate::transport::ApiClient;

/// CRUD over documents.
#[derive(Debug, Clone)]
pub struct DocumentService {
    client: ApiClient,
}

impl DocumentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Upload a file as multipart form data.
    ///
    /// Fields: `document` (the file), `title`, and `tags` joined by commas,
    /// which is omitted when there are no tags.
    pub async fn upload_document(
        &self,
        file: UploadFile,
        title: &str,
        tags: &[String],
    ) -> Result<ApiResponse<DocumentUploadResponse>> {
        let size = file.bytes.len();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| Error::InvalidInput(format!("Invalid MIME type {}: {}", file.mime_type, e)))?;

        let mut form = Form::new()
            .part("document", part)
            .text("title", title.to_string());

        if !tags.is_empty() {
            form = form.text("tags", tags.join(","));
        }

        info!(file_name = %file.file_name, size, title, "Uploading document");

        self.client
            .upload("/documents/upload", form)
            .await
            .map_err(|e| normalize(e, defaults::MSG_UPLOAD_FAILED))
    }

    /// List documents matching `params`.
    pub async fn get_documents(
        &self,
        params: &DocumentQueryParams,
    ) -> Result<ApiResponse<Vec<Document>>> {
        self.client
            .get_with_query("/documents", params)
            .await
            .map_err(|e| normalize(e, defaults::MSG_LIST_FAILED))
    }

    pub async fn get_document(&self, id: &str) -> Result<ApiResponse<Document>> {
        self.client
            .get(&document_path(id, ""))
            .await
            .map_err(|e| normalize(e, defaults::MSG_DETAIL_FAILED))
    }

    pub async fn get_document_markdown(&self, id: &str) -> Result<ApiResponse<MarkdownContent>> {
        self.client
            .get(&document_path(id, "/markdown"))
            .await
            .map_err(|e| normalize(e, defaults::MSG_MARKDOWN_FAILED))
    }

    pub async fn update_document(
        &self,
        id: &str,
        request: &DocumentUpdateRequest,
    ) -> Result<ApiResponse<Document>> {
        self.client
            .put(&document_path(id, ""), request)
            .await
            .map_err(|e| normalize(e, defaults::MSG_UPDATE_FAILED))
    }

    pub async fn delete_document(&self, id: &str) -> Result<ApiResponse<DeleteResponse>> {
        debug!(document_id = id, "Deleting document");
        self.client
            .delete(&document_path(id, ""))
            .await
            .map_err(|e| normalize(e, defaults::MSG_DELETE_FAILED))
    }
}

#[async_trait]
impl DocumentSource for DocumentService {
    async fn fetch_document(&self, id: &str) -> Result<ApiResponse<Document>> {
        self.get_document(id).await
    }
}

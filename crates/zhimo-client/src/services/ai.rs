//! AI document-processing service.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use zhimo_core::{
    defaults, ApiResponse, BatchProcessRequest, BatchProcessResponse, ConceptsRequest,
    ConceptsResponse, ExercisesRequest, ExercisesResponse, MindmapRequest, MindmapResponse,
    RestructureRequest, RestructureResponse, Result, SummaryRequest, SummaryResponse,
};

use super::{document_path, normalize};
use crate::transport::ApiClient;

/// Triggers server-side AI operations on a processed document.
#[derive(Debug, Clone)]
pub struct AiService {
    client: ApiClient,
}

impl AiService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn restructure_document(
        &self,
        document_id: &str,
        options: &RestructureRequest,
    ) -> Result<ApiResponse<RestructureResponse>> {
        self.call(document_id, "restructure", options, defaults::MSG_RESTRUCTURE_FAILED)
            .await
    }

    pub async fn generate_summary(
        &self,
        document_id: &str,
        options: &SummaryRequest,
    ) -> Result<ApiResponse<SummaryResponse>> {
        self.call(document_id, "summary", options, defaults::MSG_SUMMARY_FAILED)
            .await
    }

    pub async fn generate_exercises(
        &self,
        document_id: &str,
        options: &ExercisesRequest,
    ) -> Result<ApiResponse<ExercisesResponse>> {
        self.call(document_id, "exercises", options, defaults::MSG_EXERCISES_FAILED)
            .await
    }

    pub async fn extract_concepts(
        &self,
        document_id: &str,
        options: &ConceptsRequest,
    ) -> Result<ApiResponse<ConceptsResponse>> {
        self.call(document_id, "concepts", options, defaults::MSG_CONCEPTS_FAILED)
            .await
    }

    /// Generate mermaid mind map markup.
    pub async fn generate_mindmap(
        &self,
        document_id: &str,
        options: &MindmapRequest,
    ) -> Result<ApiResponse<MindmapResponse>> {
        self.call(document_id, "mindmap", options, defaults::MSG_MINDMAP_FAILED)
            .await
    }

    /// Run several operations in one request.
    pub async fn batch_process(
        &self,
        document_id: &str,
        options: &BatchProcessRequest,
    ) -> Result<ApiResponse<BatchProcessResponse>> {
        self.call(document_id, "process", options, defaults::MSG_BATCH_FAILED)
            .await
    }

    /// POST `/documents/{id}/ai/{operation}`.
    async fn call<B, T>(
        &self,
        document_id: &str,
        operation: &str,
        options: &B,
        fallback: &str,
    ) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(document_id, operation, "Requesting AI operation");
        self.client
            .post(&document_path(document_id, &format!("/ai/{}", operation)), options)
            .await
            .map_err(|e| normalize(e, fallback))
    }
}

//! HTTP transport for the zhimo backend.
//!
//! Every request carries the bearer credential currently held in session
//! storage. A 401 from any endpoint wipes the stored session before the error
//! reaches the caller, independent of which service issued the request.

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use zhimo_core::{defaults, ApiResponse, Error, KeyValueStorage, Result};

use crate::config::ClientConfig;

/// Result type for raw transport calls.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Failure of a single HTTP exchange, before any service-level normalization.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, timeout, or protocol failure.
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        /// `message` field of the response body, when the body had one.
        message: Option<String>,
    },

    /// A 2xx body that is not a valid envelope for the expected payload.
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl TransportError {
    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }

    /// The server-provided message carried by a structured error body.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client shared by all resource services.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new client reading credentials from `storage`.
    pub fn new(config: ClientConfig, storage: Arc<dyn KeyValueStorage>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            "Initializing API client"
        );

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            storage,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session storage this client reads the credential from.
    pub fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        &self.storage
    }

    // ----------------------------------------------------------------------------
    // Verbs
    // ----------------------------------------------------------------------------

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> TransportResult<ApiResponse<T>> {
        self.send(self.request(Method::GET, path)).await
    }

    /// GET with serialized query parameters.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> TransportResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> TransportResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> TransportResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> TransportResult<ApiResponse<T>> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// POST a multipart form.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> TransportResult<ApiResponse<T>> {
        self.send(self.request(Method::POST, path).multipart(form)).await
    }

    // ----------------------------------------------------------------------------
    // Helpers
    // ----------------------------------------------------------------------------

    /// Build a request with the stored bearer credential, if any.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "Dispatching request");

        let req = self.http.request(method, &url);
        match self.storage.get(defaults::TOKEN_KEY) {
            Some(token) if !token.is_empty() => req.bearer_auth(token),
            _ => req,
        }
    }

    /// Send a request and decode the envelope, mapping failures to `TransportError`.
    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> TransportResult<ApiResponse<T>> {
        let response = req.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.clear_session();
        }

        if !status.is_success() {
            let message = response
                .bytes()
                .await
                .ok()
                .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
                .and_then(|body| body.message)
                .filter(|m| !m.is_empty());

            debug!(status = status.as_u16(), message = ?message, "Request failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }

    /// Erase the stored credential and user snapshot.
    fn clear_session(&self) {
        for key in [defaults::TOKEN_KEY, defaults::USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Failed to clear session key");
            }
        }
        warn!("Authentication expired or invalid, stored session cleared");
    }
}

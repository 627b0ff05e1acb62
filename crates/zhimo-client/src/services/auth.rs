//! Authentication service.

use std::sync::Arc;

use tracing::{info, warn};

use zhimo_core::{
    defaults, ApiResponse, AuthResponse, KeyValueStorage, LoginRequest, RegisterRequest, Result,
    Session, User,
};

use super::normalize;
use crate::transport::ApiClient;

/// Register, log in, and manage the persisted session.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        self.client.storage()
    }

    /// Create an account. A successful response is persisted as the current session.
    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse<AuthResponse>> {
        let response = self
            .client
            .post::<AuthResponse, _>("/auth/register", request)
            .await
            .map_err(|e| normalize(e, defaults::MSG_REGISTER_FAILED))?;

        self.persist(&response)?;
        Ok(response)
    }

    /// Log in. A successful response is persisted as the current session.
    pub async fn login(&self, request: &LoginRequest) -> Result<ApiResponse<AuthResponse>> {
        let response = self
            .client
            .post::<AuthResponse, _>("/auth/login", request)
            .await
            .map_err(|e| normalize(e, defaults::MSG_LOGIN_FAILED))?;

        self.persist(&response)?;
        Ok(response)
    }

    /// Erase the stored credential and user snapshot.
    pub fn logout(&self) -> Result<()> {
        self.storage().remove(defaults::TOKEN_KEY)?;
        self.storage().remove(defaults::USER_KEY)?;
        info!("Logged out");
        Ok(())
    }

    /// The stored user snapshot. An undecodable snapshot reads as absent.
    pub fn current_user(&self) -> Option<User> {
        let raw = self.storage().get(defaults::USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Ignoring undecodable stored user snapshot");
                None
            }
        }
    }

    /// Whether a credential is stored.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.storage()
            .get(defaults::TOKEN_KEY)
            .filter(|t| !t.is_empty())
    }

    /// Credential and user together, when both are stored.
    pub fn session(&self) -> Option<Session> {
        Some(Session {
            token: self.token()?,
            user: self.current_user()?,
        })
    }

    fn persist(&self, response: &ApiResponse<AuthResponse>) -> Result<()> {
        if !response.success {
            return Ok(());
        }
        let Some(auth) = &response.data else {
            return Ok(());
        };

        // User snapshot first: a credential is never stored without its user.
        self.storage()
            .set(defaults::USER_KEY, &serde_json::to_string(&auth.user)?)?;
        if let Err(e) = self.storage().set(defaults::TOKEN_KEY, &auth.token) {
            warn!(error = %e, "Failed to store credential, discarding session");
            self.storage().remove(defaults::USER_KEY).ok();
            self.storage().remove(defaults::TOKEN_KEY).ok();
            return Err(e);
        }

        info!(user_id = %auth.user.id, username = %auth.user.username, "Session stored");
        Ok(())
    }
}

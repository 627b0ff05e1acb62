//! Session state container.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use zhimo_client::AuthService;
use zhimo_core::{
    defaults, ApiResponse, AuthResponse, Error, LoginRequest, RegisterRequest, Result, User,
};

/// Current user plus transient flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Profile display name, else username, else empty.
    pub fn display_name(&self) -> &str {
        self.user.as_ref().map(User::display_name).unwrap_or("")
    }
}

/// Holds the logged-in user and drives the auth service.
pub struct AuthStore {
    service: AuthService,
    state: RwLock<AuthSnapshot>,
}

impl AuthStore {
    /// Create the store and restore any persisted session.
    pub fn new(service: AuthService) -> Self {
        let store = Self {
            service,
            state: RwLock::new(AuthSnapshot::default()),
        };
        store.initialize();
        store
    }

    /// Restore the user when both a credential and a user snapshot are stored.
    pub fn initialize(&self) {
        let user = match (self.service.current_user(), self.service.is_authenticated()) {
            (Some(user), true) => user,
            _ => return,
        };
        debug!(user_id = %user.id, "Restored session");
        self.write().user = Some(user);
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn display_name(&self) -> String {
        self.read().display_name().to_string()
    }

    pub fn token(&self) -> Option<String> {
        self.service.token()
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.begin();
        let result = self.service.register(request).await;
        self.finish(result, defaults::MSG_REGISTER_FAILED)
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.begin();
        let result = self.service.login(request).await;
        self.finish(result, defaults::MSG_LOGIN_FAILED)
    }

    /// Erase the stored session and forget the user.
    pub fn logout(&self) -> Result<()> {
        let result = self.service.logout();
        let mut state = self.write();
        state.user = None;
        state.error = None;
        result
    }

    pub fn clear_error(&self) {
        self.write().error = None;
    }

    fn begin(&self) {
        let mut state = self.write();
        state.is_loading = true;
        state.error = None;
    }

    fn finish(
        &self,
        result: Result<ApiResponse<AuthResponse>>,
        fallback: &str,
    ) -> Result<AuthResponse> {
        let outcome = result.and_then(|response| {
            let message = response.message_or(fallback).to_string();
            response.into_success_data().ok_or(Error::Api(message))
        });

        let mut state = self.write();
        state.is_loading = false;
        match outcome {
            Ok(auth) => {
                info!(username = %auth.user.username, "Authenticated");
                state.user = Some(auth.user.clone());
                Ok(auth)
            }
            Err(e) => {
                warn!(error = %e, "Authentication failed");
                state.error = Some(e.message());
                Err(e)
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthSnapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthSnapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

//! Session Handling
//!
//! Login, guest login, restore-from-token and logout. The bearer token is the
//! only durable client state and lives behind a `TokenStorage`.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{LoginRequest, LoginResponse, SignupRequest, User};
use crate::error::SessionError;
use crate::gateway::{AuthGateway, GatewayResult};

/// Durable home of the bearer token
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Option<String>;

    fn save(&self, token: &str) -> Result<(), String>;

    fn clear(&self);
}

/// Usable token, treating the prototype's `""` / `"undefined"` leftovers as absent
pub fn stored_token(storage: &dyn TokenStorage) -> Option<String> {
    storage
        .load()
        .filter(|token| !token.is_empty() && token != "undefined")
}

/// Process-local token storage
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn save(&self, token: &str) -> Result<(), String> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.token.lock() = None;
    }
}

/// Current user plus the token store
pub struct Session<A> {
    auth: Arc<A>,
    tokens: Arc<dyn TokenStorage>,
    user: Arc<Mutex<Option<User>>>,
}

impl<A> Clone for Session<A> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
            tokens: Arc::clone(&self.tokens),
            user: Arc::clone(&self.user),
        }
    }
}

impl<A: AuthGateway> Session<A> {
    pub fn new(auth: Arc<A>, tokens: Arc<dyn TokenStorage>) -> Self {
        Self {
            auth,
            tokens,
            user: Arc::new(Mutex::new(None)),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.user.lock().clone()
    }

    pub fn token(&self) -> Option<String> {
        stored_token(self.tokens.as_ref())
    }

    /// Token storage shared with the task store
    pub fn tokens(&self) -> Arc<dyn TokenStorage> {
        Arc::clone(&self.tokens)
    }

    pub async fn login(&self, name: &str, password: &str) -> Result<User, SessionError> {
        let request = LoginRequest {
            name: name.to_string(),
            password: password.to_string(),
        };
        let result = self.auth.login(&request).await;
        self.accept_login(result)
    }

    pub async fn guest_login(&self) -> Result<User, SessionError> {
        let result = self.auth.guest_login().await;
        self.accept_login(result)
    }

    /// Register an account; the session stays signed out until `login`
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<(), SessionError> {
        let request = SignupRequest::new(name, email, password).ok_or(SessionError::MissingSignupFields)?;
        self.auth.signup(&request).await.map_err(|e| {
            log::warn!("[SESSION] Signup failed: {}", e);
            SessionError::SignupFailed
        })?;
        log::info!("[SESSION] Signed up {}", request.name);
        Ok(())
    }

    /// Reload the user behind a stored token; `Ok(None)` when there is no token
    pub async fn restore(&self) -> Result<Option<User>, SessionError> {
        let Some(token) = self.token() else {
            log::info!("[SESSION] No stored token");
            *self.user.lock() = None;
            return Ok(None);
        };

        match self.auth.current_user(&token).await {
            Ok(user) => {
                log::info!("[SESSION] Restored user {}", user.name);
                *self.user.lock() = Some(user.clone());
                Ok(Some(user))
            }
            Err(e) => {
                log::warn!("[SESSION] Failed to load user: {}", e);
                *self.user.lock() = None;
                Err(SessionError::LoadUserFailed(e.to_string()))
            }
        }
    }

    pub fn logout(&self) {
        self.tokens.clear();
        *self.user.lock() = None;
        log::info!("[SESSION] Logged out");
    }

    fn accept_login(&self, result: GatewayResult<LoginResponse>) -> Result<User, SessionError> {
        let response = result.map_err(|e| {
            log::warn!("[SESSION] Login failed: {}", e);
            SessionError::LoginFailed
        })?;
        self.tokens
            .save(&response.token)
            .map_err(SessionError::TokenStorage)?;
        log::info!("[SESSION] Logged in as {}", response.user.name);
        *self.user.lock() = Some(response.user.clone());
        Ok(response.user)
    }
}

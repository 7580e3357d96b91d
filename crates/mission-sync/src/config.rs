//! Client Configuration
//!
//! Backend location, endpoint paths and the local-storage key for the token.
//! Every field has a default so partial JSON overrides are accepted.

use serde::{Deserialize, Serialize};

use crate::domain::LoginRequest;
use crate::error::ConfigError;

/// Local-storage key holding the bearer token
pub const DEFAULT_TOKEN_KEY: &str = "login_token";

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// REST paths relative to the base URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// list / create / update / delete share one path
    pub tasks: String,
    pub complete_task: String,
    pub login: String,
    pub guest_login: String,
    pub signup: String,
    pub current_user: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            tasks: "/api/todo".to_string(),
            complete_task: "/api/todo/complete".to_string(),
            login: "/api/auth/login".to_string(),
            guest_login: "/api/auth/guest_login".to_string(),
            signup: "/api/auth/signup".to_string(),
            current_user: "/api/auth/current_user".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub endpoints: Endpoints,
    pub token_key: String,
    /// Credentials used by guest login; `None` disables it
    pub guest: Option<LoginRequest>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoints: Endpoints::default(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            guest: Some(LoginRequest {
                name: "guest".to_string(),
                password: "guest".to_string(),
            }),
        }
    }
}

impl ClientConfig {
    /// Parse a (possibly partial) JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Replace the base URL, e.g. with the page origin
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.base_url = base_url.into();
        self.validated()
    }

    /// Absolute URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let parsed = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::BaseUrl(format!("{}: {}", self.base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::BaseUrl(format!(
                "{}: unsupported scheme {}",
                self.base_url,
                parsed.scheme()
            )));
        }
        Ok(self)
    }
}

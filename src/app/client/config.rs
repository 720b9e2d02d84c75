//! HTTP client configuration and building logic

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::http;
use crate::errors::{DownloadError, DownloadResult};

/// Configuration for the HTTP transport collaborator
///
/// Server API paths are resolved against `rest_api_base_url` or
/// `web_api_base_url`; authentication uses a bearer token when present,
/// falling back to basic auth when a login is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the server's REST API (no trailing slash)
    pub rest_api_base_url: String,
    /// Base URL of the server's legacy web API (no trailing slash)
    pub web_api_base_url: String,
    /// Bearer token, preferred when set
    pub token: Option<String>,
    /// Login for basic auth
    pub login: Option<String>,
    /// Password for basic auth (empty when None)
    pub password: Option<String>,
    /// Request timeout
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rest_api_base_url: String::new(),
            web_api_base_url: String::new(),
            token: None,
            login: None,
            password: None,
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for a server exposing both API surfaces
    pub fn new(rest_api_base_url: impl Into<String>, web_api_base_url: impl Into<String>) -> Self {
        Self {
            rest_api_base_url: rest_api_base_url.into(),
            web_api_base_url: web_api_base_url.into(),
            ..Default::default()
        }
    }

    /// Authenticate with a bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Authenticate with basic credentials
    pub fn with_credentials(
        mut self,
        login: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        self.login = Some(login.into());
        self.password = password;
        self
    }

    /// Build the blocking HTTP client with the configured timeouts
    pub fn build_http_client(&self) -> DownloadResult<reqwest::blocking::Client> {
        reqwest::blocking::Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(http::USER_AGENT)
            .build()
            .map_err(DownloadError::Http)
    }
}

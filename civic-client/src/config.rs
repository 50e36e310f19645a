//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | CIVIC_API_URL | http://localhost:5000/api | API base URL |
//! | CIVIC_REQUEST_TIMEOUT_SECS | 30 | transport timeout |
//! | CIVIC_SESSION_DIR | .civic-desk | where `token`, `user`, `role` are kept |
//!
//! A `.env` file in the working directory is loaded first if present.

use std::path::PathBuf;

use crate::api::CivicApi;
use crate::client::NetworkHttpClient;
use crate::error::ClientResult;
use crate::session::{CredentialStore, SessionContext};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SESSION_DIR: &str = ".civic-desk";

/// Client configuration for connecting to the complaint desk API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000/api")
    pub base_url: String,

    /// Bearer token to start with (normally restored from the session dir)
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory holding the persisted session; `None` keeps the session in memory only
    pub session_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            session_dir: None,
        }
    }

    /// Load configuration from the environment (after reading `.env`)
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let base_url = std::env::var("CIVIC_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let timeout = std::env::var("CIVIC_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let session_dir = std::env::var("CIVIC_SESSION_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_DIR));

        Self::new(base_url)
            .with_timeout(timeout)
            .with_session_dir(session_dir)
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist the session under `dir`
    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = Some(dir.into());
        self
    }

    /// Create a network HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }

    /// Credential store for the configured session dir, if any
    pub fn credential_store(&self) -> Option<CredentialStore> {
        self.session_dir.as_ref().map(CredentialStore::new)
    }

    /// Build a session context over the network transport
    pub fn build_session(&self) -> ClientResult<SessionContext<NetworkHttpClient>> {
        let api = CivicApi::new(self.build_http_client()?);
        Ok(SessionContext::new(api, self.credential_store()))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

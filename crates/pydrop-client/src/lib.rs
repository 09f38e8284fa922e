//! HTTP client for the Pydrop API.
//!
//! Provides a Bearer-authenticated client with upload, list, and download
//! methods, plus the upload widget state machine in [`state`]. Uploads stream
//! the file body in chunks so callers can observe transfer progress.

pub mod api;
pub mod state;

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

/// API route prefix shared by all endpoints.
pub fn api_prefix() -> &'static str {
    "/api"
}

/// How an upload attempt failed, as surfaced to the widget.
///
/// Server-reported failures carry the server's literal `error` message;
/// transport failures collapse to a generic network message so internals
/// never reach the UI.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Network error. Please check your connection and try again.")]
    Network(#[source] reqwest::Error),
}

impl UploadError {
    /// The message shown to the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// HTTP client for the Pydrop API with Bearer token auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: String, token: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Create client from environment: PYDROP_API_URL (or API_URL) and
    /// PYDROP_TOKEN (or JWT_TOKEN).
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("PYDROP_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let token = std::env::var("PYDROP_TOKEN")
            .or_else(|_| std::env::var("JWT_TOKEN"))
            .context("Missing token. Set PYDROP_TOKEN or JWT_TOKEN")?;

        Self::new(base_url, token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("Authorization", format!("Bearer {}", self.token))
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

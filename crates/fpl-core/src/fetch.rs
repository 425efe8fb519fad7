// Bootstrap fetcher: a single GET against the FPL API.
//
// The pipeline only sees the `BootstrapSource` trait, so tests can feed a
// fixed JSON document without opening a socket.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ApiConfig;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Anything that prevents a parsed bootstrap document from being returned.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        source: reqwest::Error,
    },

    #[error("response from {url} is not valid JSON: {source}")]
    MalformedJson {
        url: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// BootstrapSource
// ---------------------------------------------------------------------------

/// Something that can produce the raw bootstrap JSON document.
#[async_trait]
pub trait BootstrapSource: Send + Sync {
    /// Human-readable origin of the document, used in logs and the status bar.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Value, FetchError>;
}

/// Fetches the bootstrap document over HTTP. No retries, no custom timeout.
pub struct HttpBootstrapSource {
    http: reqwest::Client,
    url: String,
}

impl HttpBootstrapSource {
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        Self::build(url.into(), None)
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self, FetchError> {
        Self::build(api.url.clone(), api.user_agent.as_deref())
    }

    fn build(url: String, user_agent: Option<&str>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent.to_string());
        }
        let http = builder.build().map_err(FetchError::Client)?;
        Ok(Self { http, url })
    }
}

#[async_trait]
impl BootstrapSource for HttpBootstrapSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        info!("Fetching bootstrap document from {}", self.url);

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: self.url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Body {
            url: self.url.clone(),
            source: e,
        })?;
        debug!(bytes = body.len(), "bootstrap body received");

        serde_json::from_str(&body).map_err(|e| FetchError::MalformedJson {
            url: self.url.clone(),
            source: e,
        })
    }
}

/// A source that hands back an already-parsed document.
pub struct StaticBootstrapSource {
    document: Value,
}

impl StaticBootstrapSource {
    pub fn new(document: Value) -> Self {
        Self { document }
    }
}

#[async_trait]
impl BootstrapSource for StaticBootstrapSource {
    fn describe(&self) -> String {
        "static document".to_string()
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        Ok(self.document.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! HTTP transport seam
//!
//! The client talks to the wire through the [`Transport`] trait so tests can
//! substitute a scripted implementation and callers can supply their own
//! connection management. [`HttpTransport`] is the reqwest-backed default.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Status code plus unparsed body, exactly as the wire delivered it
///
/// Interpretation (status classification, JSON parsing, error detail
/// extraction) happens in the client, not the transport.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// One-shot HTTP operations against absolute URLs
///
/// Implementations perform a single attempt per call: no retries, no
/// backoff. A returned error means no response was obtained at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<RawResponse>;

    /// Plain GET
    async fn get(&self, url: &str) -> Result<RawResponse>;
}

/// Default transport backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport honoring the config's timeout choice
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<RawResponse> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::read(response).await
    }

    async fn get(&self, url: &str) -> Result<RawResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::read(response).await
    }
}

//! Client configuration

use crate::error::{ClientError, Result};
use std::time::Duration;
use url::Url;

/// Base URL used when neither the builder nor the environment supplies one
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Environment variable consulted by [`ClientConfig::from_env`]
pub const API_BASE_ENV: &str = "FUND_API_URL";

/// Configuration for [`HedgeFundClient`](crate::HedgeFundClient)
///
/// No request timeout is applied unless one is opted into: an analysis run
/// is a long, non-idempotent job, so deadline policy belongs to the caller.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the analysis API
    pub base_url: String,

    /// Optional whole-request timeout; `None` waits for the transport to
    /// settle on its own
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a config pointing at the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Read the base URL from `FUND_API_URL`, falling back to the default
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(base_url)
    }

    /// Opt into a whole-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve an API path against the configured base URL
    pub fn endpoint(&self, path: &str) -> Result<String> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL {:?}: {e}", self.base_url)))?;
        let url = base
            .join(path)
            .map_err(|e| ClientError::Config(format!("invalid endpoint path {path:?}: {e}")))?;
        Ok(url.into())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

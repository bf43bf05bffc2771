//! Checklist API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_TIMEOUT_SECS: u64 = 300;
const MAX_FETCH_RETRIES: u32 = 5;

/// Where and how to reach the HomieHQ backend
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// API root; `http://` is assumed when no scheme is given
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Extra attempts for get-checklist on transient failures
    #[serde(default)]
    pub max_fetch_retries: u32,
}

impl ApiConfig {
    /// Get the request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(ValidationError::MissingRequired("API__BASE_URL"));
        }
        if base_url.contains(char::is_whitespace) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        if let Some((scheme, _)) = base_url.split_once("://") {
            if scheme != "http" && scheme != "https" {
                return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
            }
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout(self.timeout_secs));
        }
        if self.max_fetch_retries > MAX_FETCH_RETRIES {
            return Err(ValidationError::TooManyRetries(self.max_fetch_retries));
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_fetch_retries: 0,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5008/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

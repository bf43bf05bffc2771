//! Reqwest Checklist Client - Implementation of ChecklistApi over REST.
//!
//! Talks to the maintenance checklist endpoints of the HomieHQ backend.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ChecklistApiConfig::new("api.homiehq.local/api")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_max_fetch_retries(2);
//!
//! let api = ReqwestChecklistApi::new(config, Arc::new(StaticAccessToken::new("token")))?;
//! ```
//!
//! # Retries
//!
//! Only the get-checklist call is retried, and only on timeouts, transport
//! errors and 5xx responses. Mutations are sent exactly once.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;
use tokio::time::sleep;
use uuid::Uuid;

use crate::domain::checklist::{ChecklistItemUpdate, NewChecklistItem, Season, ToggleAck};
use crate::domain::foundation::{ChecklistItemId, PropertyId};
use crate::ports::{AccessTokenProvider, ApiError, ChecklistApi};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

const RETRY_BASE_DELAY: Duration = Duration::from_millis(100);
const RETRY_MAX_DELAY: Duration = Duration::from_secs(10);

/// Exponential backoff for the retry after `attempt` failures, capped.
fn retry_delay(attempt: u32) -> Duration {
    RETRY_BASE_DELAY
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(RETRY_MAX_DELAY)
}

/// Configuration for the checklist REST client.
#[derive(Debug, Clone)]
pub struct ChecklistApiConfig {
    /// API root, e.g. `http://localhost:5008/api`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Extra attempts for get-checklist on transient failures.
    pub max_fetch_retries: u32,
}

impl ChecklistApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_fetch_retries(mut self, retries: u32) -> Self {
        self.max_fetch_retries = retries;
        self
    }

    /// Base URL with a scheme and without a trailing slash.
    fn normalized_base_url(&self) -> String {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        }
    }
}

impl Default for ChecklistApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5008/api".to_string(),
            timeout: Duration::from_secs(30),
            max_fetch_retries: 0,
        }
    }
}

/// `ChecklistApi` backed by the HomieHQ REST backend.
pub struct ReqwestChecklistApi {
    client: Client,
    base_url: Url,
    timeout: Duration,
    max_fetch_retries: u32,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl ReqwestChecklistApi {
    pub fn new(
        config: ChecklistApiConfig,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {}", e)))?;

        let raw = config.normalized_base_url();
        let base_url = Url::parse(&raw)
            .map_err(|e| ApiError::network(format!("Invalid base URL '{}': {}", raw, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::network(format!("Invalid base URL '{}'", raw)));
        }

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
            max_fetch_retries: config.max_fetch_retries,
            tokens,
        })
    }

    /// Builds a checklist endpoint URL. Each segment is percent-encoded and
    /// the path ends with a slash.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::network(format!("Invalid base URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(["maintenance", "checklist"])
            .extend(segments)
            .push("");
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request_id = Uuid::new_v4();
        tracing::debug!(%method, %url, %request_id, "Checklist API request");

        let builder = self
            .client
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id.to_string());

        match self.tokens.access_token() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                }
            } else if e.is_connect() {
                ApiError::network(format!("Connection failed: {}", e))
            } else {
                ApiError::network(e.to_string())
            }
        })?;

        Self::handle_response_status(response).await
    }

    /// Maps non-success statuses, preferring the backend's `{"error": ...}` text.
    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    body
                }
            });

        Err(ApiError::from_status(status.as_u16(), message))
    }

    async fn get_once(&self, property_id: &PropertyId, season: Season) -> Result<Value, ApiError> {
        let builder = self
            .request(Method::GET, self.url(&[season.as_str()])?)
            .query(&[("property_id", property_id.to_string())]);
        let response = self.send(builder).await?;

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::decode(e.to_string()))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[async_trait]
impl ChecklistApi for ReqwestChecklistApi {
    async fn get_checklist(
        &self,
        property_id: &PropertyId,
        season: Season,
    ) -> Result<Value, ApiError> {
        let mut attempt = 0;
        loop {
            match self.get_once(property_id, season).await {
                Ok(payload) => return Ok(payload),
                Err(err) if err.is_retryable() && attempt < self.max_fetch_retries => {
                    let delay = retry_delay(attempt);
                    tracing::warn!(
                        %property_id,
                        %season,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retrying checklist fetch"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn create_item(&self, item: &NewChecklistItem) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, self.url(&[])?).json(item);
        self.send(builder).await?;
        Ok(())
    }

    async fn update_item(
        &self,
        id: &ChecklistItemId,
        update: &ChecklistItemUpdate,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(Method::PUT, self.url(&[id.to_string().as_str()])?)
            .json(update);
        self.send(builder).await?;
        Ok(())
    }

    async fn toggle_item(&self, id: &ChecklistItemId) -> Result<Option<ToggleAck>, ApiError> {
        let builder = self
            .request(Method::PUT, self.url(&[id.to_string().as_str(), "toggle"])?)
            .json(&serde_json::json!({}));
        let response = self.send(builder).await?;

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<ToggleAck>(&body) {
            Ok(ack) => Ok(Some(ack)),
            Err(e) => {
                // The toggle was applied; only the echo is unusable.
                tracing::warn!(item_id = %id, error = %e, "Ignoring malformed toggle response");
                Ok(None)
            }
        }
    }

    async fn delete_item(&self, id: &ChecklistItemId) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, self.url(&[id.to_string().as_str()])?);
        self.send(builder).await?;
        Ok(())
    }

    async fn reset_checklist(
        &self,
        property_id: &PropertyId,
        season: Season,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, self.url(&["reset", season.as_str()])?)
            .query(&[("property_id", property_id.to_string())])
            .json(&serde_json::json!({}));
        self.send(builder).await?;
        Ok(())
    }
}

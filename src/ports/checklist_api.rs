//! Checklist API port - the REST collaborator behind the checklist engine.
//!
//! The get operation returns the raw JSON payload on purpose: the backend
//! answers with either a bare array or an `{items: [...]}` envelope, and the
//! aggregator owns the single normalization step for both shapes.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::checklist::{ChecklistItemUpdate, NewChecklistItem, Season, ToggleAck};
use crate::domain::foundation::{ChecklistItemId, PropertyId};

/// Operations against the checklist resource, scoped by property and season.
#[async_trait]
pub trait ChecklistApi: Send + Sync {
    /// Lists items for a property and season, as returned by the server.
    async fn get_checklist(
        &self,
        property_id: &PropertyId,
        season: Season,
    ) -> Result<Value, ApiError>;

    /// Creates a custom (non-default) item. The server assigns the id.
    async fn create_item(&self, item: &NewChecklistItem) -> Result<(), ApiError>;

    /// Edits task and description of an existing item.
    async fn update_item(
        &self,
        id: &ChecklistItemId,
        update: &ChecklistItemUpdate,
    ) -> Result<(), ApiError>;

    /// Flips completion. `None` means the server acknowledged without a body.
    async fn toggle_item(&self, id: &ChecklistItemId) -> Result<Option<ToggleAck>, ApiError>;

    /// Removes an item.
    async fn delete_item(&self, id: &ChecklistItemId) -> Result<(), ApiError>;

    /// Replaces a season's items with the default templates.
    async fn reset_checklist(&self, property_id: &PropertyId, season: Season)
        -> Result<(), ApiError>;
}

/// Errors reported by a checklist API implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ApiError::Decode(message.into())
    }

    /// Builds the error for a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound(message),
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::Rejected { status, message },
        }
    }

    /// Transient failures that may succeed if an idempotent request is repeated.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout { .. } | ApiError::Network(_) | ApiError::Server { .. }
        )
    }
}

//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Bearer token for the backend, when one is supplied up front
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Access token sent as `Authorization: Bearer <token>`
    #[serde(default)]
    pub access_token: Option<Secret<String>>,
}

impl AuthConfig {
    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Validate authentication configuration
    ///
    /// The token is optional; a present one must not be blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.access_token {
            Some(token) if token.expose_secret().trim().is_empty() => {
                Err(ValidationError::BlankAccessToken)
            }
            _ => Ok(()),
        }
    }
}

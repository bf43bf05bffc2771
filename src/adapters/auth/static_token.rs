//! Static access token adapter.
//!
//! Holds a token supplied up front, from configuration or a test. It never
//! refreshes; an expired token surfaces as `ApiError::Unauthorized`.

use secrecy::Secret;

use crate::ports::AccessTokenProvider;

/// Token provider that always returns the same token (or none).
#[derive(Debug, Clone, Default)]
pub struct StaticAccessToken {
    token: Option<Secret<String>>,
}

impl StaticAccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(Secret::new(token.into())),
        }
    }

    /// Signed-out provider. Requests go out without an `Authorization` header.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_secret(token: Option<Secret<String>>) -> Self {
        Self { token }
    }
}

impl AccessTokenProvider for StaticAccessToken {
    fn access_token(&self) -> Option<Secret<String>> {
        self.token.clone()
    }
}

//! Access token port - where the bearer token for API calls comes from.

use secrecy::Secret;

/// Supplies the current bearer token, if the user is signed in.
///
/// Token storage, refresh and expiry belong to the auth collaborator; the
/// checklist engine only asks whether a token is present.
pub trait AccessTokenProvider: Send + Sync {
    fn access_token(&self) -> Option<Secret<String>>;
}

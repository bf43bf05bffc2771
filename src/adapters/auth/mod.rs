//! Authentication adapters.
//!
//! Implementations of the `AccessTokenProvider` port:
//!
//! - `static_token` - A fixed token from configuration, or none

mod static_token;

pub use static_token::StaticAccessToken;

//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the checklist engine to external systems:
//! - `http` - REST client for the HomieHQ backend
//! - `auth` - Access token providers
//! - `memory` - In-process backend with server semantics
//! - `prompt` - Confirmation prompts for destructive operations

pub mod auth;
pub mod http;
pub mod memory;
pub mod prompt;

pub use auth::StaticAccessToken;
pub use http::{ChecklistApiConfig, ReqwestChecklistApi};
pub use memory::{InMemoryChecklistApi, Operation};
pub use prompt::{StaticConfirmation, StdinConfirmation};

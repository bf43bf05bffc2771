//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the checklist engine and the outside world. Adapters implement these ports.
//!
//! - `ChecklistApi` - The REST collaborator for checklist items
//! - `AccessTokenProvider` - Bearer token source owned by the auth layer
//! - `ConfirmationPrompt` - Yes/no confirmation for delete and reset

mod access_token;
mod checklist_api;
mod confirmation_prompt;

pub use access_token::AccessTokenProvider;
pub use checklist_api::{ApiError, ChecklistApi};
pub use confirmation_prompt::{ConfirmationPrompt, ConfirmationRequest};

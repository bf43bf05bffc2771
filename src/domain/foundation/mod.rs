//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the checklist domain.

mod errors;
mod ids;
mod percentage;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{ChecklistItemId, PropertyId};
pub use percentage::Percentage;
pub use state_machine::{InvalidTransition, StateMachine};
pub use timestamp::Timestamp;

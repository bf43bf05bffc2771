//! Application handlers.
//!
//! Query and command handlers that orchestrate domain operations over ports.

pub mod checklist;

pub use checklist::{
    ChecklistAggregator, ChecklistCoordinator, ChecklistError, EditingItem, ErrorKind,
    MutationKind, MutationOutcome,
};

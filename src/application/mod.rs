//! Application layer - Queries, Mutations, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Reads go through the aggregator; writes go through the coordinator.

pub mod handlers;

pub use handlers::{
    ChecklistAggregator, ChecklistCoordinator, ChecklistError, EditingItem, ErrorKind,
    MutationKind, MutationOutcome,
};

//! Checklist query and mutation handlers.

mod aggregator;
mod coordinator;
mod errors;
mod normalize;

pub use aggregator::ChecklistAggregator;
pub use coordinator::{ChecklistCoordinator, EditingItem, MutationOutcome};
pub use errors::{ChecklistError, ErrorKind, MutationKind};
pub use normalize::normalize_checklist_payload;

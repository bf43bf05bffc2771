//! In-memory adapters for tests and offline runs.

mod in_memory_checklist_api;

pub use in_memory_checklist_api::{InMemoryChecklistApi, Operation};

//! Domain layer containing checklist business rules and value types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, percentages, errors)
//! - `checklist` - Seasons, checklist items, stats, views, and summaries

pub mod checklist;
pub mod foundation;

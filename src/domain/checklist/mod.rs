//! Seasonal maintenance checklist domain.
//!
//! Pure types and functions: the season resolver, items, derived stats,
//! the in-memory view, and summaries across seasons and properties.

mod defaults;
mod item;
mod season;
mod stats;
mod summary;
mod view;

pub use defaults::{default_tasks, DefaultTask};
pub use item::{ChecklistItem, ChecklistItemUpdate, ItemDraft, NewChecklistItem, ToggleAck};
pub use season::Season;
pub use stats::ChecklistStats;
pub use summary::{PortfolioSummary, SeasonalSummary};
pub use view::{ChecklistView, SyncState};

//! In-memory checklist view and its synchronization state.

use serde::Serialize;

use super::{ChecklistItem, ChecklistStats, Season, ToggleAck};
use crate::domain::foundation::{ChecklistItemId, StateMachine};

/// Items for one `(property, season)` pair plus their derived stats.
///
/// Fields are private so `stats` can only change together with `items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistView {
    season: Season,
    items: Vec<ChecklistItem>,
    stats: ChecklistStats,
}

impl ChecklistView {
    pub fn empty(season: Season) -> Self {
        Self {
            season,
            items: Vec::new(),
            stats: ChecklistStats::EMPTY,
        }
    }

    pub fn new(season: Season, items: Vec<ChecklistItem>) -> Self {
        let stats = ChecklistStats::from_items(&items);
        Self {
            season,
            items,
            stats,
        }
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn stats(&self) -> ChecklistStats {
        self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: &ChecklistItemId) -> Option<&ChecklistItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Flips one item locally and recomputes stats before returning.
    ///
    /// Returns the item's new completion state, or `None` if the id is absent.
    pub fn toggle_item(&mut self, id: &ChecklistItemId) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| &item.id == id)?;
        item.toggle();
        let completed = item.is_completed;
        self.recompute();
        Some(completed)
    }

    /// Replaces an item's completion fields with the server's answer.
    pub fn apply_toggle_ack(&mut self, id: &ChecklistItemId, ack: &ToggleAck) {
        if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
            item.apply_ack(ack);
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        self.stats = ChecklistStats::from_items(&self.items);
    }
}

/// Where a view stands relative to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Matches the backend as of the last successful fetch or mutation.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// An optimistic change is applied and its request is in flight.
    Pending,
    /// The request failed and a corrective refetch is in flight.
    Reconciling,
}

impl StateMachine for SyncState {
    fn successors(&self) -> &'static [Self] {
        use SyncState::*;
        match self {
            Idle => &[Loading, Pending],
            Loading => &[Idle],
            // Loading after a mutation the server accepted.
            Pending => &[Idle, Loading, Reconciling],
            Reconciling => &[Idle],
        }
    }
}

//! Completion statistics derived from a set of checklist items.

use serde::{Deserialize, Serialize};

use super::ChecklistItem;
use crate::domain::foundation::Percentage;

/// Derived completion numbers. Never fetched, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistStats {
    pub total_items: usize,
    pub completed_items: usize,
    pub completion_percentage: Percentage,
}

impl ChecklistStats {
    /// Zero items, zero percent.
    pub const EMPTY: Self = Self {
        total_items: 0,
        completed_items: 0,
        completion_percentage: Percentage::ZERO,
    };

    pub fn from_items(items: &[ChecklistItem]) -> Self {
        let completed = items.iter().filter(|item| item.is_completed).count();
        Self::from_counts(completed, items.len())
    }

    pub fn from_counts(completed_items: usize, total_items: usize) -> Self {
        Self {
            total_items,
            completed_items,
            completion_percentage: Percentage::of(completed_items, total_items),
        }
    }

    /// Sums counts and recomputes the percentage from the sums.
    pub fn combine(&self, other: &ChecklistStats) -> Self {
        Self::from_counts(
            self.completed_items + other.completed_items,
            self.total_items + other.total_items,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checklist::Season;
    use crate::domain::foundation::{ChecklistItemId, PropertyId};
    use proptest::prelude::*;

    fn item(id: i64, done: bool) -> ChecklistItem {
        ChecklistItem {
            id: ChecklistItemId::from(id),
            task: format!("task {}", id),
            description: None,
            season: Season::Spring,
            property_id: PropertyId::from(1),
            is_completed: done,
            completed_at: None,
            is_default: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn one_of_three_is_33_percent() {
        let items = vec![item(1, true), item(2, false), item(3, false)];
        let stats = ChecklistStats::from_items(&items);
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.completed_items, 1);
        assert_eq!(stats.completion_percentage.value(), 33);
    }

    #[test]
    fn empty_items_yield_zero_stats() {
        assert_eq!(ChecklistStats::from_items(&[]), ChecklistStats::EMPTY);
        assert_eq!(ChecklistStats::default(), ChecklistStats::EMPTY);
    }

    #[test]
    fn combine_recomputes_from_sums() {
        let a = ChecklistStats::from_counts(1, 2);
        let b = ChecklistStats::from_counts(0, 2);
        let sum = a.combine(&b);
        assert_eq!(sum, ChecklistStats::from_counts(1, 4));
        assert_eq!(sum.completion_percentage.value(), 25);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(ChecklistStats::from_counts(1, 4)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"totalItems": 4, "completedItems": 1, "completionPercentage": 25})
        );
    }

    proptest! {
        #[test]
        fn percentage_matches_rounded_ratio(flags in proptest::collection::vec(any::<bool>(), 0..64)) {
            let items: Vec<_> = flags.iter().enumerate().map(|(i, done)| item(i as i64, *done)).collect();
            let stats = ChecklistStats::from_items(&items);
            let completed = flags.iter().filter(|f| **f).count();

            prop_assert_eq!(stats.total_items, flags.len());
            prop_assert_eq!(stats.completed_items, completed);
            let expected = if flags.is_empty() {
                0
            } else {
                ((completed * 100) as f64 / flags.len() as f64).round() as u8
            };
            prop_assert_eq!(stats.completion_percentage.value(), expected);
        }
    }
}

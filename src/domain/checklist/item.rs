//! Checklist item entity and the payloads used to create or edit one.

use serde::{Deserialize, Serialize};

use super::Season;
use crate::domain::foundation::{ChecklistItemId, PropertyId, Timestamp, ValidationError};

/// A single maintenance task scoped to one property and one season.
///
/// `completed_at` is passed through from the backend; it is never derived
/// on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub task: String,
    #[serde(default)]
    pub description: Option<String>,
    pub season: Season,
    pub property_id: PropertyId,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl ChecklistItem {
    /// Flips completion in place. Used for the optimistic half of a toggle.
    pub fn toggle(&mut self) {
        self.is_completed = !self.is_completed;
    }

    /// Overwrites completion fields with what the server confirmed.
    pub fn apply_ack(&mut self, ack: &ToggleAck) {
        self.is_completed = ack.is_completed;
        self.completed_at = ack.completed_at;
    }
}

/// Form data for adding or editing a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub task: String,
    #[serde(default)]
    pub description: String,
}

impl ItemDraft {
    pub fn new(task: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            description: description.into(),
        }
    }

    /// Prefills a draft from an existing item for editing.
    pub fn from_item(item: &ChecklistItem) -> Self {
        Self {
            task: item.task.clone(),
            description: item.description.clone().unwrap_or_default(),
        }
    }

    /// A task made only of whitespace counts as empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.task.trim().is_empty() {
            return Err(ValidationError::empty_field("task"));
        }
        Ok(())
    }

    fn description_opt(&self) -> Option<String> {
        let trimmed = self.description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Body of the create-item request. User-created items are never defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewChecklistItem {
    pub task: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub season: Season,
    pub property_id: PropertyId,
    pub is_default: bool,
}

impl NewChecklistItem {
    pub fn from_draft(
        draft: &ItemDraft,
        property_id: PropertyId,
        season: Season,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            task: draft.task.trim().to_string(),
            description: draft.description_opt(),
            season,
            property_id,
            is_default: false,
        })
    }
}

/// Body of the update-item request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItemUpdate {
    pub task: String,
    pub description: String,
}

impl ChecklistItemUpdate {
    pub fn from_draft(draft: &ItemDraft) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            task: draft.task.trim().to_string(),
            description: draft.description.trim().to_string(),
        })
    }
}

/// Partial item returned by the toggle endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToggleAck {
    #[serde(default)]
    pub id: Option<ChecklistItemId>,
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
}

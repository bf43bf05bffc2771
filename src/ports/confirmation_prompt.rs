//! Confirmation port - the yes/no step guarding destructive operations.

use async_trait::async_trait;

use crate::domain::checklist::Season;

/// What the user is being asked to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationRequest {
    DeleteItem { task: String },
    ResetChecklist { season: Season },
}

impl ConfirmationRequest {
    /// Question text shown to the user.
    pub fn prompt(&self) -> String {
        match self {
            ConfirmationRequest::DeleteItem { task } => format!(
                "Are you sure you want to delete the checklist item \"{}\"?",
                task
            ),
            ConfirmationRequest::ResetChecklist { season } => format!(
                "Reset the {} checklist to defaults? Custom tasks and completion progress will be lost.",
                season
            ),
        }
    }
}

/// Asks the user to approve a destructive operation.
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    async fn confirm(&self, request: &ConfirmationRequest) -> bool;
}

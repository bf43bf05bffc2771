//! Client-observable error kinds of the checklist engine.

use std::fmt;

use crate::domain::checklist::Season;
use crate::domain::foundation::ValidationError;
use crate::ports::ApiError;

/// The mutation a `MutationFailed` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Toggle,
    Create,
    Update,
    Delete,
    Reset,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MutationKind::Toggle => "toggle",
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
            MutationKind::Reset => "reset",
        };
        f.write_str(s)
    }
}

/// Coarse category of a `ChecklistError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    FetchFailed,
    MutationFailed,
}

/// Every failure the engine reports. Nothing else escapes the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChecklistError {
    /// Local, pre-network rejection.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The get-checklist call failed.
    #[error("Failed to load {season} checklist: {source}")]
    FetchFailed { season: Season, source: ApiError },

    /// A create/update/toggle/delete/reset call failed.
    #[error("Checklist {operation} failed: {source}")]
    MutationFailed {
        operation: MutationKind,
        source: ApiError,
    },
}

impl ChecklistError {
    pub fn fetch_failed(season: Season, source: ApiError) -> Self {
        ChecklistError::FetchFailed { season, source }
    }

    pub fn mutation_failed(operation: MutationKind, source: ApiError) -> Self {
        ChecklistError::MutationFailed { operation, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ChecklistError::Validation(_) => ErrorKind::Validation,
            ChecklistError::FetchFailed { .. } => ErrorKind::FetchFailed,
            ChecklistError::MutationFailed { .. } => ErrorKind::MutationFailed,
        }
    }

    /// Text for the dismissible inline error banner.
    pub fn user_message(&self) -> String {
        match self {
            ChecklistError::Validation(ValidationError::EmptyField { field }) if field == "task" => {
                "Item task is required".to_string()
            }
            ChecklistError::Validation(err) => err.to_string(),
            ChecklistError::FetchFailed { season, .. } => format!(
                "Failed to load {} checklist. Please try again later.",
                season
            ),
            ChecklistError::MutationFailed { operation, .. } => match operation {
                MutationKind::Toggle => "Failed to update item status. Please try again.",
                MutationKind::Create => "Failed to add checklist item. Please try again.",
                MutationKind::Update => "Failed to update checklist item. Please try again.",
                MutationKind::Delete => "Failed to delete checklist item. Please try again.",
                MutationKind::Reset => "Failed to reset checklist. Please try again.",
            }
            .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        let v: ChecklistError = ValidationError::empty_field("task").into();
        assert_eq!(v.kind(), ErrorKind::Validation);
        assert_eq!(
            ChecklistError::fetch_failed(Season::Fall, ApiError::Unauthorized).kind(),
            ErrorKind::FetchFailed
        );
        assert_eq!(
            ChecklistError::mutation_failed(MutationKind::Delete, ApiError::network("x")).kind(),
            ErrorKind::MutationFailed
        );
    }

    #[test]
    fn user_messages() {
        let v: ChecklistError = ValidationError::empty_field("task").into();
        assert_eq!(v.user_message(), "Item task is required");

        let fetch = ChecklistError::fetch_failed(Season::Summer, ApiError::network("refused"));
        assert_eq!(
            fetch.user_message(),
            "Failed to load Summer checklist. Please try again later."
        );

        let toggle = ChecklistError::mutation_failed(MutationKind::Toggle, ApiError::Unauthorized);
        assert_eq!(toggle.user_message(), "Failed to update item status. Please try again.");
    }

    #[test]
    fn display_includes_source() {
        let err = ChecklistError::mutation_failed(
            MutationKind::Reset,
            ApiError::from_status(500, "boom"),
        );
        assert_eq!(err.to_string(), "Checklist reset failed: Server error (500): boom");
    }
}

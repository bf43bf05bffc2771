//! Error types for the domain layer.

use thiserror::Error;

/// Local rejection of a value or request. Never involves the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    EmptyField { field: String },

    #[error("Invalid {field}: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The id is not part of the loaded checklist, e.g. after a season switch.
    #[error("No {entity} with id '{id}' in the current view")]
    NotInView { entity: &'static str, id: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_in_view(entity: &'static str, id: impl ToString) -> Self {
        ValidationError::NotInView {
            entity,
            id: id.to_string(),
        }
    }
}

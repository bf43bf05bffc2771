//! Opaque identifier value objects.
//!
//! The backend assigns integer ids today, but nothing in the client depends on
//! that. Identifiers accept either an integer or a string on the wire and
//! serialize back in the same form they arrived in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Wire representation shared by all identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Int(n) => write!(f, "{}", n),
            RawId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl RawId {
    fn parse(field: &str, value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        Ok(match value.parse::<i64>() {
            Ok(n) => RawId::Int(n),
            Err(_) => RawId::Text(value.to_string()),
        })
    }
}

/// Identifier of the property that owns a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(RawId);

impl PropertyId {
    /// Creates a PropertyId from text, returning error if empty.
    ///
    /// Numeric text is stored as an integer so it round-trips as a JSON number.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValidationError> {
        RawId::parse("property_id", id.as_ref()).map(Self)
    }
}

impl From<i64> for PropertyId {
    fn from(id: i64) -> Self {
        Self(RawId::Int(id))
    }
}

impl FromStr for PropertyId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Server-assigned identifier of a checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecklistItemId(RawId);

impl ChecklistItemId {
    /// Creates a ChecklistItemId from text, returning error if empty.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValidationError> {
        RawId::parse("item_id", id.as_ref()).map(Self)
    }
}

impl From<i64> for ChecklistItemId {
    fn from(id: i64) -> Self {
        Self(RawId::Int(id))
    }
}

impl FromStr for ChecklistItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ChecklistItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

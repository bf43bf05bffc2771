//! Normalization of get-checklist payloads into canonical items.
//!
//! The backend has answered with a bare array, an `{items: [...]}` envelope
//! (reset), and occasionally something else entirely. This is the only place
//! that knows about those shapes.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::checklist::{ChecklistItem, Season};
use crate::domain::foundation::{ChecklistItemId, PropertyId, Timestamp};

/// Item as it appears on the wire, with the scoping fields optional.
#[derive(Debug, Deserialize)]
struct ItemRecord {
    id: ChecklistItemId,
    task: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    season: Option<String>,
    #[serde(default)]
    property_id: Option<PropertyId>,
    #[serde(default)]
    is_completed: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    completed_at: Option<Timestamp>,
    #[serde(default)]
    is_default: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    updated_at: Option<Timestamp>,
}

/// Unreadable timestamps become `None` instead of rejecting the element.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => {
            let parsed = Timestamp::parse(&text);
            if parsed.is_none() {
                tracing::warn!(value = %text, "Ignoring unreadable checklist timestamp");
            }
            parsed
        }
        Some(other) => {
            tracing::warn!(value_type = json_type(&other), "Ignoring non-string checklist timestamp");
            None
        }
    })
}

/// Converts any payload into the items for `(property_id, season)`.
///
/// Never fails: unknown shapes yield no items, undecodable elements are
/// skipped, and elements scoped to another property or season are dropped.
pub fn normalize_checklist_payload(
    payload: &Value,
    property_id: &PropertyId,
    season: Season,
) -> Vec<ChecklistItem> {
    let elements = match payload {
        Value::Array(elements) => elements,
        Value::Object(map) => match map.get("items") {
            Some(Value::Array(elements)) => elements,
            _ => {
                tracing::warn!(%property_id, %season, "Checklist payload has no items array");
                return Vec::new();
            }
        },
        other => {
            tracing::warn!(
                %property_id,
                %season,
                payload_type = json_type(other),
                "Unexpected checklist payload shape"
            );
            return Vec::new();
        }
    };

    elements
        .iter()
        .filter_map(|element| {
            let record = match ItemRecord::deserialize(element) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping undecodable checklist item");
                    return None;
                }
            };
            into_scoped_item(record, property_id, season)
        })
        .collect()
}

fn into_scoped_item(
    record: ItemRecord,
    property_id: &PropertyId,
    season: Season,
) -> Option<ChecklistItem> {
    let item_season = match record.season.as_deref() {
        None => season,
        Some(raw) => match raw.parse::<Season>() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!(item_id = %record.id, season = raw, "Dropping item with unknown season");
                return None;
            }
        },
    };
    if item_season != season {
        tracing::warn!(item_id = %record.id, %item_season, %season, "Dropping item from another season");
        return None;
    }

    // Compared textually: the server may echo a numeric id as a string.
    if let Some(owner) = &record.property_id {
        if owner.to_string() != property_id.to_string() {
            tracing::warn!(item_id = %record.id, %owner, %property_id, "Dropping item from another property");
            return None;
        }
    }

    Some(ChecklistItem {
        id: record.id,
        task: record.task,
        description: record.description,
        season,
        property_id: property_id.clone(),
        is_completed: record.is_completed,
        completed_at: record.completed_at,
        is_default: record.is_default,
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

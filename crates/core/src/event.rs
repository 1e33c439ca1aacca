//! Timesheet entry model.
//!
//! An [`Event`] is one recorded action by a staff member on one calendar
//! day. The serialized field names (`type`, `isEdited`, `lat`/`lng`) match
//! the document format the original client produced, so existing records
//! deserialize unchanged.

use serde::{Deserialize, Serialize};

use crate::types::{EntryId, Timestamp};

/// Closed set of entry kinds.
///
/// Only `check-in`/`check-out` pairs contribute to worked hours; the rest
/// exist for record-keeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    CheckIn,
    CheckOut,
    Break,
    ClientIn,
    ClientOut,
    Pickup,
    Dropoff,
}

impl EventType {
    /// Human-readable label, stored alongside the type for display.
    pub fn label(self) -> &'static str {
        match self {
            EventType::CheckIn => "Check In",
            EventType::CheckOut => "Check Out",
            EventType::Break => "Break",
            EventType::ClientIn => "In with Client",
            EventType::ClientOut => "Out with Client",
            EventType::Pickup => "Pickup",
            EventType::Dropoff => "Dropoff",
        }
    }

    /// Whether entries of this type must carry a geolocation tag.
    pub fn requires_location(self) -> bool {
        matches!(
            self,
            EventType::CheckIn | EventType::CheckOut | EventType::ClientIn | EventType::ClientOut
        )
    }
}

/// Latitude/longitude pair attached to location-tagged entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// One recorded staff action on a specific day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique within one day's entry list; stable across edits.
    pub id: EntryId,
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Display label derived from the type.
    pub label: String,
    /// Wall-clock time of day as zero-padded `HH:MM`.
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Present only for types that require location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// UTC instant the entry was recorded (distinct from `time`, which is
    /// what the staff member says happened).
    #[serde(rename = "timestamp", default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<Timestamp>,
    /// Set when an existing entry is overwritten; never set at creation.
    #[serde(rename = "isEdited", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_edited: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_serialization_uses_kebab_case() {
        assert_eq!(serde_json::to_string(&EventType::CheckIn).unwrap(), "\"check-in\"");
        assert_eq!(serde_json::to_string(&EventType::ClientOut).unwrap(), "\"client-out\"");
        assert_eq!(serde_json::to_string(&EventType::Break).unwrap(), "\"break\"");
        let parsed: EventType = serde_json::from_str("\"dropoff\"").unwrap();
        assert_eq!(parsed, EventType::Dropoff);
    }

    #[test]
    fn test_location_required_types() {
        assert!(EventType::CheckIn.requires_location());
        assert!(EventType::CheckOut.requires_location());
        assert!(EventType::ClientIn.requires_location());
        assert!(EventType::ClientOut.requires_location());
        assert!(!EventType::Break.requires_location());
        assert!(!EventType::Pickup.requires_location());
        assert!(!EventType::Dropoff.requires_location());
    }

    #[test]
    fn test_event_roundtrips_original_document_shape() {
        // Shape produced by the original client: `type`, `isEdited`,
        // `timestamp`, optional `location`.
        let json = serde_json::json!({
            "id": 1706000000000_i64,
            "type": "check-in",
            "label": "Check In",
            "time": "09:00",
            "comment": "on site",
            "location": { "lat": 51.5, "lng": -0.12 },
            "timestamp": "2024-01-23T09:00:12Z",
            "isEdited": true
        });

        let event: Event = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(event.event_type, EventType::CheckIn);
        assert!(event.is_edited);
        assert_eq!(serde_json::to_value(&event).unwrap(), json);
    }

    #[test]
    fn test_unedited_event_omits_flag() {
        let event = Event {
            id: 1,
            event_type: EventType::Break,
            label: EventType::Break.label().to_string(),
            time: "12:00".to_string(),
            comment: None,
            location: None,
            recorded_at: None,
            is_edited: false,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("isEdited").is_none());
        assert!(value.get("location").is_none());
    }
}

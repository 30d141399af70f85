//! Level events
//!
//! An event is an open record: the few fields the timing model reads are
//! typed, everything else lives in `payload` and round-trips unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Effect kind carried by an event
///
/// Serialized as the bare type name. Names the stitcher does not need to
/// understand are kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    SetSpeed,
    Pause,
    Twirl,
    AddDecoration,
    AddObject,
    AddText,
    MoveDecorations,
    SetText,
    SetObject,
    SetDefaultText,
    PositionTrack,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::SetSpeed => "SetSpeed",
            EventType::Pause => "Pause",
            EventType::Twirl => "Twirl",
            EventType::AddDecoration => "AddDecoration",
            EventType::AddObject => "AddObject",
            EventType::AddText => "AddText",
            EventType::MoveDecorations => "MoveDecorations",
            EventType::SetText => "SetText",
            EventType::SetObject => "SetObject",
            EventType::SetDefaultText => "SetDefaultText",
            EventType::PositionTrack => "PositionTrack",
            EventType::Other(name) => name,
        }
    }
}

impl From<String> for EventType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "SetSpeed" => EventType::SetSpeed,
            "Pause" => EventType::Pause,
            "Twirl" => EventType::Twirl,
            "AddDecoration" => EventType::AddDecoration,
            "AddObject" => EventType::AddObject,
            "AddText" => EventType::AddText,
            "MoveDecorations" => EventType::MoveDecorations,
            "SetText" => EventType::SetText,
            "SetObject" => EventType::SetObject,
            "SetDefaultText" => EventType::SetDefaultText,
            "PositionTrack" => EventType::PositionTrack,
            _ => EventType::Other(name),
        }
    }
}

impl From<&str> for EventType {
    fn from(name: &str) -> Self {
        EventType::from(name.to_string())
    }
}

impl From<EventType> for String {
    fn from(kind: EventType) -> Self {
        match kind {
            EventType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tempo update carried by a `SetSpeed` event
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpeedChange {
    /// Set the tempo to an absolute BPM
    Bpm(f64),
    /// Multiply the current tempo
    Multiplier(f64),
}

impl SpeedChange {
    pub fn apply(self, bpm: f64) -> f64 {
        match self {
            SpeedChange::Bpm(value) => value,
            SpeedChange::Multiplier(factor) => bpm * factor,
        }
    }
}

/// One timed event attached to a tile
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Tile index; only present in the flat serialized form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<usize>,

    pub event_type: EventType,

    /// Degrees of travel into the tile at which the event fires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_offset: Option<f64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_tag"
    )]
    pub tag: Option<String>,

    /// Every other field, untouched
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Event {
    pub fn new(event_type: impl Into<EventType>) -> Self {
        Self {
            floor: None,
            event_type: event_type.into(),
            angle_offset: None,
            tag: None,
            payload: Map::new(),
        }
    }

    pub fn with_angle_offset(mut self, angle_offset: f64) -> Self {
        self.angle_offset = Some(angle_offset);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }

    /// `SetSpeed` event setting an absolute tempo
    pub fn set_bpm(bpm: f64) -> Self {
        Event::new(EventType::SetSpeed)
            .with_field("speedType", "Bpm")
            .with_field("beatsPerMinute", bpm)
    }

    /// `SetSpeed` event multiplying the current tempo
    pub fn multiply_bpm(factor: f64) -> Self {
        Event::new(EventType::SetSpeed)
            .with_field("speedType", "Multiplier")
            .with_field("bpmMultiplier", factor)
    }

    /// `Pause` event lasting `beats` beats
    pub fn pause(beats: f64) -> Self {
        Event::new(EventType::Pause).with_field("duration", beats)
    }

    /// Angle offset with a missing value read as 0
    pub fn offset_degrees(&self) -> f64 {
        self.angle_offset.unwrap_or(0.0)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.payload.get(key).and_then(Value::as_f64)
    }

    /// Tempo update, if this is a `SetSpeed` event with a known speed type
    pub fn speed_change(&self) -> Option<SpeedChange> {
        if self.event_type != EventType::SetSpeed {
            return None;
        }
        match self.payload.get("speedType").and_then(Value::as_str) {
            Some("Bpm") => self.number("beatsPerMinute").map(SpeedChange::Bpm),
            Some("Multiplier") => self.number("bpmMultiplier").map(SpeedChange::Multiplier),
            _ => None,
        }
    }

    /// Pause length in beats, if this is a `Pause` event
    pub fn pause_beats(&self) -> Option<f64> {
        if self.event_type != EventType::Pause {
            return None;
        }
        Some(self.number("duration").unwrap_or(0.0))
    }
}

/// Tags show up as strings or bare numbers in the wild
fn deserialize_tag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_round_trip() {
        let raw = json!({
            "floor": 3,
            "eventType": "MoveCamera",
            "duration": 2,
            "relativeTo": "Player",
            "angleOffset": 45.0,
            "ease": "Linear"
        });
        let event: Event = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(event.event_type, EventType::Other("MoveCamera".to_string()));
        assert_eq!(event.floor, Some(3));
        assert_eq!(event.angle_offset, Some(45.0));
        assert_eq!(serde_json::to_value(&event).unwrap(), raw);
    }

    #[test]
    fn test_numeric_tag_is_stringified() {
        let event: Event =
            serde_json::from_value(json!({"eventType": "AddDecoration", "tag": 12})).unwrap();
        assert_eq!(event.tag.as_deref(), Some("12"));
    }

    #[test]
    fn test_speed_change_reads_speed_type() {
        assert_eq!(Event::set_bpm(200.0).speed_change(), Some(SpeedChange::Bpm(200.0)));
        assert_eq!(
            Event::multiply_bpm(0.5).speed_change(),
            Some(SpeedChange::Multiplier(0.5))
        );
        let untyped = Event::new("SetSpeed").with_field("beatsPerMinute", 120.0);
        assert_eq!(untyped.speed_change(), None);
        assert_eq!(Event::pause(2.0).speed_change(), None);
    }

    #[test]
    fn test_pause_without_duration_is_zero() {
        assert_eq!(Event::new("Pause").pause_beats(), Some(0.0));
        assert_eq!(Event::new("Twirl").pause_beats(), None);
    }
}

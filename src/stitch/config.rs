//! Stitch configuration and event filters

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

use crate::error::StitchError;
use crate::models::event::EventType;
use crate::timing::locator::TIME_EPSILON;

/// Tunables for one stitch
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StitchConfig {
    /// Time tolerance used when locating destination tiles
    pub epsilon: f64,

    /// Prefix of the counter appended to colliding tags (`A` -> `A_S1`)
    pub rename_suffix: String,

    /// Event types that declare a tagged entity; every other tagged event
    /// references tags declared elsewhere
    pub declaration_types: Vec<EventType>,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            epsilon: TIME_EPSILON,
            rename_suffix: "_S".to_string(),
            declaration_types: vec![
                EventType::AddDecoration,
                EventType::AddObject,
                EventType::AddText,
            ],
        }
    }
}

impl StitchConfig {
    pub fn is_declaration(&self, event_type: &EventType) -> bool {
        self.declaration_types.contains(event_type)
    }
}

/// How `EventFilter::event_types` is applied
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Keep only the listed types
    Whitelist,
    /// Drop the listed types
    Blacklist,
}

impl FromStr for FilterMode {
    type Err = StitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "whitelist" => Ok(FilterMode::Whitelist),
            "blacklist" => Ok(FilterMode::Blacklist),
            _ => Err(StitchError::UnknownFilterMode(s.to_string())),
        }
    }
}

/// Which source events take part in a stitch
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    pub event_types: HashSet<EventType>,
    pub mode: FilterMode,
}

impl EventFilter {
    pub fn new<I, T>(event_types: I, mode: FilterMode) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<EventType>,
    {
        Self {
            event_types: event_types.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    pub fn whitelist<I, T>(event_types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<EventType>,
    {
        Self::new(event_types, FilterMode::Whitelist)
    }

    pub fn blacklist<I, T>(event_types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<EventType>,
    {
        Self::new(event_types, FilterMode::Blacklist)
    }

    /// Let everything through
    pub fn all() -> Self {
        Self::new(Vec::<EventType>::new(), FilterMode::Blacklist)
    }

    pub fn accepts(&self, event_type: &EventType) -> bool {
        let listed = self.event_types.contains(event_type);
        match self.mode {
            FilterMode::Whitelist => listed,
            FilterMode::Blacklist => !listed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_modes() {
        let white = EventFilter::whitelist(["Twirl", "SetSpeed"]);
        assert!(white.accepts(&EventType::Twirl));
        assert!(!white.accepts(&EventType::Other("Flash".into())));

        let black = EventFilter::blacklist(["Twirl"]);
        assert!(!black.accepts(&EventType::Twirl));
        assert!(black.accepts(&EventType::Other("Flash".into())));

        assert!(EventFilter::all().accepts(&EventType::Pause));
    }

    #[test]
    fn test_filter_mode_parse() {
        assert_eq!("Whitelist".parse::<FilterMode>().unwrap(), FilterMode::Whitelist);
        assert_eq!(" blacklist".parse::<FilterMode>().unwrap(), FilterMode::Blacklist);
        assert!(matches!(
            "greylist".parse::<FilterMode>(),
            Err(StitchError::UnknownFilterMode(_))
        ));
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: StitchConfig = serde_json::from_str(r#"{"renameSuffix": "_copy"}"#).unwrap();
        assert_eq!(config.rename_suffix, "_copy");
        assert_eq!(config.epsilon, TIME_EPSILON);
        assert!(config.is_declaration(&EventType::AddText));
        assert!(!config.is_declaration(&EventType::MoveDecorations));
    }
}

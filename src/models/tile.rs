//! Tiles: one step of a level's path

use serde::{Deserialize, Serialize};

use super::event::{Event, EventType};

/// Raw direction meaning "keep going the way the previous tile went"
pub const MIDSPIN: f64 = 999.0;

/// One tile of a level
///
/// Tiles are identified by their index in `Level::tiles`.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    /// Raw turn value in degrees, or `MIDSPIN`
    pub direction: f64,

    /// Resolved travel angle in degrees (derived from `direction` and twirl state)
    pub angle: f64,

    /// Number of twirls at or before this tile
    pub twirl: u32,

    /// Timed events, in stored order
    #[serde(default)]
    pub actions: Vec<Event>,

    /// Decorations pinned to this tile's arrival time
    #[serde(default)]
    pub decorations: Vec<Event>,

    /// Geometric position (set by `Level::tile_positions`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 2]>,
}

impl Tile {
    pub fn new(direction: f64) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }

    pub fn with_action(mut self, event: Event) -> Self {
        self.actions.push(event);
        self
    }

    pub fn with_decoration(mut self, event: Event) -> Self {
        self.decorations.push(event);
        self
    }

    pub fn is_midspin(&self) -> bool {
        self.direction == MIDSPIN
    }

    /// 0 under an even number of twirls, 1 under an odd number
    pub fn twirl_parity(&self) -> u32 {
        self.twirl % 2
    }

    /// Number of `Twirl` actions physically on this tile
    pub fn twirl_events(&self) -> u32 {
        self.actions
            .iter()
            .filter(|a| a.event_type == EventType::Twirl)
            .count() as u32
    }
}

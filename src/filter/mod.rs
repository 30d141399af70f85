//! Event clean-up
//!
//! Bulk removal of actions and decorations, either by explicit type list
//! or through a named preset. Callers re-resolve angles afterwards since
//! dropping `Twirl` actions changes the path.

pub mod presets;

pub use presets::{Preset, PresetKind, PRESETS};

use crate::error::{Result, StitchError};
use crate::models::event::EventType;
use crate::models::tile::Tile;

/// Look up a named preset
pub fn preset(name: &str) -> Result<Preset> {
    PRESETS
        .get(name)
        .cloned()
        .ok_or_else(|| StitchError::UnknownPreset(name.to_string()))
}

pub fn apply_preset(preset: &Preset, tiles: &mut [Tile]) {
    match preset.kind {
        PresetKind::Include => keep_events(&preset.events, tiles),
        PresetKind::Exclude => clear_events(&preset.events, tiles),
        PresetKind::Decorations => clear_decorations(&preset.events, tiles),
    }
}

/// Empty every tile's decorations and drop the listed actions
pub fn clear_decorations(decoration_actions: &[EventType], tiles: &mut [Tile]) {
    for tile in tiles.iter_mut() {
        tile.decorations.clear();
        tile.actions
            .retain(|a| !decoration_actions.contains(&a.event_type));
    }
}

/// Drop actions of the listed types
pub fn clear_events(event_types: &[EventType], tiles: &mut [Tile]) {
    let before: usize = tiles.iter().map(|t| t.actions.len()).sum();
    for tile in tiles.iter_mut() {
        tile.actions.retain(|a| !event_types.contains(&a.event_type));
    }
    let after: usize = tiles.iter().map(|t| t.actions.len()).sum();
    log::debug!("cleared {} actions", before - after);
}

/// Keep only actions of the listed types
pub fn keep_events(event_types: &[EventType], tiles: &mut [Tile]) {
    for tile in tiles.iter_mut() {
        tile.actions.retain(|a| event_types.contains(&a.event_type));
    }
}

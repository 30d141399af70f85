//! Levels and their serialized form
//!
//! `LevelFile` mirrors the file layout (flat event lists keyed by `floor`);
//! `Level` is the in-memory form with events distributed onto tiles and
//! every tile's angle resolved.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::Path;

use super::event::{Event, EventType};
use super::tile::{Tile, MIDSPIN};
use crate::error::{Result, StitchError};
use crate::filter::{self, Preset};
use crate::parse::path_data::parse_path_data;
use crate::parse::relaxed::parse_level;
use crate::timing::angle::resolve_tiles;

fn default_bpm() -> f64 {
    100.0
}

/// Level settings; only the initial tempo is read, the rest round-trips
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_bpm")]
    pub bpm: f64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bpm: default_bpm(),
            extra: Map::new(),
        }
    }
}

impl Settings {
    pub fn with_bpm(bpm: f64) -> Self {
        Self {
            bpm,
            ..Default::default()
        }
    }
}

/// A level as laid out in its file
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_data: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_data: Option<Vec<f64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,

    #[serde(default)]
    pub actions: Vec<Event>,

    #[serde(default)]
    pub decorations: Vec<Event>,

    /// Any other top-level keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Structural edit to a level's tile list
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FloorOperation {
    Append { direction: f64 },
    Insert { index: usize, direction: f64 },
    Delete { index: usize },
}

/// A loaded level
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Level {
    pub settings: Settings,
    pub tiles: Vec<Tile>,

    /// Decorations without a floor; not timed, written back as-is
    pub loose_decorations: Vec<Event>,

    /// Top-level keys other than path, settings and events
    pub extra: Map<String, Value>,
}

impl Level {
    /// Build a level from tiles and resolve their angles
    pub fn from_tiles(settings: Settings, tiles: Vec<Tile>) -> Self {
        let mut level = Self {
            settings,
            tiles,
            ..Default::default()
        };
        level.refresh_angles();
        level
    }

    /// Event-free level at `bpm` following raw `directions`
    pub fn with_directions(bpm: f64, directions: &[f64]) -> Self {
        Self::from_tiles(
            Settings::with_bpm(bpm),
            directions.iter().map(|&d| Tile::new(d)).collect(),
        )
    }

    /// Distribute a file's events onto tiles and resolve angles
    pub fn from_file(file: LevelFile) -> Result<Self> {
        let directions = match (file.angle_data, file.path_data) {
            (Some(angles), _) => angles,
            (None, Some(path)) => parse_path_data(&path)?,
            (None, None) => return Err(StitchError::MissingAngleData),
        };
        let settings = file.settings.ok_or(StitchError::MissingSettings)?;

        let mut tiles: Vec<Tile> = directions.iter().map(|&d| Tile::new(d)).collect();
        let mut dropped = 0usize;
        for mut action in file.actions {
            match action.floor.take() {
                Some(floor) if floor < tiles.len() => tiles[floor].actions.push(action),
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            log::warn!("dropped {} actions with no valid floor", dropped);
        }

        let mut loose_decorations = Vec::new();
        for mut decoration in file.decorations {
            match decoration.floor {
                Some(floor) if floor < tiles.len() => {
                    decoration.floor = None;
                    tiles[floor].decorations.push(decoration);
                }
                _ => loose_decorations.push(decoration),
            }
        }

        let mut level = Self {
            settings,
            tiles,
            loose_decorations,
            extra: file.extra,
        };
        level.refresh_angles();
        log::info!(
            "loaded level: {} tiles at {} bpm",
            level.tiles.len(),
            level.settings.bpm
        );
        Ok(level)
    }

    /// Flatten back into file form, writing `floor` onto every event
    pub fn to_file(&self) -> LevelFile {
        let with_floor = |floor: usize, event: &Event| {
            let mut event = event.clone();
            event.floor = Some(floor);
            event
        };
        let actions = self
            .tiles
            .iter()
            .enumerate()
            .flat_map(|(i, t)| t.actions.iter().map(move |a| with_floor(i, a)))
            .collect();
        let decorations = self
            .tiles
            .iter()
            .enumerate()
            .flat_map(|(i, t)| t.decorations.iter().map(move |d| with_floor(i, d)))
            .chain(self.loose_decorations.iter().cloned())
            .collect();

        LevelFile {
            path_data: None,
            angle_data: Some(self.tiles.iter().map(|t| t.direction).collect()),
            settings: Some(self.settings.clone()),
            actions,
            decorations,
            extra: self.extra.clone(),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        parse_level(text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_file())?)
    }

    pub fn load_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn save_path(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Recount twirls and re-resolve all angles from tile 0
    pub fn refresh_angles(&mut self) {
        resolve_tiles(&mut self.tiles);
    }

    pub fn append_floor(&mut self, direction: f64) {
        self.tiles.push(Tile::new(direction));
        self.refresh_angles();
    }

    /// Insert a new tile so that it ends up at `index`
    pub fn insert_floor(&mut self, index: usize, direction: f64) -> Result<()> {
        if index > self.tiles.len() {
            return Err(StitchError::TileOutOfBounds {
                index,
                len: self.tiles.len(),
            });
        }
        self.tiles.insert(index, Tile::new(direction));
        self.refresh_angles();
        Ok(())
    }

    /// Remove the tile at `index` together with its events
    pub fn delete_floor(&mut self, index: usize) -> Result<Tile> {
        if index >= self.tiles.len() {
            return Err(StitchError::TileOutOfBounds {
                index,
                len: self.tiles.len(),
            });
        }
        let removed = self.tiles.remove(index);
        self.refresh_angles();
        Ok(removed)
    }

    pub fn floor_operation(&mut self, op: FloorOperation) -> Result<()> {
        match op {
            FloorOperation::Append { direction } => self.append_floor(direction),
            FloorOperation::Insert { index, direction } => self.insert_floor(index, direction)?,
            FloorOperation::Delete { index } => {
                self.delete_floor(index)?;
            }
        }
        Ok(())
    }

    /// Every action of one type, with its tile index
    pub fn actions_of_type(&self, event_type: &EventType) -> Vec<(usize, &Event)> {
        self.tiles
            .iter()
            .enumerate()
            .flat_map(|(i, t)| t.actions.iter().map(move |a| (i, a)))
            .filter(|(_, a)| &a.event_type == event_type)
            .collect()
    }

    /// Sorted distinct event type names over actions and decorations
    pub fn event_type_names(&self) -> Vec<String> {
        self.tiles
            .iter()
            .flat_map(|t| t.actions.iter().chain(t.decorations.iter()))
            .map(|e| e.event_type.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Drop events according to a named preset, then re-resolve angles
    pub fn clear_effect(&mut self, preset_name: &str) -> Result<()> {
        let preset = filter::preset(preset_name)?;
        self.clear_events(&preset);
        Ok(())
    }

    pub fn clear_events(&mut self, preset: &Preset) {
        filter::apply_preset(preset, &mut self.tiles);
        self.refresh_angles();
    }

    /// Lay the path out on the plane, one unit per tile
    ///
    /// Geometry reads a midspin as the previous direction reversed, unlike
    /// timing which gives it no travel. The first `PositionTrack` on a tile
    /// shifts the path unless it is editor-only. Returns one point more than
    /// there are tiles; tile `i` is stored the point after its own step.
    pub fn tile_positions(&mut self) -> Vec<[f64; 2]> {
        let mut directions: Vec<f64> = Vec::with_capacity(self.tiles.len());
        for (i, tile) in self.tiles.iter().enumerate() {
            let direction = if tile.direction == MIDSPIN {
                i.checked_sub(1)
                    .map(|prev| self.tiles[prev].direction + 180.0)
                    .unwrap_or(0.0)
            } else {
                tile.direction
            };
            directions.push(direction);
        }

        let mut pos = [0.0f64, 0.0f64];
        let mut positions = Vec::with_capacity(directions.len() + 1);
        for i in 0..=directions.len() {
            let heading = match directions.get(i).or_else(|| directions.last()) {
                Some(d) => *d,
                None => 0.0,
            };
            if let Some(tile) = self.tiles.get(i) {
                if let Some([dx, dy]) = position_offset(tile) {
                    pos[0] += dx;
                    pos[1] += dy;
                }
            }
            let radians = heading.to_radians();
            pos[0] += radians.cos();
            pos[1] += radians.sin();
            positions.push(pos);
            if let Some(tile) = self.tiles.get_mut(i) {
                tile.position = Some(pos);
            }
        }
        positions
    }
}

/// Offset from the first non-editor-only `PositionTrack` on a tile
fn position_offset(tile: &Tile) -> Option<[f64; 2]> {
    let event = tile
        .actions
        .iter()
        .find(|a| a.event_type == EventType::PositionTrack)?;
    let editor_only = match event.payload.get("editorOnly") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "Enabled",
        _ => false,
    };
    if editor_only {
        return None;
    }
    let offset = event.payload.get("positionOffset")?.as_array()?;
    let x = offset.first().and_then(Value::as_f64).unwrap_or(0.0);
    let y = offset.get(1).and_then(Value::as_f64).unwrap_or(0.0);
    Some([x, y])
}

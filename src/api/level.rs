//! Level inspection and editing for the WASM API
//!
//! Every function takes level text and, when it edits, returns the edited
//! level as JSON text. No level is held between calls.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::api::helpers::{js_error, serialize};
use crate::error::{Result, StitchError};
use crate::models::level::{FloorOperation, Level};
use crate::timing::simulator::{simulate, TimingTrace};
use crate::{wasm_info, wasm_log};

/// Overview of a level (returned to JavaScript)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSummary {
    pub tile_count: usize,
    pub bpm: f64,
    /// Distinct event types present, sorted
    pub event_types: Vec<String>,
    /// Arrival time of the last tile, in seconds
    pub duration: f64,
}

pub fn summarize(level: &Level) -> Result<LevelSummary> {
    let trace = simulate(level)?;
    Ok(LevelSummary {
        tile_count: level.tiles.len(),
        bpm: level.settings.bpm,
        event_types: level.event_type_names(),
        duration: trace.tile_times.last().copied().unwrap_or(0.0),
    })
}

pub fn timing_of(level_text: &str) -> Result<TimingTrace> {
    simulate(&Level::from_json_str(level_text)?)
}

pub fn apply_floor_operation(
    level_text: &str,
    op: &str,
    direction: f64,
    index: Option<usize>,
) -> Result<String> {
    let mut level = Level::from_json_str(level_text)?;
    let missing_index = || StitchError::UnknownFloorOperation(format!("{} needs an index", op));
    let op = match op {
        "append" => FloorOperation::Append { direction },
        "insert" => FloorOperation::Insert {
            index: index.ok_or_else(missing_index)?,
            direction,
        },
        "delete" => FloorOperation::Delete {
            index: index.ok_or_else(missing_index)?,
        },
        other => return Err(StitchError::UnknownFloorOperation(other.to_string())),
    };
    level.floor_operation(op)?;
    level.to_json_string()
}

pub fn apply_effect_preset(level_text: &str, preset: &str) -> Result<String> {
    let mut level = Level::from_json_str(level_text)?;
    level.clear_effect(preset)?;
    level.to_json_string()
}

/// Absolute timing of every tile and event
///
/// # Returns
/// JavaScript object `{ tileTimes, bpmAtTiles, pauseAtTiles, eventTimes }`
#[wasm_bindgen(js_name = calculateTiming)]
pub fn calculate_timing(level_text: &str) -> std::result::Result<JsValue, JsValue> {
    wasm_info!("calculateTiming called ({} bytes)", level_text.len());
    let trace = timing_of(level_text).map_err(js_error("Timing failed"))?;
    wasm_log!("  {} tiles, {} events", trace.tile_count(), trace.event_times.len());
    serialize(&trace, "Timing serialization error")
}

/// Tile count, initial tempo, event types and length of a level
#[wasm_bindgen(js_name = levelSummary)]
pub fn level_summary(level_text: &str) -> std::result::Result<JsValue, JsValue> {
    let summary = Level::from_json_str(level_text)
        .and_then(|level| summarize(&level))
        .map_err(js_error("Level summary failed"))?;
    wasm_info!(
        "levelSummary: {} tiles, {} event types",
        summary.tile_count,
        summary.event_types.len()
    );
    serialize(&summary, "Summary serialization error")
}

/// Geometric position of every tile
#[wasm_bindgen(js_name = tilePositions)]
pub fn tile_positions(level_text: &str) -> std::result::Result<JsValue, JsValue> {
    let mut level = Level::from_json_str(level_text).map_err(js_error("Tile positions failed"))?;
    let positions = level.tile_positions();
    serialize(&positions, "Position serialization error")
}

/// Drop events through a named preset
///
/// ## Parameters
/// - `preset`: `noeffect`, `noholds`, `nomovecamera`, `noeffect_completely` or `inner_no_deco`
#[wasm_bindgen(js_name = clearEffect)]
pub fn clear_effect(level_text: &str, preset: &str) -> std::result::Result<String, JsValue> {
    wasm_info!("clearEffect called: preset='{}'", preset);
    apply_effect_preset(level_text, preset).map_err(js_error("Clear effect failed"))
}

/// Append, insert or delete a tile
///
/// ## Parameters
/// - `op`: `append`, `insert` or `delete`
/// - `direction`: raw direction of the new tile (ignored by `delete`)
/// - `index`: target tile for `insert`/`delete`
#[wasm_bindgen(js_name = floorOperation)]
pub fn floor_operation(
    level_text: &str,
    op: &str,
    direction: f64,
    index: Option<usize>,
) -> std::result::Result<String, JsValue> {
    wasm_info!("floorOperation called: op={}, direction={}, index={:?}", op, direction, index);
    apply_floor_operation(level_text, op, direction, index)
        .map_err(js_error("Floor operation failed"))
}

//! Level Stitcher WASM API
//!
//! This module provides the JavaScript-facing API for the stitcher.
//! Levels cross the boundary as JSON text; structured results come back
//! as plain JavaScript objects.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, error conversion, and logging
//! - `level`: Timing, summaries, floor edits and effect presets
//! - `stitch`: Event transplanting between two levels

pub mod helpers;
pub mod level;
pub mod stitch;

// Re-export all public functions to keep a flat API
pub use level::{
    calculate_timing, clear_effect, floor_operation, level_summary, tile_positions, LevelSummary,
};
pub use stitch::{stitch_levels, stitch_levels_with_config};

//! Parsing module for the level stitcher
//!
//! This module turns level text, which is only loosely JSON, into
//! levels with resolved tiles.

pub mod path_data;
pub mod relaxed;

// Re-export commonly used functions
pub use path_data::{direction_for, parse_path_data};
pub use relaxed::{parse_level, parse_level_file, relax_json};

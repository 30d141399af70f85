//! Models module for the level stitcher
//!
//! This module contains the data models for levels, their tiles and
//! the events attached to them.

pub mod event;
pub mod level;
pub mod tile;

// Re-export commonly used types
pub use event::{Event, EventType, SpeedChange};
pub use level::{FloorOperation, Level, LevelFile, Settings};
pub use tile::{Tile, MIDSPIN};

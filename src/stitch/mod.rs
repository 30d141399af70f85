//! Level stitching
//!
//! Moves a time-ranged slice of one level's events into another level.

pub mod config;
pub mod tags;
pub mod transplant;

pub use config::{EventFilter, FilterMode, StitchConfig};
pub use tags::TagResolver;
pub use transplant::{transplant, Placement, Stitcher};

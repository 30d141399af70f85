//! Error types for level loading, timing and stitching
//!
//! Domain errors are fatal to the calling operation. Tag collisions and
//! floating point drift are not errors and never surface here.

use thiserror::Error;

/// Top-level error type for the stitcher
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StitchError {
    /// Tempo reached zero or went negative while simulating
    #[error("non-positive tempo {bpm} at tile {tile}")]
    InvalidTempo { tile: usize, bpm: f64 },

    /// Tile range with start after end
    #[error("invalid tile range: start {start} > end {end}")]
    InvalidRange { start: usize, end: usize },

    /// Tile index outside `[0, len)`
    #[error("tile index {index} out of bounds (tile count: {len})")]
    TileOutOfBounds { index: usize, len: usize },

    /// Level text has neither `angleData` nor `pathData`
    #[error("level has no angleData or pathData")]
    MissingAngleData,

    /// Level text has no `settings` block
    #[error("level has no settings")]
    MissingSettings,

    #[error("unknown pathData letter '{0}'")]
    UnknownPathLetter(char),

    #[error("unknown effect preset '{0}'")]
    UnknownPreset(String),

    #[error("unknown filter mode '{0}' (expected whitelist or blacklist)")]
    UnknownFilterMode(String),

    #[error("unknown floor operation '{0}' (expected append, insert or delete)")]
    UnknownFloorOperation(String),

    #[error("json error: {0}")]
    Json(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for StitchError {
    fn from(e: serde_json::Error) -> Self {
        StitchError::Json(e.to_string())
    }
}

impl From<std::io::Error> for StitchError {
    fn from(e: std::io::Error) -> Self {
        StitchError::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StitchError>;

//! Simulation cursor
//!
//! The running state of one forward walk over a level's tiles. The
//! simulator threads it over every tile; the locator resumes it from any
//! tile and steps it forward without re-running the whole simulation.

use serde::Serialize;

use crate::error::{Result, StitchError};
use crate::models::event::Event;
use crate::models::tile::Tile;

/// Seconds needed to travel `angle` degrees at `bpm` (180° is one beat)
#[inline]
pub fn travel_time(angle: f64, bpm: f64) -> f64 {
    (angle / 180.0) * (60.0 / bpm)
}

/// Seconds a pause of `beats` beats lasts at `bpm`
#[inline]
pub fn pause_time(beats: f64, bpm: f64) -> f64 {
    beats * 60.0 / bpm
}

/// Timing state at one tile
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationCursor {
    /// Tile the cursor stands on
    pub tile: usize,

    /// Tempo after this tile's tempo changes, used for its events and the
    /// travel to the next tile
    pub tempo: f64,

    /// Absolute arrival (hit) time of the tile, in seconds
    pub arrival: f64,

    /// Total pause delay held on this tile before travelling on
    pub pause_delay: f64,
}

impl SimulationCursor {
    /// Cursor standing on tile 0 of `tiles`, entered at `bpm`
    ///
    /// Returns `None` for an empty tile list.
    pub fn first(tiles: &[Tile], bpm: f64) -> Result<Option<Self>> {
        let Some(first) = tiles.first() else {
            return Ok(None);
        };
        check_tempo(0, bpm)?;
        let mut cursor = SimulationCursor {
            tile: 0,
            tempo: bpm,
            arrival: travel_time(first.angle, bpm),
            pause_delay: 0.0,
        };
        cursor.enter(first)?;
        Ok(Some(cursor))
    }

    /// Apply a freshly reached tile's own tempo changes, then its pauses
    ///
    /// All tempo changes on the tile land before any pause is converted.
    fn enter(&mut self, tile: &Tile) -> Result<()> {
        self.tempo = tile
            .actions
            .iter()
            .filter_map(Event::speed_change)
            .fold(self.tempo, |bpm, change| change.apply(bpm));
        check_tempo(self.tile, self.tempo)?;

        let beats: f64 = tile.actions.iter().filter_map(Event::pause_beats).sum();
        self.pause_delay = pause_time(beats, self.tempo);
        Ok(())
    }

    /// Arrival time of `next` if the cursor moved onto it
    pub fn next_arrival(&self, next: &Tile) -> f64 {
        self.arrival + self.pause_delay + travel_time(next.angle, self.tempo)
    }

    /// Move onto `next`, the tile after the current one
    pub fn advance(&mut self, next: &Tile) -> Result<()> {
        self.arrival = self.next_arrival(next);
        self.tile += 1;
        self.enter(next)
    }

    /// Fold an event appended to the current tile into the cursor
    ///
    /// Tempo changes and pauses placed here affect later placements exactly
    /// as native ones would.
    pub fn absorb(&mut self, event: &Event) -> Result<()> {
        if let Some(change) = event.speed_change() {
            self.tempo = change.apply(self.tempo);
            check_tempo(self.tile, self.tempo)?;
        } else if let Some(beats) = event.pause_beats() {
            self.pause_delay += pause_time(beats, self.tempo);
        }
        Ok(())
    }

    /// Absolute time of an event `angle_offset` degrees into the tile
    pub fn time_at(&self, angle_offset: f64) -> f64 {
        self.arrival + travel_time(angle_offset, self.tempo)
    }

    /// Angle offset (degrees into the tile) at which `time` falls
    pub fn angle_offset_at(&self, time: f64) -> f64 {
        ((time - self.arrival) / (60.0 / self.tempo)) * 180.0
    }
}

fn check_tempo(tile: usize, bpm: f64) -> Result<()> {
    if bpm > 0.0 && bpm.is_finite() {
        Ok(())
    } else {
        Err(StitchError::InvalidTempo { tile, bpm })
    }
}

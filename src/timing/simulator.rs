//! Timing simulation
//!
//! Walks a level's tiles once, in order, and derives absolute time for
//! every tile and event. A trace is never cached: derive it again after
//! any change to the tiles.

use serde::Serialize;

use super::cursor::SimulationCursor;
use crate::error::Result;
use crate::models::event::Event;
use crate::models::level::Level;
use crate::models::tile::Tile;

/// One event placed on the absolute timeline
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub tile_index: usize,
    pub event: Event,
    pub absolute_time: f64,
    /// Decorations are pinned to their tile's arrival time
    pub is_decoration: bool,
}

/// Derived timing of a whole level
#[derive(Clone, Debug, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingTrace {
    /// Arrival (hit) time of each tile
    pub tile_times: Vec<f64>,

    /// Tempo in force at each tile, after that tile's own tempo changes
    pub bpm_at_tiles: Vec<f64>,

    /// Pause delay held on each tile
    pub pause_at_tiles: Vec<f64>,

    /// Every action and decoration, in tile order then stored order
    pub event_times: Vec<EventTime>,
}

impl TimingTrace {
    pub fn tile_count(&self) -> usize {
        self.tile_times.len()
    }

    /// The simulation state as it stood on `tile`
    pub fn cursor_at(&self, tile: usize) -> Option<SimulationCursor> {
        Some(SimulationCursor {
            tile,
            tempo: *self.bpm_at_tiles.get(tile)?,
            arrival: *self.tile_times.get(tile)?,
            pause_delay: *self.pause_at_tiles.get(tile)?,
        })
    }

    /// Events on tiles `start..=end`
    pub fn events_in_range(&self, start: usize, end: usize) -> impl Iterator<Item = &EventTime> {
        self.event_times
            .iter()
            .filter(move |et| et.tile_index >= start && et.tile_index <= end)
    }

    fn record(&mut self, cursor: &SimulationCursor, tile: &Tile) {
        self.tile_times.push(cursor.arrival);
        self.bpm_at_tiles.push(cursor.tempo);
        self.pause_at_tiles.push(cursor.pause_delay);

        for action in &tile.actions {
            self.event_times.push(EventTime {
                tile_index: cursor.tile,
                event: action.clone(),
                absolute_time: cursor.time_at(action.offset_degrees()),
                is_decoration: false,
            });
        }
        for decoration in &tile.decorations {
            self.event_times.push(EventTime {
                tile_index: cursor.tile,
                event: decoration.clone(),
                absolute_time: cursor.arrival,
                is_decoration: true,
            });
        }
    }
}

/// Simulate a loaded level
pub fn simulate(level: &Level) -> Result<TimingTrace> {
    simulate_tiles(&level.tiles, level.settings.bpm)
}

/// Simulate a tile sequence entered at `bpm`
///
/// Fails on a non-positive tempo anywhere along the way.
pub fn simulate_tiles(tiles: &[Tile], bpm: f64) -> Result<TimingTrace> {
    let mut trace = TimingTrace::default();
    let Some(mut cursor) = SimulationCursor::first(tiles, bpm)? else {
        return Ok(trace);
    };

    trace.record(&cursor, &tiles[0]);
    for tile in &tiles[1..] {
        cursor.advance(tile)?;
        trace.record(&cursor, tile);
    }

    log::debug!(
        "simulated {} tiles, {} events, end time {:.6}s",
        trace.tile_count(),
        trace.event_times.len(),
        cursor.arrival
    );
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StitchError;

    fn tile(angle: f64) -> Tile {
        Tile {
            angle,
            ..Tile::default()
        }
    }

    fn assert_times(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_three_tile_scenario() {
        let tiles = vec![tile(90.0), tile(180.0), tile(90.0)];
        let trace = simulate_tiles(&tiles, 150.0).unwrap();
        assert_times(&trace.tile_times, &[0.2, 0.6, 0.8]);
        assert_eq!(trace.bpm_at_tiles, vec![150.0; 3]);
    }

    #[test]
    fn test_tempo_change_affects_following_travel() {
        let mut tiles = vec![tile(90.0), tile(180.0), tile(90.0)];
        tiles[1].actions.push(Event::set_bpm(300.0));
        let trace = simulate_tiles(&tiles, 150.0).unwrap();
        assert_times(&trace.tile_times, &[0.2, 0.6, 0.7]);
        assert_eq!(trace.bpm_at_tiles, vec![150.0, 300.0, 300.0]);
    }

    #[test]
    fn test_pause_delays_next_tile() {
        let mut tiles = vec![tile(180.0), tile(180.0)];
        tiles[0].actions.push(Event::pause(2.0));
        let trace = simulate_tiles(&tiles, 120.0).unwrap();
        assert_times(&trace.tile_times, &[0.5, 2.0]);
        assert_times(&trace.pause_at_tiles, &[1.0, 0.0]);
    }

    #[test]
    fn test_event_offsets_and_decorations() {
        let mut tiles = vec![tile(180.0), tile(180.0)];
        tiles[1]
            .actions
            .push(Event::new("Flash").with_angle_offset(90.0));
        tiles[1].actions.push(Event::set_bpm(60.0));
        tiles[1]
            .decorations
            .push(Event::new("AddDecoration").with_angle_offset(90.0));
        let trace = simulate_tiles(&tiles, 120.0).unwrap();

        let flash = &trace.event_times[0];
        assert_eq!(flash.tile_index, 1);
        assert!(!flash.is_decoration);
        // Offsets use the tempo after the tile's own changes
        assert!((flash.absolute_time - 1.5).abs() < 1e-9);

        let deco = &trace.event_times[2];
        assert!(deco.is_decoration);
        assert_eq!(deco.absolute_time, trace.tile_times[1]);
    }

    #[test]
    fn test_empty_level_gives_empty_trace() {
        assert_eq!(simulate_tiles(&[], 120.0).unwrap(), TimingTrace::default());
    }

    #[test]
    fn test_zero_bpm_is_rejected() {
        assert!(matches!(
            simulate_tiles(&[tile(180.0)], 0.0),
            Err(StitchError::InvalidTempo { .. })
        ));
    }

    #[test]
    fn test_cursor_at_matches_trace() {
        let mut tiles = vec![tile(180.0), tile(90.0)];
        tiles[1].actions.push(Event::pause(1.0));
        let trace = simulate_tiles(&tiles, 60.0).unwrap();
        let cursor = trace.cursor_at(1).unwrap();
        assert_eq!(cursor.arrival, trace.tile_times[1]);
        assert_eq!(cursor.pause_delay, 1.0);
        assert!(trace.cursor_at(2).is_none());
    }
}

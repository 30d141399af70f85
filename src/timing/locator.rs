//! Destination tile lookup
//!
//! Finds the tile whose occupancy interval contains a target time by
//! stepping a `SimulationCursor` forward. The cursor only ever moves
//! forward, so a whole batch of ascending lookups costs one pass.

use super::cursor::SimulationCursor;
use crate::error::Result;
use crate::models::event::Event;
use crate::models::tile::Tile;

/// Tolerance for floating point drift in time comparisons, in seconds
pub const TIME_EPSILON: f64 = 1e-6;

/// Monotonic tile finder over one tile sequence
#[derive(Debug)]
pub struct TileLocator<'a> {
    tiles: &'a [Tile],
    cursor: SimulationCursor,
    epsilon: f64,
}

impl<'a> TileLocator<'a> {
    /// Start locating from `cursor`, which must stand on one of `tiles`
    pub fn new(tiles: &'a [Tile], cursor: SimulationCursor) -> Self {
        Self {
            tiles,
            cursor,
            epsilon: TIME_EPSILON,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn cursor(&self) -> &SimulationCursor {
        &self.cursor
    }

    /// Advance to the last tile arriving no later than `target`
    ///
    /// `origin_tile` is the tile the located event came from. Tile 0 has no
    /// inbound travel segment, so unless the origin was tile 0 as well the
    /// cursor is pushed on to tile 1 and the event gets a negative offset.
    pub fn seek(&mut self, target: f64, origin_tile: usize) -> Result<SimulationCursor> {
        while let Some(next) = self.tiles.get(self.cursor.tile + 1) {
            if self.cursor.next_arrival(next) > target + self.epsilon {
                break;
            }
            self.cursor.advance(next)?;
        }

        if self.cursor.tile == 0 && origin_tile != 0 && self.tiles.len() > 1 {
            log::debug!("target {:.6}s landed on tile 0, moving to tile 1", target);
            self.cursor.advance(&self.tiles[1])?;
        }

        Ok(self.cursor)
    }

    /// Fold an event placed on the current tile into the cursor state
    pub fn absorb(&mut self, event: &Event) -> Result<()> {
        self.cursor.absorb(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::simulator::simulate_tiles;

    fn tiles(angles: &[f64]) -> Vec<Tile> {
        angles
            .iter()
            .map(|&angle| Tile {
                angle,
                ..Tile::default()
            })
            .collect()
    }

    #[test]
    fn test_seek_finds_containing_tile() {
        // 120 bpm, 180° per tile: arrivals 0.5, 1.0, 1.5, 2.0
        let tiles = tiles(&[180.0, 180.0, 180.0, 180.0]);
        let trace = simulate_tiles(&tiles, 120.0).unwrap();
        let mut locator = TileLocator::new(&tiles, trace.cursor_at(1).unwrap());

        assert_eq!(locator.seek(1.2, 1).unwrap().tile, 1);
        assert_eq!(locator.seek(1.6, 1).unwrap().tile, 2);
        // Past the end stays on the last tile
        assert_eq!(locator.seek(9.0, 1).unwrap().tile, 3);
        // Never goes back
        assert_eq!(locator.seek(0.7, 1).unwrap().tile, 3);
    }

    #[test]
    fn test_boundary_within_epsilon_advances() {
        let tiles = tiles(&[180.0, 180.0, 180.0]);
        let trace = simulate_tiles(&tiles, 120.0).unwrap();
        let mut locator = TileLocator::new(&tiles, trace.cursor_at(0).unwrap());
        let cursor = locator.seek(1.0 - 5e-7, 0).unwrap();
        assert_eq!(cursor.tile, 1);
    }

    #[test]
    fn test_seek_replays_tile_events() {
        let mut tiles = tiles(&[180.0, 180.0, 180.0]);
        tiles[1].actions.push(Event::set_bpm(60.0));
        tiles[1].actions.push(Event::pause(1.0));
        let trace = simulate_tiles(&tiles, 120.0).unwrap();
        let mut locator = TileLocator::new(&tiles, trace.cursor_at(0).unwrap());

        let cursor = locator.seek(3.0, 0).unwrap();
        assert_eq!(cursor.tile, 2);
        assert_eq!(cursor.tempo, 60.0);
        assert!((cursor.arrival - trace.tile_times[2]).abs() < 1e-9);
    }

    #[test]
    fn test_tile_zero_redirects_unless_origin_is_zero() {
        let tiles = tiles(&[180.0, 180.0, 180.0]);
        let trace = simulate_tiles(&tiles, 120.0).unwrap();

        let mut from_zero = TileLocator::new(&tiles, trace.cursor_at(0).unwrap());
        assert_eq!(from_zero.seek(0.6, 0).unwrap().tile, 0);

        let mut elsewhere = TileLocator::new(&tiles, trace.cursor_at(0).unwrap());
        let cursor = elsewhere.seek(0.6, 4).unwrap();
        assert_eq!(cursor.tile, 1);
        assert!((cursor.arrival - 1.0).abs() < 1e-9);
        assert!(cursor.angle_offset_at(0.6) < 0.0);
    }

    #[test]
    fn test_single_tile_level_stays_on_zero() {
        let tiles = tiles(&[180.0]);
        let trace = simulate_tiles(&tiles, 120.0).unwrap();
        let mut locator = TileLocator::new(&tiles, trace.cursor_at(0).unwrap());
        assert_eq!(locator.seek(5.0, 3).unwrap().tile, 0);
    }
}

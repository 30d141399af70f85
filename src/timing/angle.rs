//! Angle resolution
//!
//! Turns raw per-tile directions into the travel angle the timing engine
//! consumes. The heading is positional and cumulative, so any structural
//! edit requires resolving again from tile 0.

use crate::models::tile::{Tile, MIDSPIN};

/// Heading the path enters tile 0 with
const ENTRY_HEADING: f64 = 180.0;

/// Running heading state for one left-to-right pass over the tiles
#[derive(Clone, Copy, Debug)]
pub struct AngleResolver {
    heading: f64,
    previous_direction: Option<f64>,
}

impl Default for AngleResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AngleResolver {
    pub fn new() -> Self {
        Self {
            heading: ENTRY_HEADING,
            previous_direction: None,
        }
    }

    /// Resolve the next tile's travel angle
    ///
    /// `twirl_parity` is the twirl count in force at this tile, modulo 2.
    pub fn resolve(&mut self, direction: f64, twirl_parity: u32) -> f64 {
        let angle = if direction == MIDSPIN {
            // Heading snaps back to the previous raw direction, not its reverse
            self.heading = match self.previous_direction {
                Some(prev) if !prev.is_nan() => prev,
                _ => 0.0,
            };
            0.0
        } else {
            let turn = (self.heading - direction).rem_euclid(360.0);
            let resolved = if twirl_parity == 0 { turn } else { 360.0 - turn };
            self.heading = direction + 180.0;
            if resolved == 0.0 {
                360.0
            } else {
                resolved
            }
        };
        self.previous_direction = Some(direction);
        angle
    }
}

/// Resolve raw directions given the cumulative twirl count at each tile
pub fn resolve_angles(directions: &[f64], twirl_counts: &[u32]) -> Vec<f64> {
    let mut resolver = AngleResolver::new();
    directions
        .iter()
        .enumerate()
        .map(|(i, &direction)| {
            let parity = twirl_counts.get(i).copied().unwrap_or(0) % 2;
            resolver.resolve(direction, parity)
        })
        .collect()
}

/// Recount twirls and re-resolve every tile's angle from tile 0
pub fn resolve_tiles(tiles: &mut [Tile]) {
    let mut resolver = AngleResolver::new();
    let mut twirls = 0u32;
    for tile in tiles.iter_mut() {
        twirls += tile.twirl_events();
        tile.twirl = twirls;
        tile.angle = resolver.resolve(tile.direction, twirls % 2);
    }
    log::debug!("resolved angles for {} tiles ({} twirls)", tiles.len(), twirls);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::Event;

    #[test]
    fn test_straight_line_is_180() {
        let angles = resolve_angles(&[0.0, 0.0, 0.0], &[0, 0, 0]);
        assert_eq!(angles, vec![180.0, 180.0, 180.0]);
    }

    #[test]
    fn test_turns_are_positive() {
        // 0 then 270: (180 - 270) wraps to 270, never negative
        let angles = resolve_angles(&[0.0, 270.0, 0.0], &[0, 0, 0]);
        assert_eq!(angles, vec![180.0, 270.0, 90.0]);
    }

    #[test]
    fn test_twirl_flips_turn() {
        let angles = resolve_angles(&[0.0, 270.0, 0.0], &[0, 1, 1]);
        assert_eq!(angles, vec![180.0, 90.0, 270.0]);
    }

    #[test]
    fn test_zero_turn_becomes_full_circle() {
        // Heading 180 after direction 0; going back to 180 is a U-turn
        let angles = resolve_angles(&[0.0, 180.0], &[0, 0]);
        assert_eq!(angles[1], 360.0);
        let twirled = resolve_angles(&[0.0, 180.0], &[0, 1]);
        assert_eq!(twirled[1], 360.0);
    }

    #[test]
    fn test_midspin_has_no_travel_and_resets_heading() {
        let angles = resolve_angles(&[0.0, MIDSPIN, 90.0], &[0, 0, 0]);
        assert_eq!(angles[1], 0.0);
        // Heading reset to previous raw direction (0): (0 - 90) wraps to 270
        assert_eq!(angles[2], 270.0);
    }

    #[test]
    fn test_midspin_on_first_tile_uses_zero_heading() {
        let angles = resolve_angles(&[MIDSPIN, 90.0], &[0, 0]);
        assert_eq!(angles, vec![0.0, 270.0]);
    }

    #[test]
    fn test_resolve_tiles_counts_twirls_by_index() {
        let mut tiles = vec![
            Tile::new(0.0),
            Tile::new(270.0).with_action(Event::new("Twirl")),
            Tile::new(0.0),
            Tile::new(0.0).with_action(Event::new("Twirl")),
        ];
        resolve_tiles(&mut tiles);
        let twirls: Vec<u32> = tiles.iter().map(|t| t.twirl).collect();
        assert_eq!(twirls, vec![0, 1, 1, 2]);
        let angles: Vec<f64> = tiles.iter().map(|t| t.angle).collect();
        // The twirl on tile 3 is already in force on tile 3
        assert_eq!(angles, vec![180.0, 90.0, 270.0, 180.0]);
    }
}

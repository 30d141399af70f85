//! `pathData` decoding
//!
//! Older level files spell the path as one letter per tile instead of an
//! `angleData` array. Each letter is a fixed absolute direction.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::error::{Result, StitchError};
use crate::models::tile::MIDSPIN;

/// Letters in 15° steps, starting at 0°
const LETTERS: &str = "RpJEToUqGQHWLxNZFVDYBCMA";

static DIRECTIONS: Lazy<HashMap<char, f64>> = Lazy::new(|| {
    let mut map: HashMap<char, f64> = LETTERS
        .chars()
        .enumerate()
        .map(|(i, c)| (c, i as f64 * 15.0))
        .collect();
    map.insert('!', MIDSPIN);
    map
});

/// Direction for one path letter
pub fn direction_for(letter: char) -> Option<f64> {
    DIRECTIONS.get(&letter).copied()
}

/// Decode a whole `pathData` string into raw directions
pub fn parse_path_data(path: &str) -> Result<Vec<f64>> {
    path.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| direction_for(c).ok_or(StitchError::UnknownPathLetter(c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_letters() {
        assert_eq!(parse_path_data("RULD").unwrap(), vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn test_diagonals_and_midspin() {
        assert_eq!(parse_path_data("EQ!ZC").unwrap(), vec![45.0, 135.0, MIDSPIN, 225.0, 315.0]);
        assert_eq!(direction_for('A'), Some(345.0));
        assert_eq!(direction_for('p'), Some(15.0));
    }

    #[test]
    fn test_unknown_letter_is_rejected() {
        assert_eq!(parse_path_data("RX"), Err(StitchError::UnknownPathLetter('X')));
    }
}

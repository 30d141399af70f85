//! Event transplanting
//!
//! Copies a tile range's events from one level into another at the same
//! relative time. Source events are mapped onto the destination timeline
//! by a constant offset, located on destination tiles, re-tagged, and
//! converted back into tile-local angle offsets.

use std::ops::RangeInclusive;

use serde::Serialize;

use super::config::{EventFilter, StitchConfig};
use super::tags::TagResolver;
use crate::error::{Result, StitchError};
use crate::models::event::Event;
use crate::models::level::Level;
use crate::timing::locator::TileLocator;
use crate::timing::simulator::{simulate, EventTime};

/// Where one transplanted event goes
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Destination tile index
    pub tile: usize,
    /// The event as it will be appended (tag and angle offset rewritten)
    pub event: Event,
    pub is_decoration: bool,
    /// Absolute destination time the event was aimed at
    pub target_time: f64,
}

/// Transplants events between levels under one configuration
#[derive(Clone, Debug, Default)]
pub struct Stitcher {
    config: StitchConfig,
}

impl Stitcher {
    pub fn new(config: StitchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StitchConfig {
        &self.config
    }

    /// Work out every placement without touching the destination
    ///
    /// Placements come out in ascending target time.
    pub fn plan(
        &self,
        source: &Level,
        source_range: RangeInclusive<usize>,
        destination: &Level,
        destination_start: usize,
        filter: &EventFilter,
    ) -> Result<Vec<Placement>> {
        let (start, end) = (*source_range.start(), *source_range.end());
        if start > end {
            return Err(StitchError::InvalidRange { start, end });
        }
        check_index(end, source.tiles.len())?;
        check_index(destination_start, destination.tiles.len())?;

        let source_trace = simulate(source)?;
        let destination_trace = simulate(destination)?;

        let offset =
            destination_trace.tile_times[destination_start] - source_trace.tile_times[start];

        let mut events: Vec<&EventTime> = source_trace
            .events_in_range(start, end)
            .filter(|et| filter.accepts(&et.event.event_type))
            .collect();
        events.sort_by(|a, b| a.absolute_time.total_cmp(&b.absolute_time));

        let cursor = destination_trace
            .cursor_at(destination_start)
            .ok_or(StitchError::TileOutOfBounds {
                index: destination_start,
                len: destination.tiles.len(),
            })?;
        let mut locator =
            TileLocator::new(&destination.tiles, cursor).with_epsilon(self.config.epsilon);
        let mut tags =
            TagResolver::for_tiles(&destination.tiles, self.config.rename_suffix.as_str());

        let mut placements = Vec::with_capacity(events.len());
        for et in events {
            let target_time = et.absolute_time + offset;
            let cursor = locator.seek(target_time, et.tile_index)?;

            let mut event = et.event.clone();
            event.floor = None;
            // An empty tag means untagged and is never reserved or renamed
            if let Some(tag) = event.tag.take() {
                let is_declaration = self.config.is_declaration(&event.event_type);
                event.tag = Some(if tag.is_empty() {
                    tag
                } else {
                    tags.resolve(&tag, is_declaration)
                });
            }

            if !et.is_decoration {
                event.angle_offset = Some(cursor.angle_offset_at(target_time));
                locator.absorb(&event)?;
            }

            log::debug!(
                "{} from tile {} -> tile {} at {:.6}s",
                event.event_type,
                et.tile_index,
                cursor.tile,
                target_time
            );
            placements.push(Placement {
                tile: cursor.tile,
                event,
                is_decoration: et.is_decoration,
                target_time,
            });
        }

        if !tags.renames().is_empty() {
            log::info!("renamed {} colliding tags", tags.renames().len());
        }
        Ok(placements)
    }

    /// Transplant `source_range` of `source` into `destination`, starting at
    /// `destination_start`
    ///
    /// The destination is only modified once every placement is known, so an
    /// error leaves it untouched.
    pub fn transplant<'a>(
        &self,
        source: &Level,
        source_range: RangeInclusive<usize>,
        destination: &'a mut Level,
        destination_start: usize,
        filter: &EventFilter,
    ) -> Result<&'a mut Level> {
        let placements = self.plan(
            source,
            source_range.clone(),
            destination,
            destination_start,
            filter,
        )?;
        let count = placements.len();
        apply_placements(destination, placements);
        log::info!(
            "transplanted {} events from tiles {}..={} to tile {}",
            count,
            source_range.start(),
            source_range.end(),
            destination_start
        );
        Ok(destination)
    }
}

/// Transplant with the default configuration
pub fn transplant<'a>(
    source: &Level,
    source_range: RangeInclusive<usize>,
    destination: &'a mut Level,
    destination_start: usize,
    filter: &EventFilter,
) -> Result<&'a mut Level> {
    Stitcher::default().transplant(source, source_range, destination, destination_start, filter)
}

/// Append planned events to their destination tiles
fn apply_placements(destination: &mut Level, placements: Vec<Placement>) {
    for placement in placements {
        let tile = &mut destination.tiles[placement.tile];
        if placement.is_decoration {
            tile.decorations.push(placement.event);
        } else {
            tile.actions.push(placement.event);
        }
    }
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(StitchError::TileOutOfBounds { index, len })
    }
}

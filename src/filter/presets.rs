//! Named event clean-up presets

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::models::event::EventType;

/// How a preset's event list is applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetKind {
    /// Keep only the listed actions
    Include,
    /// Drop the listed actions
    Exclude,
    /// Drop every decoration and the listed decoration-driving actions
    Decorations,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Preset {
    pub kind: PresetKind,
    pub events: Vec<EventType>,
}

impl Preset {
    fn new(kind: PresetKind, events: &[&str]) -> Self {
        Self {
            kind,
            events: events.iter().map(|&e| EventType::from(e)).collect(),
        }
    }
}

/// Actions that only drive decorations
pub const DECORATION_ACTIONS: &[&str] =
    &["MoveDecorations", "SetText", "SetObject", "SetDefaultText"];

pub static PRESETS: Lazy<HashMap<&'static str, Preset>> = Lazy::new(|| {
    let mut presets = HashMap::new();
    presets.insert(
        "noeffect",
        Preset::new(
            PresetKind::Exclude,
            &[
                "Flash",
                "SetFilter",
                "SetFilterAdvanced",
                "HallOfMirrors",
                "Bloom",
                "ScalePlanets",
                "ScreenTile",
                "ScreenScroll",
                "ShakeScreen",
            ],
        ),
    );
    presets.insert("noholds", Preset::new(PresetKind::Exclude, &["Hold"]));
    presets.insert("nomovecamera", Preset::new(PresetKind::Exclude, &["MoveCamera"]));
    presets.insert(
        "noeffect_completely",
        Preset::new(
            PresetKind::Exclude,
            &[
                "AddDecoration",
                "AddText",
                "AddObject",
                "Checkpoint",
                "SetHitsound",
                "PlaySound",
                "SetPlanetRotation",
                "ScalePlanets",
                "ColorTrack",
                "AnimateTrack",
                "RecolorTrack",
                "MoveTrack",
                "PositionTrack",
                "MoveDecorations",
                "SetText",
                "SetObject",
                "SetDefaultText",
                "CustomBackground",
                "Flash",
                "MoveCamera",
                "SetFilter",
                "HallOfMirrors",
                "ShakeScreen",
                "Bloom",
                "ScreenTile",
                "ScreenScroll",
                "SetFrameRate",
                "RepeatEvents",
                "SetConditionalEvents",
                "EditorComment",
                "Bookmark",
                "Hold",
                "SetHoldSound",
                "Hide",
                "ScaleMargin",
                "ScaleRadius",
            ],
        ),
    );
    presets.insert(
        "inner_no_deco",
        Preset::new(PresetKind::Decorations, DECORATION_ACTIONS),
    );
    presets
});

//! Event transplanting for the WASM API

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, js_error, string_list};
use crate::error::Result;
use crate::models::level::Level;
use crate::stitch::{EventFilter, FilterMode, StitchConfig, Stitcher};
use crate::{wasm_info, wasm_log};

/// Transplant tiles `start..=end` of `source_text` into `target_text` at
/// `target_start`, returning the new target text
#[allow(clippy::too_many_arguments)]
pub fn stitch_text(
    source_text: &str,
    start: usize,
    end: usize,
    target_text: &str,
    target_start: usize,
    event_types: Vec<String>,
    filter_mode: &str,
    config: StitchConfig,
) -> Result<String> {
    let source = Level::from_json_str(source_text)?;
    let mut target = Level::from_json_str(target_text)?;
    let mode: FilterMode = filter_mode.parse()?;
    let filter = EventFilter::new(event_types, mode);

    Stitcher::new(config).transplant(&source, start..=end, &mut target, target_start, &filter)?;
    target.to_json_string()
}

/// Copy events between two levels at matching times
///
/// ## Parameters
/// - `eventTypes`: event type names for the filter
/// - `filterMode`: `whitelist` or `blacklist`
///
/// # Returns
/// The destination level as JSON text
#[wasm_bindgen(js_name = stitchLevels)]
pub fn stitch_levels(
    source_text: &str,
    start: usize,
    end: usize,
    target_text: &str,
    target_start: usize,
    event_types: js_sys::Array,
    filter_mode: &str,
) -> std::result::Result<String, JsValue> {
    wasm_info!(
        "stitchLevels called: source {}..={} -> target {}, mode={}",
        start,
        end,
        target_start,
        filter_mode
    );
    let event_types = string_list(&event_types);
    wasm_log!("  filter: {:?}", event_types);
    stitch_text(
        source_text,
        start,
        end,
        target_text,
        target_start,
        event_types,
        filter_mode,
        StitchConfig::default(),
    )
    .map_err(js_error("Stitch failed"))
}

/// `stitchLevels` with an explicit configuration object
///
/// `config` takes `{ epsilon, renameSuffix, declarationTypes }`; missing
/// keys fall back to their defaults.
#[wasm_bindgen(js_name = stitchLevelsWithConfig)]
#[allow(clippy::too_many_arguments)]
pub fn stitch_levels_with_config(
    source_text: &str,
    start: usize,
    end: usize,
    target_text: &str,
    target_start: usize,
    event_types: js_sys::Array,
    filter_mode: &str,
    config: JsValue,
) -> std::result::Result<String, JsValue> {
    let config: StitchConfig = if config.is_undefined() || config.is_null() {
        StitchConfig::default()
    } else {
        deserialize(config, "Invalid stitch config")?
    };
    wasm_info!(
        "stitchLevelsWithConfig called: source {}..={} -> target {}, suffix='{}'",
        start,
        end,
        target_start,
        config.rename_suffix
    );
    stitch_text(
        source_text,
        start,
        end,
        target_text,
        target_start,
        string_list(&event_types),
        filter_mode,
        config,
    )
    .map_err(js_error("Stitch failed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StitchError;

    const SOURCE: &str = r#"{
        "angleData": [0, 0, 0],
        "settings": {"bpm": 120},
        "actions": [
            {"floor": 1, "eventType": "Flash", "angleOffset": 90},
            {"floor": 2, "eventType": "MoveCamera", "angleOffset": 0}
        ],
        "decorations": []
    }"#;

    const TARGET: &str = r#"{"angleData": [0, 0, 0, 0], "settings": {"bpm": 120}, "actions": []}"#;

    fn stitch(types: &[&str], mode: &str) -> Result<Level> {
        let out = stitch_text(
            SOURCE,
            0,
            2,
            TARGET,
            1,
            types.iter().map(|s| s.to_string()).collect(),
            mode,
            StitchConfig::default(),
        )?;
        Level::from_json_str(&out)
    }

    #[test]
    fn test_stitch_text_shifts_by_one_tile() {
        let level = stitch(&[], "blacklist").unwrap();
        assert_eq!(level.actions_of_type(&"Flash".into()).len(), 1);
        assert_eq!(level.actions_of_type(&"Flash".into())[0].0, 2);
        assert_eq!(level.actions_of_type(&"MoveCamera".into())[0].0, 3);
    }

    #[test]
    fn test_stitch_text_whitelist() {
        let level = stitch(&["Flash"], "Whitelist").unwrap();
        assert_eq!(level.event_type_names(), vec!["Flash"]);
    }

    #[test]
    fn test_stitch_text_bad_mode() {
        assert!(matches!(
            stitch(&[], "greylist"),
            Err(StitchError::UnknownFilterMode(_))
        ));
    }
}

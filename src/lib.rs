//! Level Stitcher WASM Module
//!
//! Timing model and event transplanting for tile-path rhythm game levels.
//! Tiles resolve to travel angles, angles and tempo events resolve to
//! absolute times, and events from one level can be copied into another
//! at the same relative time.

pub mod error;
pub mod models;
pub mod parse;
pub mod timing;
pub mod filter;
pub mod stitch;
pub mod api;

// Re-export commonly used types
pub use error::{Result, StitchError};
pub use models::{Event, EventType, Level, Tile};
pub use stitch::{transplant, EventFilter, FilterMode, StitchConfig, Stitcher};
pub use timing::{simulate, TileLocator, TimingTrace};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Already initialized when the module is started twice
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Level stitcher WASM module initialized");
}

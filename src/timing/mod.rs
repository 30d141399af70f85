//! Timing model for tile-based levels
//!
//! - `angle`: raw directions to travel angles
//! - `cursor`: per-tile simulation state shared by the simulator and the locator
//! - `simulator`: absolute time of every tile and event
//! - `locator`: which tile a given absolute time falls on

pub mod angle;
pub mod cursor;
pub mod locator;
pub mod simulator;

pub use angle::{resolve_angles, resolve_tiles, AngleResolver};
pub use cursor::{pause_time, travel_time, SimulationCursor};
pub use locator::{TileLocator, TIME_EPSILON};
pub use simulator::{simulate, simulate_tiles, EventTime, TimingTrace};

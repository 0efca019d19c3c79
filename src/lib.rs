//! Horse Derby - A multi-round horse racing game
//!
//! Core modules:
//! - `sim`: Race state store, domain types and the round runner
//! - `random`: Color generation and sampling helpers
//! - `settings`: Data-driven generation parameters
//! - `platform`: Browser bindings for the UI layer

pub mod platform;
pub mod random;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{RaceStatus, RaceStore, RoundRunner};

/// Game configuration constants
pub mod consts {
    /// Horses generated per cycle
    pub const HORSE_COUNT: usize = 20;
    /// Largest roster settings may ask for
    pub const MAX_HORSE_COUNT: usize = 1000;
    /// Horses entered in each round
    pub const HORSES_PER_ROUND: usize = 10;
    /// Round distances in meters, in schedule order
    pub const ROUND_DISTANCES: [u32; 6] = [1200, 1400, 1600, 1800, 2000, 2200];

    /// Horse condition bounds (inclusive)
    pub const MIN_CONDITION: u8 = 1;
    pub const MAX_CONDITION: u8 = 100;

    /// Horse color saturation / lightness (percent)
    pub const COLOR_SATURATION: f64 = 65.0;
    pub const COLOR_LIGHTNESS: f64 = 55.0;

    /// Golden-angle fraction of the color wheel
    pub const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

    /// Runner step (ms of race time per tick, 60 Hz)
    pub const RUNNER_DT_MS: f64 = 1000.0 / 60.0;
    /// Pace of a condition-1 horse (m/s)
    pub const BASE_SPEED: f64 = 15.0;
    /// Extra pace at condition 100 (m/s)
    pub const CONDITION_SPEED_BONUS: f64 = 3.0;
    /// Per-tick pace jitter, +/- (m/s)
    pub const SPEED_JITTER: f64 = 1.5;
}

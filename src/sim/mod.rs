//! Race simulation module
//!
//! The store owns all game state; the runner is the only thing that drives it
//! forward in time. Both are deterministic for a given seed:
//! - Seeded RNG only
//! - Stable iteration order (by horse ID)
//! - No rendering or platform dependencies

pub mod runner;
pub mod state;
pub mod store;

pub use runner::{HorseProgress, RaceEvent, RoundRunner, pace};
pub use state::{Finish, Horse, RaceResult, RaceStatus, RoundConfig};
pub use store::{HORSE_NAMES, RaceStore, StoreSnapshot};

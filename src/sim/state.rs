//! Race domain types
//!
//! Plain data shared between the store, the runner and the UI.

use serde::{Deserialize, Serialize};

/// Lifecycle of a race cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaceStatus {
    /// Nothing generated yet
    #[default]
    Idle,
    /// Roster and schedule ready, waiting for start
    Scheduled,
    /// Rounds are being run
    Running,
    /// Every round has been run
    Finished,
}

/// A horse in the current roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horse {
    /// Unique within a roster (1..=N)
    pub id: u32,
    pub name: String,
    /// `#rrggbb`
    pub color: String,
    /// Form rating in [1, 100]
    pub condition: u8,
}

/// One scheduled round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// 1-based
    pub round: u32,
    /// Meters
    pub distance: u32,
    /// Entered horse ids, ascending
    pub horses: Vec<u32>,
}

/// A horse crossing the line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finish {
    pub horse_id: u32,
    pub time_ms: f64,
}

/// Accumulated finishes for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub round: u32,
    pub distance: u32,
    /// Unique by horse, sorted ascending by time
    pub finishes: Vec<Finish>,
}

impl RaceResult {
    pub fn new(round: u32, distance: u32) -> Self {
        Self {
            round,
            distance,
            finishes: Vec::new(),
        }
    }

    /// Merge a finish, ignoring horses that already finished.
    ///
    /// Returns true if the finish was new.
    pub fn merge(&mut self, finish: Finish) -> bool {
        if self.has_finished(finish.horse_id) {
            return false;
        }
        self.finishes.push(finish);
        self.finishes.sort_by(|a, b| a.time_ms.total_cmp(&b.time_ms));
        true
    }

    pub fn has_finished(&self, horse_id: u32) -> bool {
        self.finishes.iter().any(|f| f.horse_id == horse_id)
    }

    /// Winning finish, if anyone has crossed yet
    pub fn winner(&self) -> Option<&Finish> {
        self.finishes.first()
    }

    /// 1-based placing of a horse
    pub fn position_of(&self, horse_id: u32) -> Option<usize> {
        self.finishes
            .iter()
            .position(|f| f.horse_id == horse_id)
            .map(|i| i + 1)
    }
}

//! Game settings
//!
//! Generation parameters for a race cycle. Defaults are the standard derby:
//! 20 horses, six rounds from 1200m to 2200m, ten runners per round.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Generation parameters consumed by the race store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Horses generated per cycle
    pub horse_count: usize,
    /// Horses sampled into each round
    pub horses_per_round: usize,
    /// Round distances in meters (one round per entry)
    pub distances: Vec<u32>,

    // === Roster ===
    /// Lowest rolled condition
    pub min_condition: u8,
    /// Highest rolled condition
    pub max_condition: u8,
    /// Color saturation (percent)
    pub color_saturation: f64,
    /// Color lightness (percent)
    pub color_lightness: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            horse_count: HORSE_COUNT,
            horses_per_round: HORSES_PER_ROUND,
            distances: ROUND_DISTANCES.to_vec(),

            min_condition: MIN_CONDITION,
            max_condition: MAX_CONDITION,
            color_saturation: COLOR_SATURATION,
            color_lightness: COLOR_LIGHTNESS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Parse settings from JSON, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings ({} horses, {} rounds)", settings.horse_count, settings.distances.len());
                settings
            }
            Err(err) => {
                log::warn!("Invalid settings ({}), using defaults", err);
                Self::default()
            }
        }
    }

    /// Clamp fields into ranges the store can always satisfy
    pub fn sanitized(mut self) -> Self {
        self.horse_count = self.horse_count.min(MAX_HORSE_COUNT);
        self.horses_per_round = self.horses_per_round.min(self.horse_count);
        self.min_condition = self.min_condition.clamp(MIN_CONDITION, MAX_CONDITION);
        self.max_condition = self.max_condition.clamp(self.min_condition, MAX_CONDITION);
        self.color_saturation = self.color_saturation.clamp(0.0, 100.0);
        self.color_lightness = self.color_lightness.clamp(0.0, 100.0);
        self
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

//! Round runner
//!
//! Steps the current round forward in fixed increments and reports finishes
//! back to the store. Pace is a simple function of condition plus jitter.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::state::{Finish, RaceStatus, RoundConfig};
use super::store::RaceStore;
use crate::consts::*;

/// Something the UI may want to react to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RaceEvent {
    HorseFinished { round: u32, horse_id: u32, time_ms: f64 },
    RoundComplete { round: u32, distance: u32 },
    AllRoundsComplete,
}

/// Distance covered by one horse in the running round
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseProgress {
    pub horse_id: u32,
    /// Meters covered
    pub covered: f64,
    pub finished: bool,
}

/// Drives rounds of a `RaceStore` forward
#[derive(Debug, Clone)]
pub struct RoundRunner {
    rng: Pcg32,
    /// Store generation and round (1-based) currently being run
    round: Option<(u64, u32)>,
    elapsed_ms: f64,
    progress: Vec<HorseProgress>,
}

/// Mean pace in m/s for a condition rating
pub fn pace(condition: u8) -> f64 {
    BASE_SPEED + CONDITION_SPEED_BONUS * (f64::from(condition) / f64::from(MAX_CONDITION))
}

impl RoundRunner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            round: None,
            elapsed_ms: 0.0,
            progress: Vec::new(),
        }
    }

    /// Drop any in-flight round
    pub fn reset(&mut self) {
        self.round = None;
        self.elapsed_ms = 0.0;
        self.progress.clear();
    }

    pub fn progress(&self) -> &[HorseProgress] {
        &self.progress
    }

    /// Race time elapsed in the running round
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Advance the running round by `dt_ms` of race time.
    ///
    /// Does nothing unless the store is running and not paused, and ignores
    /// non-finite or non-positive steps. A running store with no round left
    /// is marked finished.
    pub fn tick(&mut self, store: &mut RaceStore, dt_ms: f64) -> Vec<RaceEvent> {
        let mut events = Vec::new();

        if store.status() != RaceStatus::Running || store.is_paused() {
            return events;
        }
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            log::debug!("Ignoring tick of {}ms", dt_ms);
            return events;
        }
        let Some(config) = store.current_round_config().cloned() else {
            self.reset();
            store.finish();
            events.push(RaceEvent::AllRoundsComplete);
            return events;
        };
        if self.round != Some((store.generation(), config.round)) {
            self.begin_round(store.generation(), &config);
        }

        let start_ms = self.elapsed_ms;
        self.elapsed_ms += dt_ms;
        let distance = f64::from(config.distance);

        for horse in self.progress.iter_mut().filter(|p| !p.finished) {
            let condition = store
                .horse(horse.horse_id)
                .map_or(MIN_CONDITION, |h| h.condition);
            let speed = pace(condition) + self.rng.random_range(-SPEED_JITTER..=SPEED_JITTER);
            let step = speed * dt_ms / 1000.0;
            let remaining = distance - horse.covered;

            if step >= remaining {
                // Interpolate the crossing within this tick
                let time_ms = start_ms + dt_ms * (remaining / step);
                horse.covered = distance;
                horse.finished = true;

                let finish = Finish {
                    horse_id: horse.horse_id,
                    time_ms,
                };
                if store.record_finish(config.round, config.distance, finish) {
                    log::debug!("Round {}: horse {} finished in {:.0}ms", config.round, horse.horse_id, time_ms);
                    events.push(RaceEvent::HorseFinished {
                        round: config.round,
                        horse_id: horse.horse_id,
                        time_ms,
                    });
                }
            } else {
                horse.covered += step;
            }
        }

        if self.progress.iter().all(|p| p.finished) {
            log::info!("Round {} ({}m) complete", config.round, config.distance);
            events.push(RaceEvent::RoundComplete {
                round: config.round,
                distance: config.distance,
            });
            self.reset();
            store.advance_round();

            if store.current_round_config().is_none() {
                store.finish();
                events.push(RaceEvent::AllRoundsComplete);
            }
        }

        events
    }

    fn begin_round(&mut self, generation: u64, config: &RoundConfig) {
        log::info!(
            "Round {} ({}m) off with {} horses",
            config.round,
            config.distance,
            config.horses.len()
        );
        self.round = Some((generation, config.round));
        self.elapsed_ms = 0.0;
        self.progress = config
            .horses
            .iter()
            .map(|&horse_id| HorseProgress {
                horse_id,
                covered: 0.0,
                finished: false,
            })
            .collect();
    }
}

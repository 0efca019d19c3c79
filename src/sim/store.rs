//! Race state store
//!
//! Single source of truth for a race cycle: roster, schedule, round cursor,
//! results, status and pause flag. Owned by the host and passed by reference.
//! Every mutation is infallible; invalid requests are ignored.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::state::{Finish, Horse, RaceResult, RaceStatus, RoundConfig};
use crate::random::{generate_colors_with, pick_n};
use crate::settings::Settings;

/// Name pool for generated horses (drawn without replacement)
pub const HORSE_NAMES: [&str; 30] = [
    "Thunder Bolt",
    "Silver Arrow",
    "Midnight Star",
    "Golden Dream",
    "Storm Chaser",
    "Desert Wind",
    "Lucky Charm",
    "Iron Will",
    "Wild Spirit",
    "Blue Comet",
    "Red Rocket",
    "Shadow Dancer",
    "Northern Light",
    "Royal Flush",
    "Copper Penny",
    "Sea Biscuit",
    "Dark Horse",
    "Velvet Hoof",
    "Prairie Fire",
    "Morning Glory",
    "Lightning Strike",
    "Crimson Tide",
    "Silent Knight",
    "Autumn Breeze",
    "Jade Runner",
    "Brave Heart",
    "Ocean Drift",
    "Star Gazer",
    "Falcon Flight",
    "Ember Glow",
];

/// Readable view of the store for the UI
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot<'a> {
    pub horses: &'a [Horse],
    pub schedule: &'a [RoundConfig],
    pub current_round: usize,
    pub results: &'a [RaceResult],
    pub status: RaceStatus,
    pub paused: bool,
    pub distances: &'a [u32],
    pub current_round_config: Option<&'a RoundConfig>,
    pub last_result: Option<&'a RaceResult>,
}

/// The race state container
#[derive(Debug, Clone)]
pub struct RaceStore {
    settings: Settings,
    rng: Pcg32,
    /// Bumped on every `generate`
    generation: u64,
    horses: Vec<Horse>,
    schedule: Vec<RoundConfig>,
    /// Zero-based cursor into `schedule`; may run past the end
    current_round: usize,
    results: Vec<RaceResult>,
    status: RaceStatus,
    paused: bool,
}

impl RaceStore {
    /// Empty store with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        Self {
            settings: settings.sanitized(),
            rng: Pcg32::seed_from_u64(seed),
            generation: 0,
            horses: Vec::new(),
            schedule: Vec::new(),
            current_round: 0,
            results: Vec::new(),
            status: RaceStatus::Idle,
            paused: false,
        }
    }

    // === Actions ===

    /// Build a fresh roster and schedule, discarding everything before it
    pub fn generate(&mut self) {
        self.horses = self.generate_horses();
        self.schedule = self.generate_schedule();
        self.results.clear();
        self.current_round = 0;
        self.paused = false;
        self.status = RaceStatus::Scheduled;
        self.generation += 1;

        log::info!(
            "Generated {} horses over {} rounds",
            self.horses.len(),
            self.schedule.len()
        );
    }

    /// Begin racing. Only valid once scheduled; ignored otherwise.
    pub fn start(&mut self) {
        match self.status {
            RaceStatus::Scheduled | RaceStatus::Running => {
                self.status = RaceStatus::Running;
                log::info!("Race started at round {}", self.current_round + 1);
            }
            RaceStatus::Idle | RaceStatus::Finished => {
                log::debug!("start() ignored in {:?}", self.status);
            }
        }
    }

    // === Mutations ===

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Move the round cursor forward by one. Not clamped: past the last round
    /// `current_round_config` returns `None`.
    pub fn advance_round(&mut self) {
        self.current_round += 1;
    }

    /// Record a finish for (round, distance), creating the result on first use.
    ///
    /// Repeat reports for the same horse are ignored. Returns true if the
    /// finish was new.
    pub fn record_finish(&mut self, round: u32, distance: u32, finish: Finish) -> bool {
        let idx = match self
            .results
            .iter()
            .position(|r| r.round == round && r.distance == distance)
        {
            Some(idx) => idx,
            None => {
                self.results.push(RaceResult::new(round, distance));
                self.results.len() - 1
            }
        };
        self.results[idx].merge(finish)
    }

    /// Mark the cycle as complete
    pub fn finish(&mut self) {
        self.status = RaceStatus::Finished;
        log::info!("All {} rounds complete", self.results.len());
    }

    // === Getters ===

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Round distances in schedule order
    pub fn distances(&self) -> &[u32] {
        &self.settings.distances
    }

    pub fn current_round_config(&self) -> Option<&RoundConfig> {
        self.schedule.get(self.current_round)
    }

    /// Most recently created result
    pub fn last_result(&self) -> Option<&RaceResult> {
        self.results.last()
    }

    /// Number of `generate` calls so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn horses(&self) -> &[Horse] {
        &self.horses
    }

    pub fn horse(&self, id: u32) -> Option<&Horse> {
        self.horses.iter().find(|h| h.id == id)
    }

    pub fn schedule(&self) -> &[RoundConfig] {
        &self.schedule
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    pub fn results(&self) -> &[RaceResult] {
        &self.results
    }

    pub fn status(&self) -> RaceStatus {
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn snapshot(&self) -> StoreSnapshot<'_> {
        StoreSnapshot {
            horses: &self.horses,
            schedule: &self.schedule,
            current_round: self.current_round,
            results: &self.results,
            status: self.status,
            paused: self.paused,
            distances: self.distances(),
            current_round_config: self.current_round_config(),
            last_result: self.last_result(),
        }
    }

    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot())
    }

    // === Generation ===

    fn generate_horses(&mut self) -> Vec<Horse> {
        let count = self.settings.horse_count;
        let colors = generate_colors_with(
            &mut self.rng,
            count,
            self.settings.color_saturation,
            self.settings.color_lightness,
        );
        let names = pick_n(&mut self.rng, &HORSE_NAMES, count);

        colors
            .into_iter()
            .enumerate()
            .map(|(i, color)| {
                let id = i as u32 + 1;
                let name = names
                    .get(i)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| format!("Horse {}", id));
                Horse {
                    id,
                    name,
                    color,
                    condition: self
                        .rng
                        .random_range(self.settings.min_condition..=self.settings.max_condition),
                }
            })
            .collect()
    }

    /// Each round samples independently, so a horse may run in several rounds or none
    fn generate_schedule(&mut self) -> Vec<RoundConfig> {
        let ids: Vec<u32> = self.horses.iter().map(|h| h.id).collect();
        let per_round = self.settings.horses_per_round;

        self.settings
            .distances
            .clone()
            .into_iter()
            .enumerate()
            .map(|(i, distance)| {
                let mut horses = pick_n(&mut self.rng, &ids, per_round);
                horses.sort_unstable();
                RoundConfig {
                    round: i as u32 + 1,
                    distance,
                    horses,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn scheduled(seed: u64) -> RaceStore {
        let mut store = RaceStore::new(seed);
        store.generate();
        store
    }

    #[test]
    fn test_new_store_is_idle() {
        let store = RaceStore::new(1);
        assert_eq!(store.status(), RaceStatus::Idle);
        assert!(store.horses().is_empty());
        assert!(store.current_round_config().is_none());
        assert!(store.last_result().is_none());
        assert!(!store.is_paused());
    }

    #[test]
    fn test_generate_roster() {
        let store = scheduled(12345);
        assert_eq!(store.status(), RaceStatus::Scheduled);

        let ids: Vec<u32> = store.horses().iter().map(|h| h.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<u32>>());
        assert!(store.horses().iter().all(|h| (1..=100).contains(&h.condition)));

        let colors: HashSet<_> = store.horses().iter().map(|h| &h.color).collect();
        assert_eq!(colors.len(), 20);
        let names: HashSet<_> = store.horses().iter().map(|h| &h.name).collect();
        assert_eq!(names.len(), 20);
    }

    #[test]
    fn test_generate_schedule() {
        let store = scheduled(12345);
        let distances: Vec<u32> = store.schedule().iter().map(|r| r.distance).collect();
        assert_eq!(distances, vec![1200, 1400, 1600, 1800, 2000, 2200]);
        assert_eq!(store.distances(), &[1200, 1400, 1600, 1800, 2000, 2200]);

        for (i, round) in store.schedule().iter().enumerate() {
            assert_eq!(round.round, i as u32 + 1);
            assert_eq!(round.horses.len(), 10);
            assert!(round.horses.windows(2).all(|w| w[0] < w[1]), "not ascending: {:?}", round.horses);
            assert!(round.horses.iter().all(|id| store.horse(*id).is_some()));
        }
        assert_eq!(store.current_round_config().map(|r| r.round), Some(1));
    }

    #[test]
    fn test_start_from_idle_is_noop() {
        let mut store = RaceStore::new(1);
        store.start();
        assert_eq!(store.status(), RaceStatus::Idle);
    }

    #[test]
    fn test_start_from_scheduled() {
        let mut store = scheduled(1);
        store.start();
        assert_eq!(store.status(), RaceStatus::Running);
        store.start();
        assert_eq!(store.status(), RaceStatus::Running);
    }

    #[test]
    fn test_start_after_finish_is_noop() {
        let mut store = scheduled(1);
        store.start();
        store.finish();
        store.start();
        assert_eq!(store.status(), RaceStatus::Finished);
    }

    #[test]
    fn test_pause_is_independent_of_status() {
        let mut store = RaceStore::new(1);
        store.set_paused(true);
        assert!(store.is_paused());
        assert_eq!(store.status(), RaceStatus::Idle);
    }

    #[test]
    fn test_duplicate_finish_ignored() {
        let mut store = scheduled(1);
        let finish = Finish { horse_id: 5, time_ms: 71_234.0 };
        assert!(store.record_finish(1, 1200, finish));
        assert!(!store.record_finish(1, 1200, finish));

        assert_eq!(store.results().len(), 1);
        assert_eq!(store.results()[0].finishes, vec![finish]);
    }

    #[test]
    fn test_finishes_sorted_regardless_of_order() {
        let mut store = scheduled(1);
        store.record_finish(2, 1400, Finish { horse_id: 9, time_ms: 90_000.0 });
        store.record_finish(2, 1400, Finish { horse_id: 2, time_ms: 85_000.0 });

        let result = store.last_result().unwrap();
        assert_eq!((result.round, result.distance), (2, 1400));
        let ids: Vec<u32> = result.finishes.iter().map(|f| f.horse_id).collect();
        assert_eq!(ids, vec![2, 9]);
    }

    #[test]
    fn test_separate_rounds_get_separate_results() {
        let mut store = scheduled(1);
        store.record_finish(1, 1200, Finish { horse_id: 1, time_ms: 70_000.0 });
        store.record_finish(2, 1400, Finish { horse_id: 1, time_ms: 80_000.0 });
        assert_eq!(store.results().len(), 2);
        assert_eq!(store.last_result().map(|r| r.round), Some(2));
    }

    #[test]
    fn test_regenerate_resets() {
        let mut store = scheduled(7);
        store.start();
        store.set_paused(true);
        store.advance_round();
        store.record_finish(1, 1200, Finish { horse_id: 1, time_ms: 1.0 });

        store.generate();
        assert_eq!(store.status(), RaceStatus::Scheduled);
        assert_eq!(store.current_round(), 0);
        assert!(store.results().is_empty());
        assert!(!store.is_paused());
    }

    #[test]
    fn test_same_seed_same_cycle() {
        let a = scheduled(99);
        let b = scheduled(99);
        assert_eq!(a.horses(), b.horses());
        assert_eq!(a.schedule(), b.schedule());
    }

    #[test]
    fn test_small_roster_settings() {
        let settings = Settings {
            horse_count: 6,
            horses_per_round: 10,
            ..Settings::default()
        };
        let mut store = RaceStore::with_settings(3, settings);
        store.generate();
        assert_eq!(store.horses().len(), 6);
        assert!(store.schedule().iter().all(|r| r.horses == vec![1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_snapshot_json() {
        let mut store = scheduled(5);
        store.start();
        let json = store.snapshot_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "running");
        assert_eq!(value["currentRound"], 0);
        assert_eq!(value["horses"].as_array().map(|h| h.len()), Some(20));
        assert!(value["lastResult"].is_null());
    }

    proptest! {
        #[test]
        fn prop_advance_past_end_yields_none(seed in any::<u64>(), steps in 0usize..64) {
            let mut store = scheduled(seed);
            for _ in 0..steps {
                store.advance_round();
            }
            prop_assert_eq!(store.current_round(), steps);
            prop_assert_eq!(store.current_round_config().is_some(), steps < 6);
        }

        #[test]
        fn prop_upsert_sorted_and_unique(
            times in proptest::collection::vec((1u32..=20, 0.0f64..200_000.0), 0..60)
        ) {
            let mut store = scheduled(11);
            for (horse_id, time_ms) in &times {
                store.record_finish(3, 1600, Finish { horse_id: *horse_id, time_ms: *time_ms });
            }

            let finishes = store.last_result().map(|r| r.finishes.clone()).unwrap_or_default();
            prop_assert!(finishes.windows(2).all(|w| w[0].time_ms <= w[1].time_ms));
            let ids: HashSet<u32> = finishes.iter().map(|f| f.horse_id).collect();
            prop_assert_eq!(ids.len(), finishes.len());
            let expected: HashSet<u32> = times.iter().map(|(id, _)| *id).collect();
            prop_assert_eq!(ids, expected);
        }
    }
}

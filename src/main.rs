//! Horse Derby entry point
//!
//! Native builds run a full headless derby and print the results. The web
//! build is driven from JavaScript through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use horse_derby::consts::RUNNER_DT_MS;
    use horse_derby::platform::clock_seed;
    use horse_derby::sim::{RaceEvent, RaceStatus, RaceStore, RoundRunner};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);
    log::info!("Horse Derby (native) starting with seed: {}", seed);

    let mut store = RaceStore::new(seed);
    let mut runner = RoundRunner::new(seed.rotate_left(17));
    store.generate();
    store.start();

    println!("\nRoster:");
    for horse in store.horses() {
        println!(
            "  {:>2}  {:<18} {}  condition {:>3}",
            horse.id, horse.name, horse.color, horse.condition
        );
    }

    while store.status() == RaceStatus::Running {
        for event in runner.tick(&mut store, RUNNER_DT_MS) {
            if let RaceEvent::RoundComplete { round, .. } = event {
                print_round(&store, round);
            }
        }
    }

    println!("\n✓ Derby complete ({} rounds)", store.results().len());
}

#[cfg(not(target_arch = "wasm32"))]
fn print_round(store: &horse_derby::RaceStore, round: u32) {
    let Some(result) = store.results().iter().find(|r| r.round == round) else {
        return;
    };

    println!("\nRound {} - {}m", result.round, result.distance);
    for (place, finish) in result.finishes.iter().enumerate() {
        let name = store
            .horse(finish.horse_id)
            .map_or("?", |h| h.name.as_str());
        println!(
            "  {:>2}. {:<18} {:>8.3}s",
            place + 1,
            name,
            finish.time_ms / 1000.0
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}

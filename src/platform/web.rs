//! wasm-bindgen surface for the JavaScript UI
//!
//! State crosses the boundary as JSON strings; the UI parses them itself.

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{RaceStore, RoundRunner};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Fails only if the host page already installed a logger
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js(err: serde_json::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Store + runner pair owned by the page
#[wasm_bindgen]
pub struct WebDerby {
    store: RaceStore,
    runner: RoundRunner,
}

#[wasm_bindgen]
impl WebDerby {
    /// Seeded from the clock when `seed` is omitted
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> WebDerby {
        let seed = seed.unwrap_or_else(super::clock_seed);
        log::info!("Derby initialized with seed: {}", seed);
        WebDerby {
            store: RaceStore::new(seed),
            runner: RoundRunner::new(seed.rotate_left(17)),
        }
    }

    /// Build with settings JSON; malformed settings fall back to defaults
    pub fn with_settings(seed: u64, settings_json: &str) -> WebDerby {
        WebDerby {
            store: RaceStore::with_settings(seed, Settings::from_json_or_default(settings_json)),
            runner: RoundRunner::new(seed.rotate_left(17)),
        }
    }

    pub fn generate(&mut self) {
        self.store.generate();
        self.runner.reset();
    }

    pub fn start(&mut self) {
        self.store.start();
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.store.set_paused(paused);
    }

    pub fn paused(&self) -> bool {
        self.store.is_paused()
    }

    /// Advance by `dt_ms` of race time; returns the events as a JSON array
    pub fn tick(&mut self, dt_ms: f64) -> Result<String, JsValue> {
        let events = self.runner.tick(&mut self.store, dt_ms);
        serde_json::to_string(&events).map_err(to_js)
    }

    /// Full store snapshot as JSON
    pub fn state_json(&self) -> Result<String, JsValue> {
        self.store.snapshot_json().map_err(to_js)
    }

    /// Per-horse progress in the running round as JSON
    pub fn progress_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.runner.progress()).map_err(to_js)
    }
}

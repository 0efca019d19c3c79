//! Platform abstraction layer
//!
//! Browser bindings live in `web` (wasm32 only). Native hosts drive
//! `RaceStore` and `RoundRunner` directly.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Seed derived from the wall clock
#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Seed derived from the wall clock
#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

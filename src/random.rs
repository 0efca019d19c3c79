//! Random helpers for roster generation
//!
//! Pure functions over a caller-supplied RNG, so the store stays deterministic
//! for a given seed.

use rand::Rng;

use crate::consts::{COLOR_LIGHTNESS, COLOR_SATURATION, GOLDEN_RATIO_CONJUGATE};

/// Generate `n` visually distinct colors as `#rrggbb` strings.
///
/// Hues step around the wheel by the golden-angle fraction from a random
/// starting point, which keeps neighbours far apart for any `n`.
pub fn generate_colors<R: Rng>(rng: &mut R, n: usize) -> Vec<String> {
    generate_colors_with(rng, n, COLOR_SATURATION, COLOR_LIGHTNESS)
}

/// Golden-angle colors with explicit saturation/lightness (percent)
pub fn generate_colors_with<R: Rng>(
    rng: &mut R,
    n: usize,
    saturation: f64,
    lightness: f64,
) -> Vec<String> {
    let seed: f64 = rng.random();
    (0..n)
        .map(|i| {
            let hue = (seed + i as f64 * GOLDEN_RATIO_CONJUGATE).fract();
            hsl_to_hex(hue * 360.0, saturation, lightness)
        })
        .collect()
}

/// Pick `n` elements without replacement, in random order.
///
/// Returns every element (shuffled) when `n` exceeds the input length.
pub fn pick_n<T: Clone, R: Rng>(rng: &mut R, items: &[T], n: usize) -> Vec<T> {
    let mut pool: Vec<T> = items.to_vec();
    let mut picked = Vec::with_capacity(n.min(pool.len()));
    while picked.len() < n && !pool.is_empty() {
        let idx = rng.random_range(0..pool.len());
        picked.push(pool.swap_remove(idx));
    }
    picked
}

/// Convert HSL (hue in degrees, saturation/lightness in percent) to `#rrggbb`
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);
    let a = s * l.min(1.0 - l);

    let channel = |n: f64| -> u8 {
        let k = (n + h / 30.0).rem_euclid(12.0);
        let c = l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
        (c * 255.0).round().clamp(0.0, 255.0) as u8
    };

    format!("#{:02x}{:02x}{:02x}", channel(0.0), channel(8.0), channel(4.0))
}

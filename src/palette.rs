//! Swatch generation for lightness-ordering questions.
//!
//! One palette shares a random hue and a rich saturation; only lightness
//! varies, in steps of `LIGHTNESS_GAP` inside a range that avoids near-black
//! and near-white shades. The result is shuffled before it is shown.
//!
//! Example (hue 210, saturation 70, start 30, four swatches):
//!   lightness 30, 40, 50, 60 with ids color-0 .. color-3, then shuffled.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::domain::{Hsl, StimulusItem};

pub const MIN_LIGHTNESS: u8 = 20;
pub const MAX_LIGHTNESS: u8 = 75;
pub const LIGHTNESS_GAP: u8 = 10;
pub const MIN_SATURATION: f32 = 60.0;
pub const MAX_SATURATION: f32 = 75.0;

/// Number of distinct lightness steps between `MIN_LIGHTNESS` and `MAX_LIGHTNESS`.
pub const MAX_SWATCHES: usize = ((MAX_LIGHTNESS - MIN_LIGHTNESS) / LIGHTNESS_GAP) as usize + 1;

/// The random draws behind one palette.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteSeed {
    pub hue: u16,
    pub saturation: f32,
    pub start: u8,
}

/// Clamp a requested swatch count into `1..=MAX_SWATCHES`.
pub fn clamp_count(count: usize) -> usize {
    let clamped = count.clamp(1, MAX_SWATCHES);
    if clamped != count {
        warn!(target: "attempt", requested = count, used = clamped, "Swatch count out of range; clamped");
    }
    clamped
}

/// Largest lightness start that still fits `count` steps under `MAX_LIGHTNESS`.
pub fn max_start(count: usize) -> u8 {
    let span = LIGHTNESS_GAP as usize * count.saturating_sub(1);
    MAX_LIGHTNESS.saturating_sub(span.min(u8::MAX as usize) as u8)
}

/// Draw hue, saturation and lightness start for `count` swatches.
pub fn draw_seed<R: Rng + ?Sized>(rng: &mut R, count: usize) -> PaletteSeed {
    let count = clamp_count(count);
    PaletteSeed {
        hue: rng.gen_range(0..360),
        saturation: rng.gen_range(MIN_SATURATION..=MAX_SATURATION),
        start: rng.gen_range(MIN_LIGHTNESS..=max_start(count)),
    }
}

/// Build `count` swatches in ascending lightness order, ids assigned by position.
///
/// `count` is clamped like `generate` does and `start` is pulled into
/// `MIN_LIGHTNESS..=max_start(count)`, so every shade stays inside the range.
pub fn build_swatches(seed: PaletteSeed, count: usize) -> Vec<StimulusItem> {
    let count = clamp_count(count);
    let start = seed.start.clamp(MIN_LIGHTNESS, max_start(count));
    (0..count)
        .map(|i| {
            let lightness = start + LIGHTNESS_GAP * i as u8;
            StimulusItem {
                id: format!("color-{i}"),
                color: Hsl { hue: seed.hue, saturation: seed.saturation, lightness },
                lightness,
            }
        })
        .collect()
}

/// Generate a shuffled palette of `count` swatches.
///
/// The shuffle is unconstrained: an already-sorted order can come out by chance.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<StimulusItem> {
    let count = clamp_count(count);
    let seed = draw_seed(rng, count);
    let mut items = build_swatches(seed, count);
    items.shuffle(rng);
    items
}

// Glitch storage + random glitch generation.
// Visual: every rectangle in the store is painted over the phone screen, oldest first,
// so the newest corruption always sits on top.

use crate::types::{Glitch, Rgba, Viewport};
use rand::Rng;
use std::collections::VecDeque;

/// Smallest side of a spawned glitch, in pixels.
pub const MIN_GLITCH_SIDE: f32 = 5.0;
/// Widest glitch as a fraction of the canvas width.
pub const MAX_WIDTH_FRACTION: f32 = 0.2;
/// Tallest glitch as a fraction of the canvas height.
pub const MAX_HEIGHT_FRACTION: f32 = 0.05;

/// Ordered glitches. Insertion order is draw order.
#[derive(Clone, Debug, Default)]
pub struct GlitchStore {
    items: VecDeque<Glitch>,
}

impl GlitchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one glitch on top of the others. Capacity is not checked here.
    pub fn add(&mut self, glitch: Glitch) {
        self.items.push_back(glitch);
    }

    /// Evict the oldest glitches until at most `max` remain.
    pub fn enforce_capacity(&mut self, max: usize) {
        if self.items.len() > max {
            let excess = self.items.len() - max;
            self.items.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Glitch> {
        self.items.iter()
    }
}

/// Uniform draw in `[lo, hi)`; an empty range yields `lo`.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi - lo <= f32::EPSILON {
        return lo;
    }
    rng.random_range(lo..hi)
}

/// Roll one glitch somewhere on the canvas.
/// Visual: a strongly coloured, half-transparent bar of random size.
pub fn random_glitch<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Glitch {
    let color = Rgba {
        r: rng.random_range(0..=255),
        g: rng.random_range(0..=255),
        b: rng.random_range(0..=255),
        a: rng.random_range(100..=200),
    };

    let x = uniform(rng, 0.0, viewport.w());
    let y = uniform(rng, 0.0, viewport.h());
    // Tiny canvases collapse the size range to the minimum side.
    let max_w = (viewport.w() * MAX_WIDTH_FRACTION).max(MIN_GLITCH_SIDE);
    let max_h = (viewport.h() * MAX_HEIGHT_FRACTION).max(MIN_GLITCH_SIDE);
    let w = uniform(rng, MIN_GLITCH_SIDE, max_w);
    let h = uniform(rng, MIN_GLITCH_SIDE, max_h);

    Glitch { x, y, w, h, color }
}

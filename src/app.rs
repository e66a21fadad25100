// The one place all mutable state lives, plus the frame cadence.
// Input writes into `Session`; the renderer only reads it.

use crate::glitch::GlitchStore;
use crate::integrity::{IntegrityState, TapOutcome};
use crate::render::render;
use crate::types::{FrameBuffer, Viewport};
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Everything a tap can change, owned by the top-level loop.
pub struct Session {
    pub integrity: IntegrityState,
    pub glitches: GlitchStore,
    pub viewport: Viewport,
    rng: Pcg32,
}

impl Session {
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        Self {
            integrity: IntegrityState::new(),
            glitches: GlitchStore::new(),
            viewport,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Run one tap to completion.
    pub fn tap(&mut self) -> TapOutcome {
        let outcome = self.integrity.register_tap(&mut self.glitches, self.viewport, &mut self.rng);
        match outcome {
            TapOutcome::Ignored => {}
            TapOutcome::Advanced { counter, spawned } => log::debug!(
                "tap {counter}: +{spawned} glitches ({} retained)",
                self.glitches.len()
            ),
            TapOutcome::Expired { spawned } => log::info!(
                "device expired after {} taps (+{spawned} glitches, {} retained)",
                self.integrity.counter(),
                self.glitches.len()
            ),
        }
        outcome
    }
}

/// Whether new frames are being drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cadence {
    Running,
    Stopped,
}

pub struct App {
    pub session: Session,
    cadence: Cadence,
}

impl App {
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        Self { session: Session::new(viewport, seed), cadence: Cadence::Running }
    }

    pub fn viewport(&self) -> Viewport {
        self.session.viewport
    }

    #[cfg(test)]
    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Record the host's current size. Returns true if it changed.
    /// A change while stopped schedules exactly one more frame.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport == self.session.viewport {
            return false;
        }
        log::debug!(
            "resize {}x{} -> {}x{}",
            self.session.viewport.width,
            self.session.viewport.height,
            viewport.width,
            viewport.height
        );
        self.session.viewport = viewport;
        self.cadence = Cadence::Running;
        true
    }

    pub fn wants_frame(&self) -> bool {
        self.cadence == Cadence::Running
    }

    /// Draw the current state into `fb`. Once the dead screen is up, stop.
    pub fn draw(&mut self, background: &FrameBuffer, fb: &mut FrameBuffer) {
        render(&self.session.integrity, &self.session.glitches, background, fb);
        if self.session.integrity.is_dead() {
            self.cadence = Cadence::Stopped;
        }
    }
}

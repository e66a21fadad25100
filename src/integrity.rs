// The tap counter and its one-way trip to death.
// Visual: each tap bumps the big number in the middle, sprays more glitches than the
// last one, and rewrites the status line; tap #100 swaps everything for MORTEM.

use crate::config::consts::{GLITCH_CAPACITY, MAX_GLITCHES_PER_TAP, MAX_TOUCHES};
use crate::glitch::{random_glitch, GlitchStore};
use crate::types::Viewport;
use rand::Rng;

pub const MSG_IDLE: &str = "Tap the screen to begin the cycle...";
pub const MSG_DEAD: &str = "The device has completed its cycle.";
pub const MSG_EPITAPH: &str = "Rest in digital peace.";

/// What a single tap did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// Already dead; nothing changed.
    Ignored,
    /// Counter advanced and `spawned` glitches were added.
    Advanced { counter: u32, spawned: usize },
    /// This tap used up the budget; the device is now dead.
    Expired { spawned: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegrityState {
    counter: u32,
    is_dead: bool,
    message: String,
}

impl Default for IntegrityState {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegrityState {
    pub fn new() -> Self {
        Self { counter: 0, is_dead: false, message: status_message(0, false) }
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Advance one tap: count it, spray glitches into `store`, refresh the message.
    /// All of this tap's glitches are appended before the store is trimmed.
    pub fn register_tap<R: Rng + ?Sized>(
        &mut self,
        store: &mut GlitchStore,
        viewport: Viewport,
        rng: &mut R,
    ) -> TapOutcome {
        if self.is_dead {
            return TapOutcome::Ignored;
        }
        if self.counter < MAX_TOUCHES {
            self.counter += 1;
        }

        let spawned = glitches_for(self.counter);
        for _ in 0..spawned {
            store.add(random_glitch(rng, viewport));
        }
        store.enforce_capacity(GLITCH_CAPACITY);

        self.is_dead = self.counter >= MAX_TOUCHES;
        self.message = status_message(self.counter, self.is_dead);

        if self.is_dead {
            TapOutcome::Expired { spawned }
        } else {
            TapOutcome::Advanced { counter: self.counter, spawned }
        }
    }
}

/// How many glitches the tap that brings the counter to `counter` spawns:
/// `counter` mapped linearly from `[0, MAX_TOUCHES]` onto `[1, 15]`, floored.
pub fn glitches_for(counter: u32) -> usize {
    let t = counter as f64 / MAX_TOUCHES as f64;
    let n = 1.0 + t * (MAX_GLITCHES_PER_TAP as f64 - 1.0);
    n.floor() as usize
}

/// Status line for a given counter. Bands are fractions of `MAX_TOUCHES`.
pub fn status_message(counter: u32, is_dead: bool) -> String {
    let c = counter as f64;
    let max = MAX_TOUCHES as f64;

    if is_dead || counter >= MAX_TOUCHES {
        MSG_DEAD.to_string()
    } else if counter == 0 {
        MSG_IDLE.to_string()
    } else if c < max * 0.3 {
        format!("System integrity: {counter}% — stable for now.")
    } else if c < max * 0.7 {
        format!("System integrity: {counter}% — anomalies detected.")
    } else {
        format!("System integrity: {counter}% — critical deterioration!")
    }
}

// Pointer handling: one press of the left button = one tap.
// Visual: each click bumps the counter once, no matter how long the button is held.

use crate::app::Session;
use crate::integrity::TapOutcome;

/// The only input the toy understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Pressed,
}

/// Whether the host should see the event after us. Taps never go further.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Handled {
    pub outcome: TapOutcome,
    pub propagation: Propagation,
}

#[derive(Default)]
pub struct InputController {
    was_down: bool, // button state at the previous sample
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current button state; yields an event on the up->down edge.
    pub fn sample(&mut self, down: bool) -> Option<PointerEvent> {
        let pressed = down && !self.was_down;
        self.was_down = down;
        pressed.then_some(PointerEvent::Pressed)
    }

    /// Apply an event to the session. Consumed even when the tap changes nothing.
    pub fn handle(&mut self, event: PointerEvent, session: &mut Session) -> Handled {
        let outcome = match event {
            PointerEvent::Pressed => session.tap(),
        };
        Handled { outcome, propagation: Propagation::Stop }
    }

    /// `sample` + `handle` in one step.
    pub fn poll(&mut self, down: bool, session: &mut Session) -> Option<Handled> {
        self.sample(down).map(|event| self.handle(event, session))
    }
}

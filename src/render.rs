// Turns the current state into one frame. No state of its own: the same inputs
// always produce the same pixels.
//
// Active frame, bottom to top: phone screen, glitches (oldest first), the tap counter
// in the middle, the status line near the bottom.
// Dead frame: black, a big red MORTEM, and a two-line epitaph.

use crate::draw::{clear, draw_text_centered, fill_rect};
use crate::glitch::GlitchStore;
use crate::integrity::{IntegrityState, MSG_DEAD, MSG_EPITAPH};
use crate::skin::stretch_nearest;
use crate::types::{FrameBuffer, Rgba};

pub const MORTEM: &str = "MORTEM";

// Text sizes are fractions of the canvas width; anchors are fractions of the height.
const MORTEM_SIZE: f32 = 0.15;
const EPITAPH_SIZE: f32 = 0.05;
const EPITAPH_ROWS: [f32; 2] = [0.70, 0.75];
const COUNTER_SIZE: f32 = 0.10;
const STATUS_SIZE: f32 = 0.03;
const STATUS_ROW: f32 = 0.90;

/// Draw the frame for `state` into `fb`, using `fb`'s size as the canvas.
/// `background` is stretched to the canvas if it isn't already that size.
pub fn render(
    state: &IntegrityState,
    glitches: &GlitchStore,
    background: &FrameBuffer,
    fb: &mut FrameBuffer,
) {
    if state.is_dead() {
        render_dead(fb);
    } else {
        render_active(state, glitches, background, fb);
    }
}

fn render_dead(fb: &mut FrameBuffer) {
    let (w, h) = (fb.width as f32, fb.height as f32);
    clear(fb, Rgba::BLACK);
    draw_text_centered(fb, w / 2.0, h / 2.0, MORTEM, w * MORTEM_SIZE, Rgba::RED);
    for (line, row) in [MSG_DEAD, MSG_EPITAPH].into_iter().zip(EPITAPH_ROWS) {
        draw_text_centered(fb, w / 2.0, h * row, line, w * EPITAPH_SIZE, Rgba::WHITE);
    }
}

fn render_active(
    state: &IntegrityState,
    glitches: &GlitchStore,
    background: &FrameBuffer,
    fb: &mut FrameBuffer,
) {
    if background.size() == fb.size() {
        fb.pixels.copy_from_slice(&background.pixels);
    } else {
        let fitted = stretch_nearest(background, fb.size());
        fb.pixels.copy_from_slice(&fitted.pixels);
    }

    // Stored coordinates are absolute; a resize does not move existing glitches.
    for g in glitches.iter() {
        fill_rect(fb, g.x, g.y, g.w, g.h, g.color);
    }

    let (w, h) = (fb.width as f32, fb.height as f32);
    let counter = state.counter().to_string();
    draw_text_centered(fb, w / 2.0, h / 2.0, &counter, w * COUNTER_SIZE, Rgba::WHITE);
    draw_text_centered(fb, w / 2.0, h * STATUS_ROW, state.message(), w * STATUS_SIZE, Rgba::WHITE);
}

// Window + software drawing utilities.
// Visual effects provided here:
// 1) A resizable window that shows the phone screen.
// 2) Solid and translucent rectangles (background fills, glitches).
// 3) A tiny 5x7 bitmap font, scaled up for the counter and MORTEM.

use crate::error::Error;
use crate::types::{FrameBuffer, Rgba, Viewport};
use minifb::{Key, MouseButton, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window at the configured size.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Process window events without touching the displayed image.
    /// Visual: the last frame (e.g. MORTEM) stays frozen on screen.
    pub fn pump(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// True while the left mouse button is held.
    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Current inner size of the window.
    pub fn viewport(&self) -> Viewport {
        let (w, h) = self.window.get_size();
        Viewport::new(w, h)
    }
}

/* ---------- Software drawing: pixels and rectangles ---------- */

/// Source-over blend of one channel; `a` is the source alpha.
#[inline]
fn mix(src: u8, dst: u8, a: u8) -> u32 {
    let a = a as u32;
    (src as u32 * a + dst as u32 * (255 - a) + 127) / 255
}

/// Blend `color` over a packed 0x00RRGGBB pixel.
#[inline]
pub fn blend_pixel(dst: u32, color: Rgba) -> u32 {
    match color.a {
        255 => color.packed(),
        0 => dst,
        a => {
            let dr = ((dst >> 16) & 0xFF) as u8;
            let dg = ((dst >> 8) & 0xFF) as u8;
            let db = (dst & 0xFF) as u8;
            (mix(color.r, dr, a) << 16) | (mix(color.g, dg, a) << 8) | mix(color.b, db, a)
        }
    }
}

/// Set every pixel to one opaque colour.
pub fn clear(fb: &mut FrameBuffer, color: Rgba) {
    let c = color.packed();
    for p in &mut fb.pixels {
        *p = c;
    }
}

/// Fill the rectangle covering pixel columns `[x, x+w)` and rows `[y, y+h)`,
/// clipped to the buffer. Edges are rounded to the nearest pixel boundary.
/// Visual: a (possibly translucent) bar appears on top of whatever is there.
pub fn fill_rect(fb: &mut FrameBuffer, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
    let clip = |v: f32, max: usize| v.round().clamp(0.0, max as f32) as usize;
    let (x0, x1) = (clip(x, fb.width), clip(x + w, fb.width));
    let (y0, y1) = (clip(y, fb.height), clip(y + h, fb.height));
    if x1 <= x0 || y1 <= y0 {
        return;
    }

    for row in y0..y1 {
        let line = &mut fb.pixels[row * fb.width + x0..row * fb.width + x1];
        for px in line {
            *px = blend_pixel(*px, color);
        }
    }
}

/* ---------- 5x7 bitmap font ---------- */

pub const GLYPH_W: i32 = 5;
pub const GLYPH_H: i32 = 7;
/// Horizontal advance per character, in font cells (glyph + 1 cell gap).
pub const ADVANCE: i32 = GLYPH_W + 1;

/// Return a 5x7 glyph bitmap. Lowercase uses the uppercase shapes.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00110,0b00100,0b01000),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '%' => g!(0b11000,0b11001,0b00010,0b00100,0b01000,0b10011,0b00011),
        '-' | '—' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Integer cell size that makes the 5x7 font roughly `size` pixels tall
/// (cap height ≈ 70% of the nominal size).
pub fn glyph_scale(size: f32) -> i32 {
    ((size * 0.7 / GLYPH_H as f32).round() as i32).max(1)
}

/// `glyph_scale(size)`, shrunk until `text` fits in `max_width` pixels (never below 1).
pub fn fit_scale(text: &str, size: f32, max_width: usize) -> i32 {
    let cells = (text.chars().count() as i32 * ADVANCE - 1).max(1);
    let widest = (max_width as i32 / cells).max(1);
    glyph_scale(size).min(widest)
}

/// Pixel extent `(width, height)` of `text` at cell size `scale`.
pub fn text_extent(text: &str, scale: i32) -> (i32, i32) {
    let n = text.chars().count() as i32;
    if n == 0 {
        return (0, 0);
    }
    ((n * ADVANCE - 1) * scale, GLYPH_H * scale)
}

/// Draw a single glyph with its top-left cell at (x,y), each cell `scale` px square.
fn draw_char(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, scale: i32, color: Rgba) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..GLYPH_W {
            if (rowbits & (1 << (4 - rx))) != 0 {
                let px = (x + rx * scale) as f32;
                let py = (y + ry as i32 * scale) as f32;
                fill_rect(fb, px, py, scale as f32, scale as f32, color);
            }
        }
    }
}

/// Draw `text` centered on (cx, cy), approximately `size` pixels tall, shrunk if
/// needed so it fits the buffer width.
/// Returns the drawn box `(x, y, w, h)` in pixels.
pub fn draw_text_centered(
    fb: &mut FrameBuffer,
    cx: f32,
    cy: f32,
    text: &str,
    size: f32,
    color: Rgba,
) -> (i32, i32, i32, i32) {
    let scale = fit_scale(text, size, fb.width);
    let (w, h) = text_extent(text, scale);
    let x0 = (cx - w as f32 / 2.0).round() as i32;
    let y0 = (cy - h as f32 / 2.0).round() as i32;

    let mut x = x0;
    for ch in text.chars() {
        draw_char(fb, x, y0, ch, scale, color);
        x += ADVANCE * scale;
    }
    (x0, y0, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_and_transparent_blend_extremes() {
        let dst = 0x00_12_34_56;
        assert_eq!(blend_pixel(dst, Rgba::RED), 0x00_FF_00_00);
        assert_eq!(blend_pixel(dst, Rgba { a: 0, ..Rgba::RED }), dst);
    }

    #[test]
    fn half_alpha_lands_between() {
        let out = blend_pixel(0x00_00_00_00, Rgba { r: 200, g: 100, b: 0, a: 128 });
        assert_eq!((out >> 16) & 0xFF, 100);
        assert_eq!((out >> 8) & 0xFF, 50);
        assert_eq!(out & 0xFF, 0);
    }

    #[test]
    fn fill_rect_clips_to_buffer() {
        let mut fb = FrameBuffer::filled(4, 4, 0);
        fill_rect(&mut fb, -2.0, 2.0, 10.0, 10.0, Rgba::WHITE);
        assert_eq!(fb.get(0, 1), Some(0));
        assert_eq!(fb.get(0, 2), Some(0x00_FF_FF_FF));
        assert_eq!(fb.get(3, 3), Some(0x00_FF_FF_FF));
    }

    #[test]
    fn fill_rect_entirely_outside_is_noop() {
        let mut fb = FrameBuffer::filled(4, 4, 7);
        fill_rect(&mut fb, 10.0, 10.0, 5.0, 5.0, Rgba::WHITE);
        assert!(fb.pixels.iter().all(|&p| p == 7));
    }

    #[test]
    fn every_message_character_has_a_glyph() {
        let text = "System integrity: 42% — anomalies detected, critical deterioration! MORTEM";
        for ch in text.chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph for {ch:?}");
        }
    }

    #[test]
    fn extent_counts_cells() {
        assert_eq!(text_extent("", 3), (0, 0));
        assert_eq!(text_extent("AB", 1), (11, 7));
        assert_eq!(text_extent("AB", 2), (22, 14));
        assert_eq!(glyph_scale(1.0), 1);
        assert_eq!(glyph_scale(60.0), 6);
    }

    #[test]
    fn fit_scale_shrinks_long_lines_only() {
        // 35 chars = 209 cells; scale 2 would be 418px.
        let line = "The device has completed its cycle.";
        assert_eq!(fit_scale(line, 20.0, 400), 1);
        assert_eq!(fit_scale(line, 20.0, 418), 2);
        assert_eq!(fit_scale("MORTEM", 60.0, 400), 6);
        assert_eq!(fit_scale(line, 20.0, 10), 1);
    }

    #[test]
    fn centered_text_stays_inside_its_box() {
        let mut fb = FrameBuffer::filled(100, 40, 0);
        let (x, y, w, h) = draw_text_centered(&mut fb, 50.0, 20.0, "HI", 20.0, Rgba::WHITE);
        let mut lit = 0;
        for py in 0..fb.height {
            for px in 0..fb.width {
                if fb.get(px, py) == Some(0x00_FF_FF_FF) {
                    lit += 1;
                    let (px, py) = (px as i32, py as i32);
                    assert!(px >= x && px < x + w && py >= y && py < y + h);
                }
            }
        }
        assert!(lit > 0);
    }
}

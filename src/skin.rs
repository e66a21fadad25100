// Loads the phone-screen picture and keeps a copy stretched to the window.
// Visual expectation: the image fills the whole window edge to edge, whatever its
// native aspect ratio, and is re-stretched when the window is resized.

use crate::error::Error;
use crate::types::{FrameBuffer, Viewport};
use image::RgbImage;
use std::path::Path;

pub struct Skin {
    source: FrameBuffer,          // the decoded image at its native size
    fitted: Option<FrameBuffer>,  // last stretched copy, reused while the size holds
}

impl Skin {
    /// Open and decode the image at `path`. Any failure here is fatal for the app.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let img = image::open(path)
            .map_err(|e| Error::SkinLoad(format!("{}: {e}", path.display())))?;
        let skin = Self::from_rgb(&img.to_rgb8());
        if skin.source.pixels.is_empty() {
            return Err(Error::SkinLoad(format!("{}: image has no pixels", path.display())));
        }
        Ok(skin)
    }

    /// Wrap an already-decoded RGB image.
    pub fn from_rgb(img: &RgbImage) -> Self {
        // Pack each RGB<u8> as 0x00RRGGBB.
        let (w, h) = img.dimensions();
        let mut out = Vec::with_capacity((w as usize) * (h as usize));
        for (_x, _y, pixel) in img.enumerate_pixels() {
            let r = pixel[0] as u32;
            let g = pixel[1] as u32;
            let b = pixel[2] as u32;
            out.push((r << 16) | (g << 8) | b);
        }
        Self {
            source: FrameBuffer { width: w as usize, height: h as usize, pixels: out },
            fitted: None,
        }
    }

    /// Native image size.
    pub fn native_size(&self) -> Viewport {
        self.source.size()
    }

    /// The image stretched to `viewport`; recomputed only when the size changes.
    pub fn fitted(&mut self, viewport: Viewport) -> &FrameBuffer {
        if self.fitted.as_ref().map(FrameBuffer::size) != Some(viewport) {
            self.fitted = None;
        }
        let source = &self.source;
        self.fitted.get_or_insert_with(|| stretch_nearest(source, viewport))
    }
}

/// Nearest-neighbour resample of `src` to exactly `to`.
pub fn stretch_nearest(src: &FrameBuffer, to: Viewport) -> FrameBuffer {
    let mut out = FrameBuffer::filled(to.width, to.height, 0);
    if src.width == 0 || src.height == 0 {
        return out;
    }
    for y in 0..to.height {
        let sy = y * src.height / to.height;
        let src_row = &src.pixels[sy * src.width..(sy + 1) * src.width];
        let dst_row = &mut out.pixels[y * to.width..(y + 1) * to.width];
        for (x, px) in dst_row.iter_mut().enumerate() {
            *px = src_row[x * src.width / to.width];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn quadrants() -> RgbImage {
        // 2x2: red, green / blue, white
        RgbImage::from_fn(2, 2, |x, y| match (x, y) {
            (0, 0) => Rgb([255, 0, 0]),
            (1, 0) => Rgb([0, 255, 0]),
            (0, 1) => Rgb([0, 0, 255]),
            _ => Rgb([255, 255, 255]),
        })
    }

    #[test]
    fn packs_rgb_row_major() {
        let skin = Skin::from_rgb(&quadrants());
        assert_eq!(skin.native_size(), Viewport::new(2, 2));
        assert_eq!(skin.source.pixels, vec![0xFF0000, 0x00FF00, 0x0000FF, 0xFFFFFF]);
    }

    #[test]
    fn stretch_fills_every_target_pixel() {
        let mut skin = Skin::from_rgb(&quadrants());
        let fb = skin.fitted(Viewport::new(4, 6)).clone();
        assert_eq!((fb.width, fb.height), (4, 6));
        assert_eq!(fb.get(0, 0), Some(0xFF0000));
        assert_eq!(fb.get(3, 0), Some(0x00FF00));
        assert_eq!(fb.get(0, 5), Some(0x0000FF));
        assert_eq!(fb.get(3, 5), Some(0xFFFFFF));
    }

    #[test]
    fn refits_after_resize() {
        let mut skin = Skin::from_rgb(&quadrants());
        assert_eq!(skin.fitted(Viewport::new(8, 8)).size(), Viewport::new(8, 8));
        assert_eq!(skin.fitted(Viewport::new(3, 5)).size(), Viewport::new(3, 5));
    }

    #[test]
    fn zero_sized_target_is_empty() {
        let fb = stretch_nearest(&FrameBuffer::filled(2, 2, 1), Viewport::new(0, 0));
        assert!(fb.pixels.is_empty());
    }

    #[test]
    fn bundled_skin_decodes() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/smartphone_screen.png");
        let skin = Skin::load(&path).expect("bundled skin should load");
        assert_eq!(skin.native_size(), Viewport::new(360, 780));
    }

    #[test]
    fn missing_file_is_a_skin_error() {
        let err = Skin::load(Path::new("definitely/not/here.png")).err();
        assert!(matches!(err, Some(Error::SkinLoad(_))));
    }
}

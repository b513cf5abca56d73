use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder};
use imgref::{Img, ImgVec};
use rgb::RGB8;

use crate::RenderError;

/// An RGB image filled with a backdrop color
///
/// All drawing operations clip to the image bounds, so callers may draw partially (or entirely)
/// off canvas.
#[derive(Clone)]
pub struct Canvas {
    image: ImgVec<RGB8>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("image", &"...")
            .finish()
    }
}

impl Canvas {
    pub fn new(width: usize, height: usize, backdrop: RGB8) -> Self {
        Canvas {
            image: Img::new(vec![backdrop; width * height], width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.image.width()
    }

    pub fn height(&self) -> usize {
        self.image.height()
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<RGB8> {
        if x < self.width() && y < self.height() {
            Some(self.image[(x, y)])
        } else {
            None
        }
    }

    /// Clip a span starting at `start` with `len` pixels to `0..limit`
    fn clip(start: i32, len: u32, limit: usize) -> std::ops::Range<usize> {
        let end = (i64::from(start) + i64::from(len)).clamp(0, limit as i64) as usize;
        let start = i64::from(start).clamp(0, limit as i64) as usize;
        start..end
    }

    /// Fill a `width` x `height` rectangle whose top-left corner is at (`x`, `y`)
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: RGB8) {
        let xs = Self::clip(x, width, self.width());
        for row in Self::clip(y, height, self.height()) {
            for col in xs.clone() {
                self.image[(col, row)] = color;
            }
        }
    }

    /// Draw a one pixel border just inside a `width` x `height` rectangle
    pub fn outline_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: RGB8) {
        if width == 0 || height == 0 {
            return;
        }
        let right = x + width as i32 - 1;
        let bottom = y + height as i32 - 1;
        self.fill_rect(x, y, width, 1, color);
        self.fill_rect(x, bottom, width, 1, color);
        self.fill_rect(x, y, 1, height, color);
        self.fill_rect(right, y, 1, height, color);
    }

    /// Mix `color` into one pixel by `coverage` (0 keeps the pixel, 1 replaces it)
    pub fn blend(&mut self, x: i32, y: i32, color: RGB8, coverage: f32) {
        if x < 0 || y < 0 || x as usize >= self.width() || y as usize >= self.height() {
            return;
        }
        let coverage = coverage.max(0.0).min(1.0);
        if coverage == 0.0 {
            return;
        }

        let pixel = &mut self.image[(x as usize, y as usize)];
        let mix = |under: u8, over: u8| -> u8 {
            (f32::from(under) + (f32::from(over) - f32::from(under)) * coverage).round() as u8
        };
        *pixel = RGB8::new(
            mix(pixel.r, color.r),
            mix(pixel.g, color.g),
            mix(pixel.b, color.b),
        );
    }

    /// Encode the canvas as an RGB PNG in memory
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        flame!(guard "encode_png");

        let mut bytes = Vec::with_capacity(self.width() * self.height() * 3);
        for pixel in self.image.as_ref().pixels() {
            bytes.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
        }

        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(
            &bytes,
            self.width() as u32,
            self.height() as u32,
            ExtendedColorType::Rgb8,
        )?;

        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
    const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };

    #[test]
    fn starts_filled_with_backdrop() {
        let canvas = Canvas::new(4, 3, RED);
        assert_eq!(canvas.width(), 4);
        assert_eq!(canvas.height(), 3);
        assert_eq!(canvas.pixel(3, 2), Some(RED));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn fill_rect_clips() {
        let mut canvas = Canvas::new(4, 4, BLACK);
        canvas.fill_rect(-2, 2, 4, 10, RED);

        assert_eq!(canvas.pixel(0, 2), Some(RED));
        assert_eq!(canvas.pixel(1, 3), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(BLACK));
        assert_eq!(canvas.pixel(0, 1), Some(BLACK));
    }

    #[test]
    fn outline_leaves_inside_alone() {
        let mut canvas = Canvas::new(5, 5, BLACK);
        canvas.outline_rect(0, 0, 5, 5, RED);

        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(4, 4), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(BLACK));
    }

    #[test]
    fn blend_mixes_by_coverage() {
        let mut canvas = Canvas::new(2, 1, BLACK);
        canvas.blend(0, 0, RED, 0.5);
        canvas.blend(1, 0, RED, 1.0);
        canvas.blend(-1, 0, RED, 1.0);

        assert_eq!(canvas.pixel(0, 0), Some(RGB8::new(128, 0, 0)));
        assert_eq!(canvas.pixel(1, 0), Some(RED));
    }

    #[test]
    fn encodes_png() {
        let png = Canvas::new(3, 2, RED).encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}

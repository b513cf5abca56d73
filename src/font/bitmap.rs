use font8x8::{UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, LATIN_FONTS};
use rgb::RGB8;

use crate::canvas::Canvas;

/// Glyphs are 8x8 pixels before scaling
const GLYPH_SIZE: u32 = 8;

/// The `font8x8` glyphs drawn at an integer scale
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapFont {
    scale: u32,
}

impl BitmapFont {
    /// Pick the largest integer scale that stays within `size` pixels (never below 1)
    pub fn for_size(size: f32) -> Self {
        let scale = (size / GLYPH_SIZE as f32).floor().max(1.0) as u32;
        BitmapFont { scale }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn cell_width(&self) -> u32 {
        GLYPH_SIZE * self.scale
    }

    pub fn glyph_height(&self) -> u32 {
        GLYPH_SIZE * self.scale
    }

    pub fn text_width(&self, text: &str) -> u32 {
        text.chars().count() as u32 * self.cell_width()
    }

    fn glyph(c: char) -> Option<[u8; 8]> {
        BASIC_FONTS
            .get(c)
            .or_else(|| LATIN_FONTS.get(c))
            .or_else(|| BOX_FONTS.get(c))
            .or_else(|| BLOCK_FONTS.get(c))
    }

    pub fn draw_text(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, color: RGB8) {
        let scale = self.scale as i32;
        for (i, c) in text.chars().enumerate() {
            // Characters without a glyph still take up their cell
            let glyph = match Self::glyph(c) {
                Some(glyph) => glyph,
                None => continue,
            };

            let left = x + i as i32 * self.cell_width() as i32;
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_SIZE as i32 {
                    // Bit 0 is the leftmost pixel
                    if *bits & (1u8 << col) != 0 {
                        canvas.fill_rect(
                            left + col * scale,
                            y + row as i32 * scale,
                            self.scale,
                            self.scale,
                            color,
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
    const WHITE: RGB8 = RGB8 {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn scales_to_size() {
        assert_eq!(BitmapFont::for_size(4.0).scale(), 1);
        assert_eq!(BitmapFont::for_size(14.0).scale(), 1);
        assert_eq!(BitmapFont::for_size(18.0).scale(), 2);
        assert_eq!(BitmapFont::for_size(24.0).scale(), 3);
    }

    #[test]
    fn draws_inside_its_cells() {
        let font = BitmapFont::for_size(8.0);
        let mut canvas = Canvas::new(16, 8, BLACK);
        font.draw_text(&mut canvas, 8, 0, "█", WHITE);

        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(canvas.pixel(x, y), Some(BLACK));
                assert_eq!(canvas.pixel(x + 8, y), Some(WHITE));
            }
        }
    }

    #[test]
    fn spaces_draw_nothing() {
        let font = BitmapFont::for_size(8.0);
        let mut canvas = Canvas::new(16, 8, BLACK);
        font.draw_text(&mut canvas, 0, 0, "  ", WHITE);

        for y in 0..8 {
            for x in 0..16 {
                assert_eq!(canvas.pixel(x, y), Some(BLACK));
            }
        }
    }
}

use ab_glyph::{point, Font as _, FontVec, PxScale, ScaleFont};
use rgb::RGB8;

use std::fs;
use std::path::Path;

use super::FontError;
use crate::canvas::Canvas;

/// A TrueType or OpenType font at a fixed pixel size
pub struct OutlineFont {
    font: FontVec,
    scale: PxScale,
    size: f32,
}

impl OutlineFont {
    pub fn load(path: &Path, size: f32) -> Result<Self, FontError> {
        let data = fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(data).map_err(|_| FontError::Invalid {
            path: path.to_path_buf(),
        })?;

        // `size` is the em size in pixels, `PxScale` is the ascent to descent height
        let units_per_em = font.units_per_em().unwrap_or_else(|| font.height_unscaled());
        let scale = PxScale::from(size * font.height_unscaled() / units_per_em);
        log::debug!("Loaded font {} at {}px", path.display(), size);

        Ok(OutlineFont { font, scale, size })
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn text_width(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        text.chars()
            .map(|c| scaled.h_advance(scaled.glyph_id(c)))
            .sum()
    }

    /// Width of the inked part of `c`, or its advance if it has no outline
    pub fn ink_width(&self, c: char) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let glyph = scaled.scaled_glyph(c);
        match self.font.outline_glyph(glyph) {
            Some(outlined) => outlined.px_bounds().width(),
            None => scaled.h_advance(scaled.glyph_id(c)),
        }
    }

    pub fn draw_text(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, color: RGB8) {
        let scaled = self.font.as_scaled(self.scale);
        let baseline = y as f32 + scaled.ascent();
        let mut caret = x as f32;

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            let glyph = id.with_scale_and_position(self.scale, point(caret, baseline));
            caret += scaled.h_advance(id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
                outlined.draw(|gx, gy, coverage| {
                    canvas.blend(left + gx as i32, top + gy as i32, color, coverage);
                });
            }
        }
    }
}

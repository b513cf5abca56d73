use rgb::RGB8;
use thiserror::Error;

use std::path::{Path, PathBuf};

use crate::canvas::Canvas;

mod bitmap;
mod outline;

pub use bitmap::BitmapFont;
pub use outline::OutlineFont;

/// The monospace font used for terminal text
pub const DEFAULT_TEXT_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf";
/// The font used for image titles
pub const DEFAULT_TITLE_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

/// A font loading error
#[derive(Error, Debug)]
pub enum FontError {
    #[error("Could not read font file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Not a usable font file: {}", path.display())]
    Invalid { path: PathBuf },
}

/// A font at a fixed pixel size
pub enum Font {
    Outline(OutlineFont),
    Bitmap(BitmapFont),
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Font::Outline(font) => f
                .debug_struct("Font::Outline")
                .field("size", &font.size())
                .finish(),
            Font::Bitmap(font) => f
                .debug_struct("Font::Bitmap")
                .field("scale", &font.scale())
                .finish(),
        }
    }
}

impl Font {
    /// Load a TrueType or OpenType font file
    pub fn load<P: AsRef<Path>>(path: P, size: f32) -> Result<Self, FontError> {
        OutlineFont::load(path.as_ref(), size).map(Font::Outline)
    }

    /// Load a font file, falling back to the built-in bitmap font if that fails
    pub fn load_or_fallback<P: AsRef<Path>>(path: P, size: f32) -> Self {
        match Font::load(path, size) {
            Ok(font) => font,
            Err(e) => {
                log::warn!("{}. Using the built-in fallback font.", e);
                Font::fallback(size)
            }
        }
    }

    /// The built-in bitmap font, scaled to roughly match `size`
    pub fn fallback(size: f32) -> Self {
        Font::Bitmap(BitmapFont::for_size(size))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Font::Bitmap(_))
    }

    /// The width of a single character cell, measured on the ink box of `X`
    pub fn char_width(&self) -> u32 {
        let width = match self {
            Font::Outline(font) => font.ink_width('X').round() as u32,
            Font::Bitmap(font) => font.text_width("X"),
        };
        width.max(1)
    }

    /// The horizontal space `text` takes up when drawn
    pub fn text_width(&self, text: &str) -> u32 {
        match self {
            Font::Outline(font) => font.text_width(text).ceil() as u32,
            Font::Bitmap(font) => font.text_width(text),
        }
    }

    /// The height of the glyph box, used as the background height of a text run
    pub fn glyph_height(&self) -> u32 {
        match self {
            Font::Outline(font) => font.size().ceil() as u32,
            Font::Bitmap(font) => font.glyph_height(),
        }
    }

    /// Draw `text` with its line box top-left at (`x`, `y`)
    pub fn draw_text(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, color: RGB8) {
        match self {
            Font::Outline(font) => font.draw_text(canvas, x, y, text, color),
            Font::Bitmap(font) => font.draw_text(canvas, x, y, text, color),
        }
    }
}

/// The pair of fonts a renderer draws with
#[derive(Debug)]
pub struct FontSet {
    pub text: Font,
    pub title: Font,
}

impl FontSet {
    /// Load the text and title fonts, using the DejaVu defaults for any path not given
    pub fn load(
        text: Option<&Path>,
        title: Option<&Path>,
        text_size: f32,
        title_size: f32,
    ) -> Self {
        let text = text.unwrap_or_else(|| Path::new(DEFAULT_TEXT_FONT));
        let title = title.unwrap_or_else(|| Path::new(DEFAULT_TITLE_FONT));

        FontSet {
            text: Font::load_or_fallback(text, text_size),
            title: Font::load_or_fallback(title, title_size),
        }
    }

    /// Both fonts from the built-in bitmap font
    pub fn fallback(text_size: f32, title_size: f32) -> Self {
        FontSet {
            text: Font::fallback(text_size),
            title: Font::fallback(title_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_falls_back() {
        let font = Font::load_or_fallback("/no/such/font.ttf", 14.0);
        assert!(font.is_fallback());
        assert_eq!(font.char_width(), 8);
    }

    #[test]
    fn invalid_font_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        assert!(matches!(
            Font::load(&path, 14.0),
            Err(FontError::Invalid { .. })
        ));
    }

    #[test]
    fn fallback_widths_are_monospaced() {
        let font = Font::fallback(14.0);
        assert_eq!(font.text_width(""), 0);
        assert_eq!(font.text_width("abc"), 3 * font.char_width());
        assert_eq!(font.text_width("█▓░"), 3 * font.char_width());
    }

    #[test]
    fn default_text_font_fits_the_256_table() {
        let fonts = FontSet::load(None, None, 14.0, 18.0);
        let longest = crate::tables::color_table_256(&crate::color::Palette::default())
            .lines()
            .map(|row| crate::ansi::visible_text(row).chars().count())
            .max()
            .unwrap();

        assert!(fonts.text.char_width() < 14);
        assert!(longest as u32 * fonts.text.char_width() + 40 <= 1400);
    }

    #[test]
    fn fallback_set_scales_title() {
        let fonts = FontSet::fallback(14.0, 18.0);
        assert!(fonts.title.char_width() > fonts.text.char_width());
    }
}

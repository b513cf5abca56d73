//! Terminal color scheme previews
//!
//! Renders ANSI colored terminal output and palette preview cards for a terminal color theme as
//! PNG images.

use thiserror::Error;

use std::io::{Read, Write};

#[macro_use]
mod macros;

pub mod ansi;
pub mod canvas;
pub mod color;
pub mod font;
pub mod renderer;
pub mod tables;
pub mod theme;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;

pub use font::FontSet;
pub use theme::{Theme, ThemeError};
pub use types::{PreviewLayout, SnippetLayout};

/// An error producing an image
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Could not encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Theme(#[from] ThemeError),
    #[error("{0}")]
    Render(#[from] RenderError),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the ANSI colored text read from `reader` as a PNG written to `writer`
///
/// Invalid UTF-8 in the input is replaced rather than rejected. Nothing is written until the image
/// has been encoded.
pub fn convert_ansi_to_png<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    title: &str,
    theme: &Theme,
    fonts: &FontSet,
    layout: &SnippetLayout,
) -> Result<(), Error> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    let text = String::from_utf8_lossy(&input);

    let png = renderer::render_snippet(&text, title, theme, fonts, layout).encode_png()?;
    writer.write_all(&png)?;

    Ok(())
}

/// Render the palette preview card of `theme` as a PNG written to `writer`
pub fn convert_palette_to_png<W: Write>(
    mut writer: W,
    title: &str,
    theme: &Theme,
    fonts: &FontSet,
    layout: &PreviewLayout,
) -> Result<(), Error> {
    let png = renderer::render_palette(theme, title, fonts, layout).encode_png()?;
    writer.write_all(&png)?;

    Ok(())
}

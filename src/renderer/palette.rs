use rgb::RGB8;

use crate::canvas::Canvas;
use crate::color::DEFAULT_BACKGROUND;
use crate::font::{Font, FontSet};
use crate::theme::Theme;
use crate::types::PreviewLayout;

const WHITE: RGB8 = RGB8 {
    r: 0xff,
    g: 0xff,
    b: 0xff,
};

/// Draw one row of eight labelled swatches starting with palette entry `first`
fn draw_swatches(
    canvas: &mut Canvas,
    font: &Font,
    theme: &Theme,
    layout: &PreviewLayout,
    first: usize,
    y: i32,
) {
    let cell = layout.cell_size as i32;
    for (column, index) in (first..first + 8).enumerate() {
        let x = (layout.padding + column as u32 * (layout.cell_size + layout.cell_gap)) as i32;

        // The swatch spans cell_size + 1 pixels so the outline sits on both edges
        let side = layout.cell_size + 1;
        canvas.fill_rect(x, y, side, side, theme.palette[index]);
        canvas.outline_rect(x, y, side, side, theme.foreground);

        let label = index.to_string();
        let label_x = x + (cell - font.text_width(&label) as i32) / 2;
        let label_y = y + (cell - font.glyph_height() as i32) / 2;
        let label_color = if index == 0 { WHITE } else { DEFAULT_BACKGROUND };
        font.draw_text(canvas, label_x, label_y, &label, label_color);
    }
}

/// Render the palette preview of `theme`
///
/// The card shows the title, the normal and bright palette rows as numbered swatches, and a few
/// lines of sample text in the foreground and the first six ANSI colors.
pub fn render_palette(
    theme: &Theme,
    title: &str,
    fonts: &FontSet,
    layout: &PreviewLayout,
) -> Canvas {
    flame!(guard "render_palette");
    log::debug!(
        "Rendering palette preview of `{}` at {}x{}",
        theme.name,
        layout.width,
        layout.height
    );

    let mut canvas = Canvas::new(
        layout.width as usize,
        layout.height as usize,
        theme.background,
    );
    let padding = layout.padding as i32;
    let label_height = layout.label_height as i32;
    let cell = layout.cell_size as i32;

    fonts
        .title
        .draw_text(&mut canvas, padding, padding, title, theme.foreground);

    let mut y = padding + 50;
    fonts.text.draw_text(
        &mut canvas,
        padding,
        y,
        "Normal Colors:",
        theme.foreground,
    );
    y += label_height;
    draw_swatches(&mut canvas, &fonts.text, theme, layout, 0, y);

    y += cell + 20;
    fonts.text.draw_text(
        &mut canvas,
        padding,
        y,
        "Bright Colors:",
        theme.foreground,
    );
    y += label_height;
    draw_swatches(&mut canvas, &fonts.text, theme, layout, 8, y);

    y += cell + 40;
    fonts
        .text
        .draw_text(&mut canvas, padding, y, "Sample Text:", theme.foreground);
    y += label_height;

    let samples = [
        ("Normal text in foreground color", theme.foreground),
        ("Red text sample", theme.palette[1]),
        ("Green text sample", theme.palette[2]),
        ("Yellow text sample", theme.palette[3]),
        ("Blue text sample", theme.palette[4]),
        ("Magenta text sample", theme.palette[5]),
        ("Cyan text sample", theme.palette[6]),
    ];
    for (text, color) in samples.iter() {
        fonts
            .text
            .draw_text(&mut canvas, padding + 20, y, text, *color);
        y += label_height;
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;

    fn theme() -> Theme {
        let mut colors = [RGB8::new(0, 0, 0); 16];
        for (i, color) in colors.iter_mut().enumerate() {
            *color = RGB8::new(i as u8 * 10 + 5, 100, 200);
        }
        Theme {
            name: "Test".into(),
            palette: Palette::new(colors),
            foreground: RGB8::new(250, 250, 250),
            background: RGB8::new(30, 30, 30),
            cursor: None,
        }
    }

    #[test]
    fn has_fixed_size_and_backdrop() {
        let layout = PreviewLayout::default();
        let canvas = render_palette(&theme(), "", &FontSet::fallback(16.0, 24.0), &layout);

        assert_eq!(canvas.width(), 800);
        assert_eq!(canvas.height(), 600);
        assert_eq!(canvas.pixel(799, 599), Some(theme().background));
    }

    #[test]
    fn swatches_show_every_palette_entry() {
        let theme = theme();
        let layout = PreviewLayout::default();
        let canvas = render_palette(&theme, "", &FontSet::fallback(16.0, 24.0), &layout);

        let normal_top = 20 + 50 + 25;
        let bright_top = normal_top + 60 + 20 + 25;
        for i in 0..8 {
            let x = 20 + i * 65;
            // Inside the swatch, clear of the centred label
            assert_eq!(
                canvas.pixel(x + 5, normal_top + 5),
                Some(theme.palette[i]),
                "swatch {}",
                i
            );
            assert_eq!(
                canvas.pixel(x + 5, bright_top + 5),
                Some(theme.palette[i + 8]),
                "swatch {}",
                i + 8
            );
            // Outlined in the foreground color
            assert_eq!(canvas.pixel(x, normal_top), Some(theme.foreground));
        }
    }
}

use crate::ansi::{is_blank, styled_runs, visible_text, StyledRun};
use crate::canvas::Canvas;
use crate::font::{Font, FontSet};
use crate::theme::{BaseColors, Theme};
use crate::types::SnippetLayout;

/// Split input into lines, dropping the `\r` of CRLF line endings
fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Compute the `(width, height)` of the image for `text`
///
/// The width fits the longest line (capped at the layout's maximum width). The height counts only
/// lines with visible content, unless there are none, and never goes below the layout's minimum.
pub fn canvas_size(text: &str, char_width: u32, layout: &SnippetLayout) -> (usize, usize) {
    let mut line_count = 0;
    let mut printable = 0;
    let mut longest = 0;
    for line in lines(text) {
        line_count += 1;
        if !is_blank(line) {
            printable += 1;
        }
        longest = longest.max(visible_text(line).chars().count());
    }

    let counted = if printable == 0 { line_count } else { printable };
    let longest = if longest == 0 {
        layout.fallback_columns
    } else {
        longest
    };

    let padding = 2 * layout.padding as usize;
    let width = (longest * char_width as usize + padding).min(layout.max_width as usize);
    let height = (counted * layout.line_height as usize + padding + layout.title_band as usize)
        .max(layout.min_height as usize);

    (width, height)
}

/// Draw one run at `x`, returning the horizontal offset just past it
fn draw_run(
    canvas: &mut Canvas,
    font: &Font,
    x: i32,
    y: i32,
    run: &StyledRun,
    base: &BaseColors,
) -> i32 {
    let width = font.text_width(run.text);
    let has_background = run.background != base.background;

    if has_background {
        canvas.fill_rect(x, y, width, font.glyph_height(), run.background);
    }
    // Whitespace over the backdrop would not change a pixel
    if has_background || !run.text.trim().is_empty() {
        font.draw_text(canvas, x, y, run.text, run.foreground);
    }

    x + width as i32
}

/// Render ANSI colored `text` under a title
///
/// Each line starts from the theme's base colors and moves the cursor down one line height, blank
/// or not.
pub fn render_snippet(
    text: &str,
    title: &str,
    theme: &Theme,
    fonts: &FontSet,
    layout: &SnippetLayout,
) -> Canvas {
    flame!(guard "render_snippet");

    let base = theme.base_colors();
    let char_width = fonts.text.char_width();
    let (width, height) = canvas_size(text, char_width, layout);
    log::debug!(
        "Rendering snippet at {}x{} (character width {}px)",
        width,
        height,
        char_width
    );

    let mut canvas = Canvas::new(width, height, base.background);
    let padding = layout.padding as i32;
    fonts
        .title
        .draw_text(&mut canvas, padding, padding, title, base.foreground);

    let mut y = padding + layout.text_offset as i32;
    for line in lines(text) {
        let (runs, _) = styled_runs(line, &theme.palette, &base);
        let mut x = padding;
        for run in &runs {
            x = draw_run(&mut canvas, &fonts.text, x, y, run, &base);
        }
        y += layout.line_height as i32;
    }

    canvas
}

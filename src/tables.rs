use rgb::RGB8;

use std::fmt::Write;

use crate::color::{cube_color, gray_color, Palette};

/// The sample text drawn in every cell of the 16 color table
const SAMPLE: &str = "gYw";

fn luma(color: RGB8) -> i32 {
    ((u32::from(color.r) * 299 + u32::from(color.g) * 587 + u32::from(color.b) * 114) / 1000) as i32
}

/// Palette index (0 or 15) of a 256-color cell label, whichever stands out more against the cell
fn label_color(background: RGB8, palette: &Palette) -> u8 {
    let contrast = |index: usize| (luma(palette[index]) - luma(background)).abs();
    if contrast(0) > contrast(15) {
        0
    } else {
        15
    }
}

/// Every foreground (plain and bold) over every normal background
pub fn color_table_16() -> String {
    let mut out = String::new();

    out.push_str("                 ");
    for bg in 40..=47 {
        let _ = write!(out, "{}m     ", bg);
    }
    out.push('\n');

    let mut foregrounds: Vec<(String, String)> =
        vec![("    m".into(), String::new()), ("   1m".into(), "1".into())];
    for fg in 30..=37 {
        foregrounds.push((format!("  {}m", fg), fg.to_string()));
        foregrounds.push((format!("1;{}m", fg), format!("1;{}", fg)));
    }

    for (label, fg) in &foregrounds {
        let _ = write!(out, " {} \x1b[{}m  {}  ", label, fg, SAMPLE);
        for bg in 40..=47 {
            let _ = write!(out, " \x1b[{}m\x1b[{}m  {}  \x1b[0m", fg, bg, SAMPLE);
        }
        out.push('\n');
    }

    out
}

fn cell_256(out: &mut String, index: u32, background: RGB8, palette: &Palette) {
    let _ = write!(
        out,
        "\x1b[48;5;{};38;5;{}m{:>4}",
        index,
        label_color(background, palette),
        index
    );
}

/// The system colors, the 6x6x6 cube and the grayscale ramp of the 256-color palette
///
/// Cell labels are drawn in palette color 0 or 15, picked against each cell as `palette` renders it.
pub fn color_table_256(palette: &Palette) -> String {
    let mut out = String::new();

    out.push_str("System colors:\n");
    for row in 0..2 {
        for index in row * 8..row * 8 + 8 {
            cell_256(&mut out, index, palette[index as usize], palette);
        }
        out.push_str("\x1b[0m\n");
    }

    out.push_str("Color cube, 6x6x6:\n");
    for green in 0..6 {
        for red in 0..6 {
            for blue in 0..6 {
                let index = 16 + red * 36 + green * 6 + blue;
                cell_256(&mut out, index, cube_color(index), palette);
            }
            out.push_str("\x1b[0m ");
        }
        out.push_str("\x1b[0m\n");
    }

    out.push_str("Grayscale ramp:\n");
    for index in 232..256 {
        cell_256(&mut out, index, gray_color(index), palette);
    }
    out.push_str("\x1b[0m\n");

    out
}

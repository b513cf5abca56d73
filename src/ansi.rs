//! SGR escape sequence scanning and interpretation
//!
//! A line of terminal output is split into [`Segment`]s: literal text and `ESC [ params final`
//! control sequences. Only SGR sequences (final byte `m`) change the [`RenderState`]; every other
//! control sequence is skipped. An `ESC [` that never reaches a final byte is kept as literal text.

use rgb::RGB8;

use std::iter::Iterator;

use crate::color::{cube_color, gray_color, Palette};
use crate::theme::BaseColors;

const ESC: u8 = 0x1b;

/// A piece of a line of terminal output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text to draw, possibly containing an unterminated escape
    Literal(&'a str),
    /// A complete `ESC [ <params> <final>` sequence
    Control(ControlSequence<'a>),
}

/// A complete control sequence introduced by `ESC [`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlSequence<'a> {
    /// The raw parameter bytes, digits and `;` only
    pub params: &'a str,
    pub final_byte: char,
}

impl<'a> ControlSequence<'a> {
    /// Whether this is a Select Graphic Rendition sequence
    pub fn is_sgr(&self) -> bool {
        self.final_byte == 'm'
    }

    /// The numeric parameters of the sequence
    ///
    /// An empty parameter list is a single `0` and so is every empty field. Values too large for a
    /// `u32` saturate.
    pub fn params(&self) -> Vec<u32> {
        if self.params.is_empty() {
            return vec![0];
        }

        self.params
            .split(';')
            .map(|field| {
                if field.is_empty() {
                    0
                } else {
                    field.parse().unwrap_or(u32::MAX)
                }
            })
            .collect()
    }
}

/// Match a control sequence starting at byte `start`, returning it and the byte just past it
fn control_at(line: &str, start: usize) -> Option<(ControlSequence<'_>, usize)> {
    let bytes = line.as_bytes();
    if bytes.get(start) != Some(&ESC) || bytes.get(start + 1) != Some(&b'[') {
        return None;
    }

    let params_start = start + 2;
    let mut end = params_start;
    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b';') {
        end += 1;
    }

    match bytes.get(end) {
        Some(byte) if byte.is_ascii_alphabetic() => Some((
            ControlSequence {
                params: &line[params_start..end],
                final_byte: *byte as char,
            },
            end + 1,
        )),
        _ => None,
    }
}

/// An iterator over the [`Segment`]s of one line
///
/// Literal segments are maximal, so two literals are never yielded back to back.
pub struct Segments<'a> {
    line: &'a str,
    pos: usize,
}

/// Split a line into literal text and control sequences
pub fn segments(line: &str) -> Segments<'_> {
    Segments { line, pos: 0 }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.line;
        if self.pos >= line.len() {
            return None;
        }

        if let Some((sequence, end)) = control_at(line, self.pos) {
            self.pos = end;
            return Some(Segment::Control(sequence));
        }

        // ESC never occurs inside a multi-byte UTF-8 character, so stopping on one always lands
        // on a char boundary
        let bytes = line.as_bytes();
        let mut end = self.pos + 1;
        while end < bytes.len() {
            if bytes[end] == ESC && control_at(line, end).is_some() {
                break;
            }
            end += 1;
        }

        let literal = &line[self.pos..end];
        self.pos = end;
        Some(Segment::Literal(literal))
    }
}

/// The text a line shows once every control sequence is removed
pub fn visible_text(line: &str) -> String {
    segments(line)
        .filter_map(|segment| match segment {
            Segment::Literal(text) => Some(text),
            Segment::Control(_) => None,
        })
        .collect()
}

/// Whether a line shows nothing but whitespace
pub fn is_blank(line: &str) -> bool {
    visible_text(line).trim().is_empty()
}

/// The drawing state carried across one line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderState {
    pub foreground: RGB8,
    pub background: RGB8,
    pub bold: bool,
}

impl RenderState {
    /// The state at the start of every line and after a reset
    pub fn initial(base: &BaseColors) -> Self {
        RenderState {
            foreground: base.foreground,
            background: base.background,
            bold: false,
        }
    }

    /// Apply the parameters of one SGR sequence, left to right
    ///
    /// `38;5;n` and `48;5;n` consume their two extra parameters. Codes without an effect here are
    /// ignored.
    pub fn apply_sgr(mut self, params: &[u32], palette: &Palette, base: &BaseColors) -> Self {
        let mut i = 0;
        while i < params.len() {
            match params[i] {
                0 => self = RenderState::initial(base),
                1 => self.bold = true,
                code @ 38 | code @ 48 if params.get(i + 1) == Some(&5) && i + 2 < params.len() => {
                    let index = params[i + 2];
                    if code == 38 {
                        self.foreground = palette.get(index).unwrap_or_else(|| {
                            log::debug!(
                                "256-color foreground {} is not resolved, using the theme foreground",
                                index
                            );
                            base.foreground
                        });
                    } else {
                        self.background = extended_background(index, palette);
                    }
                    i += 2;
                }
                code @ 30..=37 => {
                    let offset = if self.bold { 8 } else { 0 };
                    self.foreground = palette[(code - 30 + offset) as usize];
                }
                code @ 40..=47 => self.background = palette[(code - 40) as usize],
                code @ 90..=97 => self.foreground = palette[(code - 90 + 8) as usize],
                code @ 100..=107 => self.background = palette[(code - 100 + 8) as usize],
                _ => (),
            }
            i += 1;
        }

        self
    }
}

/// Resolve a `48;5;n` background
fn extended_background(index: u32, palette: &Palette) -> RGB8 {
    match palette.get(index) {
        Some(color) => color,
        None if index < 232 => cube_color(index),
        None => gray_color(index),
    }
}

/// A span of text drawn with one set of colors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyledRun<'a> {
    pub text: &'a str,
    pub foreground: RGB8,
    pub background: RGB8,
    pub bold: bool,
}

/// Interpret one line, returning its styled runs and the state left after the last sequence
pub fn styled_runs<'a>(
    line: &'a str,
    palette: &Palette,
    base: &BaseColors,
) -> (Vec<StyledRun<'a>>, RenderState) {
    let mut state = RenderState::initial(base);
    let mut runs = Vec::new();

    for segment in segments(line) {
        match segment {
            Segment::Literal(text) => runs.push(StyledRun {
                text,
                foreground: state.foreground,
                background: state.background,
                bold: state.bold,
            }),
            Segment::Control(sequence) if sequence.is_sgr() => {
                state = state.apply_sgr(&sequence.params(), palette, base);
            }
            Segment::Control(_) => (),
        }
    }

    (runs, state)
}

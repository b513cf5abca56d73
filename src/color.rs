use rgb::RGB8;

use std::ops::Index;

/// The backdrop used when a theme does not define one
pub const DEFAULT_BACKGROUND: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
/// The text color used when a theme does not define one
pub const DEFAULT_FOREGROUND: RGB8 = RGB8 {
    r: 0xff,
    g: 0xff,
    b: 0xff,
};

macro_rules! hex {
    ($r:literal, $g:literal, $b:literal) => {
        RGB8 {
            r: $r,
            g: $g,
            b: $b,
        }
    };
}

/// The palette used for any entry a theme leaves out
pub const DEFAULT_PALETTE: [RGB8; 16] = [
    hex!(0x00, 0x00, 0x00), // black
    hex!(0xff, 0x00, 0x00), // red
    hex!(0x00, 0xff, 0x00), // green
    hex!(0xff, 0xff, 0x00), // yellow
    hex!(0x00, 0x00, 0xff), // blue
    hex!(0xff, 0x00, 0xff), // magenta
    hex!(0x00, 0xff, 0xff), // cyan
    hex!(0xff, 0xff, 0xff), // white
    hex!(0x80, 0x80, 0x80), // bright black
    hex!(0xff, 0x80, 0x80), // bright red
    hex!(0x80, 0xff, 0x80), // bright green
    hex!(0xff, 0xff, 0x80), // bright yellow
    hex!(0x80, 0x80, 0xff), // bright blue
    hex!(0xff, 0x80, 0xff), // bright magenta
    hex!(0x80, 0xff, 0xff), // bright cyan
    hex!(0xff, 0xff, 0xff), // bright white
];

/// Parse a `#rrggbb` (or bare `rrggbb`) color
pub fn parse_color(value: &str) -> Option<RGB8> {
    let value = value.trim();
    let digits = value.strip_prefix('#').unwrap_or(value);
    if digits.len() != 6 {
        return None;
    }

    match base16::decode(digits) {
        Ok(bytes) => Some(RGB8::new(bytes[0], bytes[1], bytes[2])),
        Err(_) => None,
    }
}

/// Format a color as lowercase `#rrggbb`
pub fn to_hex(color: RGB8) -> String {
    format!("#{}", base16::encode_lower(&[color.r, color.g, color.b]))
}

/// Resolve an index of the 6x6x6 color cube (16 through 231)
///
/// Each channel steps by 51, so index 16 is black and 231 is white.
pub fn cube_color(index: u32) -> RGB8 {
    let n = index.saturating_sub(16).min(215);
    let step = |v: u32| (v * 51) as u8;
    RGB8::new(step(n / 36), step((n % 36) / 6), step(n % 6))
}

/// Resolve an index of the grayscale ramp (232 and up)
pub fn gray_color(index: u32) -> RGB8 {
    let level = index
        .saturating_sub(232)
        .saturating_mul(10)
        .saturating_add(8)
        .min(255) as u8;
    RGB8::new(level, level, level)
}

/// The 16 base colors of a terminal theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette([RGB8; 16]);

impl Palette {
    pub fn new(colors: [RGB8; 16]) -> Self {
        Palette(colors)
    }

    /// Build a palette from optional entries, filling gaps from [`DEFAULT_PALETTE`]
    pub fn with_defaults(entries: &[Option<RGB8>; 16]) -> Self {
        let mut colors = DEFAULT_PALETTE;
        for (slot, entry) in colors.iter_mut().zip(entries.iter()) {
            if let Some(color) = entry {
                *slot = *color;
            }
        }
        Palette(colors)
    }

    /// Look up an entry, returning `None` outside of 0..16
    pub fn get(&self, index: u32) -> Option<RGB8> {
        self.0.get(index as usize).copied()
    }

    pub fn colors(&self) -> &[RGB8; 16] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette(DEFAULT_PALETTE)
    }
}

impl Index<usize> for Palette {
    type Output = RGB8;

    fn index(&self, index: usize) -> &RGB8 {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_color("#ff8000"), Some(RGB8::new(255, 128, 0)));
        assert_eq!(parse_color("3950D7"), Some(RGB8::new(0x39, 0x50, 0xd7)));
        assert_eq!(parse_color(" #000000 "), Some(RGB8::new(0, 0, 0)));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert_eq!(parse_color("#fff"), None);
        assert_eq!(parse_color("#gg0000"), None);
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("rgb:ff/00/00"), None);
    }

    #[test]
    fn formats_hex_colors() {
        assert_eq!(to_hex(RGB8::new(0x51, 0xff, 0x0f)), "#51ff0f");
    }

    #[test]
    fn cube_corners() {
        assert_eq!(cube_color(16), RGB8::new(0, 0, 0));
        assert_eq!(cube_color(231), RGB8::new(255, 255, 255));
        assert_eq!(cube_color(196), RGB8::new(255, 0, 0));
        assert_eq!(cube_color(21), RGB8::new(0, 0, 255));
    }

    #[test]
    fn gray_ramp_increases() {
        let mut last = None;
        for n in 232..=255 {
            let level = gray_color(n).r;
            if let Some(prev) = last {
                assert!(level > prev, "gray {} is not brighter than {}", n, n - 1);
            }
            last = Some(level);
        }
        assert_eq!(gray_color(232), RGB8::new(8, 8, 8));
        assert_eq!(gray_color(255), RGB8::new(238, 238, 238));
        assert_eq!(gray_color(u32::MAX), RGB8::new(255, 255, 255));
    }

    #[test]
    fn palette_fills_missing_entries() {
        let mut entries = [None; 16];
        entries[1] = Some(RGB8::new(1, 2, 3));
        let palette = Palette::with_defaults(&entries);

        assert_eq!(palette[1], RGB8::new(1, 2, 3));
        assert_eq!(palette[0], DEFAULT_PALETTE[0]);
        assert_eq!(palette[15], DEFAULT_PALETTE[15]);
        assert_eq!(palette.get(16), None);
    }
}

use rgb::RGB8;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fs;
use std::path::{Path, PathBuf};

use crate::color::{parse_color, to_hex, Palette, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};

/// A theme loading error
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Could not read theme file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid color `{value}` for {key} on line {line}")]
    InvalidColor {
        key: String,
        value: String,
        line: usize,
    },
    #[error("Could not parse JSON theme: {0}")]
    Json(#[from] serde_json::Error),
    #[error("A theme has at most 16 palette colors, got {0}")]
    TooManyColors(usize),
}

/// The default text and backdrop colors of a theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaseColors {
    pub foreground: RGB8,
    pub background: RGB8,
}

impl Default for BaseColors {
    fn default() -> Self {
        BaseColors {
            foreground: DEFAULT_FOREGROUND,
            background: DEFAULT_BACKGROUND,
        }
    }
}

/// A fully resolved terminal theme
///
/// Colors a theme file leaves out are filled in from the default palette.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: String,
    pub palette: Palette,
    pub foreground: RGB8,
    pub background: RGB8,
    pub cursor: Option<RGB8>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            name: "Default".into(),
            palette: Palette::default(),
            foreground: DEFAULT_FOREGROUND,
            background: DEFAULT_BACKGROUND,
            cursor: None,
        }
    }
}

/// The hterm profile shape: `{ cursor, foreground, background, colors: [...] }`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
struct JsonTheme {
    name: Option<String>,
    cursor: Option<String>,
    foreground: Option<String>,
    background: Option<String>,
    #[serde(default)]
    colors: Vec<String>,
}

impl Theme {
    pub fn base_colors(&self) -> BaseColors {
        BaseColors {
            foreground: self.foreground,
            background: self.background,
        }
    }

    /// Load a theme file, picking the parser from the file extension
    ///
    /// `.json` files are read as hterm profiles, everything else as xrdb.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let mut theme = if is_json {
            Theme::from_json_str(&contents)?
        } else {
            Theme::from_xrdb_str(&contents)?
        };

        if theme.name == Theme::default().name {
            if let Some(stem) = path.file_stem() {
                theme.name = stem.to_string_lossy().into_owned();
            }
        }
        log::debug!(
            "Loaded theme `{}` from {} (foreground {}, background {})",
            theme.name,
            path.display(),
            to_hex(theme.foreground),
            to_hex(theme.background)
        );

        Ok(theme)
    }

    /// Parse xrdb `#define Name #rrggbb` lines
    pub fn from_xrdb_str(contents: &str) -> Result<Self, ThemeError> {
        let mut entries = [None; 16];
        let mut theme = Theme::default();

        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if !line.starts_with("#define") {
                continue;
            }
            let mut parts = line.split_whitespace().skip(1);
            let (key, value) = match (parts.next(), parts.next()) {
                (Some(key), Some(value)) => (key, value),
                _ => continue,
            };

            let slot = match xrdb_slot(key) {
                Some(slot) => slot,
                None => continue,
            };
            let color = parse_color(value).ok_or_else(|| ThemeError::InvalidColor {
                key: key.into(),
                value: value.into(),
                line: index + 1,
            })?;

            match slot {
                XrdbSlot::Ansi(n) => entries[n] = Some(color),
                XrdbSlot::Foreground => theme.foreground = color,
                XrdbSlot::Background => theme.background = color,
                XrdbSlot::Cursor => theme.cursor = Some(color),
            }
        }

        theme.palette = Palette::with_defaults(&entries);
        Ok(theme)
    }

    /// Parse an hterm-style JSON profile
    pub fn from_json_str(contents: &str) -> Result<Self, ThemeError> {
        let raw: JsonTheme = serde_json::from_str(contents)?;
        if raw.colors.len() > 16 {
            return Err(ThemeError::TooManyColors(raw.colors.len()));
        }

        let color = |key: &str, value: &Option<String>| -> Result<Option<RGB8>, ThemeError> {
            match value {
                Some(value) => parse_color(value)
                    .map(Some)
                    .ok_or_else(|| ThemeError::InvalidColor {
                        key: key.into(),
                        value: value.clone(),
                        line: 1,
                    }),
                None => Ok(None),
            }
        };

        let mut entries = [None; 16];
        for (i, value) in raw.colors.iter().enumerate() {
            entries[i] = color(&format!("colors[{}]", i), &Some(value.clone()))?;
        }

        let defaults = Theme::default();
        Ok(Theme {
            name: raw.name.unwrap_or(defaults.name),
            palette: Palette::with_defaults(&entries),
            foreground: color("foreground", &raw.foreground)?.unwrap_or(defaults.foreground),
            background: color("background", &raw.background)?.unwrap_or(defaults.background),
            cursor: color("cursor", &raw.cursor)?,
        })
    }
}

enum XrdbSlot {
    Ansi(usize),
    Foreground,
    Background,
    Cursor,
}

fn xrdb_slot(key: &str) -> Option<XrdbSlot> {
    match key {
        "Foreground_Color" => Some(XrdbSlot::Foreground),
        "Background_Color" => Some(XrdbSlot::Background),
        "Cursor_Color" => Some(XrdbSlot::Cursor),
        _ => {
            let n: usize = key
                .strip_prefix("Ansi_")?
                .strip_suffix("_Color")?
                .parse()
                .ok()?;
            if n < 16 {
                Some(XrdbSlot::Ansi(n))
            } else {
                None
            }
        }
    }
}
